/// Rectified linear unit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Relu;

impl Relu {
    pub fn new() -> Self {
        Self
    }

    pub fn f(&self, z: f32) -> f32 {
        z.max(0.)
    }

    /// Sign based step, `(sign(z) + 1) div 2`: zero is mapped to `0`, not to `0.5`.
    pub fn df(&self, z: f32) -> f32 {
        let sign = if z > 0. {
            1.
        } else if z < 0. {
            -1.
        } else {
            0.
        };

        ((sign + 1.) / 2_f32).floor()
    }
}

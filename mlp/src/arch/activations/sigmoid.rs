/// Logistic function.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn new() -> Self {
        Self
    }

    pub fn f(&self, z: f32) -> f32 {
        1. / (1. + (-z).exp())
    }

    /// `f(x) * (1 - f(x))`, applied to whatever the caller passes. The network passes the
    /// layer's activation, not its weighted sum.
    pub fn df(&self, x: f32) -> f32 {
        let s = self.f(x);
        s * (1. - s)
    }
}

/// Scaled hyperbolic tangent `a * tanh(b * z)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tanh {
    a: f32,
    b: f32,
}

impl Default for Tanh {
    fn default() -> Self {
        Self::new(1., 1.)
    }
}

impl Tanh {
    /// Creates a new `Tanh`.
    ///
    /// # Arguments
    /// * `a` - The amplitude.
    /// * `b` - The slope at the origin, before scaling by `a`.
    pub fn new(a: f32, b: f32) -> Self {
        Self { a, b }
    }

    pub fn f(&self, z: f32) -> f32 {
        self.a * (self.b * z).tanh()
    }

    pub fn df(&self, z: f32) -> f32 {
        self.a * self.b / (self.b * z).cosh().powi(2)
    }
}

/// Affine function `m * z + c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Linear {
    m: f32,
    c: f32,
}

impl Default for Linear {
    fn default() -> Self {
        Self::new(1., 0.)
    }
}

impl Linear {
    pub fn new(m: f32, c: f32) -> Self {
        Self { m, c }
    }

    pub fn f(&self, z: f32) -> f32 {
        self.m * z + self.c
    }

    pub fn df(&self, _z: f32) -> f32 {
        self.m
    }
}

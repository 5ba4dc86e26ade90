use ndarray::{Array1, ArrayView1};

/// Scale applied by `Softmax::df`. The output layer's delta is divided by the same factor.
pub const SOFTMAX_GRAD_SCALE: f32 = 10.;

/// The output layer's transform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Softmax;

impl Softmax {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes `z` into a probability distribution. The maximum is subtracted before
    /// exponentiating so large inputs don't overflow.
    pub fn f(&self, z: ArrayView1<f32>) -> Array1<f32> {
        let max = z.fold(f32::NEG_INFINITY, |acc, &v| acc.max(v));
        let mut exp = z.mapv(|v| (v - max).exp());
        let sum = exp.sum();
        exp /= sum;
        exp
    }

    /// A scaled pass-through of the activation, not the softmax jacobian.
    pub fn df(&self, a: ArrayView1<f32>) -> Array1<f32> {
        a.mapv(|v| v / SOFTMAX_GRAD_SCALE)
    }
}

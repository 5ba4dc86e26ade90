use ndarray::ArrayView1;

pub trait LossFn {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32;
}

/// Binary cross-entropy summed over the output nodes:
/// `-(yᵗ·ln(ŷ) + (1 - y)ᵗ·ln(1 - ŷ))`.
///
/// Predictions are not clipped away from 0 and 1, a saturated softmax output yields a
/// non-finite loss.
#[derive(Default, Clone, Copy, Debug)]
pub struct CrossEntropy;

impl CrossEntropy {
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for CrossEntropy {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
        let hit = y.dot(&y_pred.mapv(f32::ln));
        let miss = y.mapv(|y| 1. - y).dot(&y_pred.mapv(|p| (1. - p).ln()));
        -(hit + miss)
    }
}

use ndarray::Array1;

/// A stage of nodes: its bias and the per-sample caches of the last forward and backward
/// passes. The caches are overwritten on every sample.
#[derive(Clone, Debug)]
pub struct Layer {
    pub(crate) bias: Array1<f32>,

    // Forward metadata
    pub(crate) output: Array1<f32>,
    pub(crate) derivative: Array1<f32>,

    // Backward metadata
    pub(crate) delta: Array1<f32>,
}

impl Layer {
    /// Creates a new `Layer` with a zeroed bias and zeroed caches.
    ///
    /// # Arguments
    /// * `width` - The amount of nodes in the layer.
    pub fn new(width: usize) -> Self {
        let zeros = Array1::zeros(width);

        Self {
            bias: zeros.clone(),
            output: zeros.clone(),
            derivative: zeros.clone(),
            delta: zeros,
        }
    }

    /// Returns the amount of nodes in this layer.
    pub fn width(&self) -> usize {
        self.bias.len()
    }
}

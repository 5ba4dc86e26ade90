use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, linalg};

/// The fully connected link between layer `i` and layer `i + 1`.
///
/// `weights[[r, c]]` is the strength from node `r` of the lower layer to node `c` of the upper
/// one. `grad` accumulates the weight steps of the running mini-batch.
#[derive(Clone, Debug)]
pub struct Dense {
    weights: Array2<f32>,
    grad: Array2<f32>,
}

impl Dense {
    /// Creates a new `Dense` link with an empty gradient accumulator.
    pub fn new(weights: Array2<f32>) -> Self {
        let grad = Array2::zeros(weights.raw_dim());
        Self { weights, grad }
    }

    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.weights.view()
    }

    pub fn grad(&self) -> ArrayView2<'_, f32> {
        self.grad.view()
    }

    /// Computes the weighted sum `wᵗ·x + b` of the upper layer.
    pub fn forward(&self, x: ArrayView1<f32>, b: ArrayView1<f32>) -> Array1<f32> {
        let mut z = b.to_owned();
        linalg::general_mat_vec_mul(1.0, &self.weights.t(), &x, 1.0, &mut z);
        z
    }

    /// Adds `lr · x ⊗ d` to the accumulator, `x` being the lower layer's output and `d` the
    /// upper layer's delta.
    pub fn accumulate(&mut self, lr: f32, x: ArrayView1<f32>, d: ArrayView1<f32>) {
        let x = x.insert_axis(Axis(1));
        let d = d.insert_axis(Axis(0));
        linalg::general_mat_mul(lr, &x, &d, 1.0, &mut self.grad);
    }

    /// Propagates the upper layer's delta through the weights, `w·d`.
    pub fn backward(&self, d: ArrayView1<f32>) -> Array1<f32> {
        self.weights.dot(&d)
    }

    /// Steps the weights with the averaged accumulator and resets it.
    pub fn apply(&mut self, batch_size: usize) {
        self.weights.scaled_add(1. / batch_size as f32, &self.grad);
        self.grad.fill(0.);
    }
}

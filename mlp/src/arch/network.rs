use std::num::NonZeroUsize;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::{
    NetworkSpec,
    activations::{ActFn, SOFTMAX_GRAD_SCALE, Softmax},
    layers::{Dense, Layer},
    spec::validate_learning_rate,
};
use crate::{MlErr, Result, initialization::ParamGen};

/// A feed-forward classifier: information flows forward when computing an output and backward
/// when computing the *deltas* of its layers.
///
/// Hidden layers share one activation function, the output layer always uses `Softmax`.
/// Biases learn on every sample while weights learn once per mini-batch, from the average of
/// their accumulated steps.
#[derive(Clone, Debug)]
pub struct Network {
    layers: Vec<Layer>,
    links: Vec<Dense>,
    act_fn: ActFn,
    softmax: Softmax,
    learning_rate: f32,
}

impl Network {
    /// Creates a new `Network`.
    ///
    /// # Arguments
    /// * `spec` - The layer widths, activation name and learning rate.
    /// * `param_gen` - The generator of the initial weights, consumed layer by layer in
    ///   row-major order. Biases always start at zero.
    ///
    /// # Returns
    /// The network or the configuration error that prevented building it.
    pub fn new<G: ParamGen>(spec: &NetworkSpec, mut param_gen: G) -> Result<Self> {
        let act_fn = spec.validate()?;

        let links = spec
            .widths
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let expected = w[0] * w[1];
                let weights = param_gen.sample(expected).unwrap_or_default();
                if weights.len() != expected {
                    return Err(MlErr::ParamGenExhausted {
                        layer: i,
                        got: weights.len(),
                        expected,
                    });
                }

                let weights = Array2::from_shape_vec((w[0], w[1]), weights)?;
                Ok(Dense::new(weights))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::assemble(
            &spec.widths,
            links,
            act_fn,
            spec.learning_rate,
        ))
    }

    /// Creates a new `Network` from explicit weight matrices.
    ///
    /// # Arguments
    /// * `act_fn` - The hidden layers' activation.
    /// * `learning_rate` - The fixed learning rate.
    /// * `weights` - One `(widths[i], widths[i + 1])` matrix per link, in layer order.
    ///
    /// # Returns
    /// A shape error if consecutive matrices don't chain.
    pub fn with_weights(
        act_fn: ActFn,
        learning_rate: f32,
        weights: Vec<Array2<f32>>,
    ) -> Result<Self> {
        validate_learning_rate(learning_rate)?;

        let Some(first) = weights.first() else {
            return Err(MlErr::InvalidConfig(
                "a network needs at least an input and an output layer",
            ));
        };

        let mut widths = vec![first.nrows()];
        for (i, w) in weights.iter().enumerate() {
            if w.nrows() != widths[i] {
                return Err(MlErr::SizeMismatch {
                    what: "weight matrix rows",
                    got: w.nrows(),
                    expected: widths[i],
                });
            }

            widths.push(w.ncols());
        }

        if widths.contains(&0) {
            return Err(MlErr::InvalidConfig("every layer must have at least one node"));
        }

        let links = weights.into_iter().map(Dense::new).collect();
        Ok(Self::assemble(&widths, links, act_fn, learning_rate))
    }

    fn assemble(widths: &[usize], links: Vec<Dense>, act_fn: ActFn, learning_rate: f32) -> Self {
        Self {
            layers: widths.iter().map(|&w| Layer::new(w)).collect(),
            links,
            act_fn,
            softmax: Softmax::new(),
            learning_rate,
        }
    }

    /// Makes a forward pass through the network, caching every layer's output and derivative.
    ///
    /// # Arguments
    /// * `x` - The input features, one per input node.
    ///
    /// # Returns
    /// The output layer's activation.
    pub fn forward(&mut self, x: ArrayView1<f32>) -> Result<ArrayView1<'_, f32>> {
        let width = self.layers[0].width();
        if x.len() != width {
            return Err(MlErr::SizeMismatch {
                what: "input",
                got: x.len(),
                expected: width,
            });
        }

        let act_fn = self.act_fn;
        let softmax = self.softmax;
        let last = self.links.len() - 1;

        let input = &mut self.layers[0];
        input.output.assign(&x);
        input.derivative = act_fn.grad(x);

        for (i, dense) in self.links.iter().enumerate() {
            let (lower, upper) = self.layers.split_at_mut(i + 1);
            let (prev, curr) = (&lower[i], &mut upper[0]);

            let z = dense.forward(prev.output.view(), curr.bias.view());
            if i == last {
                curr.output = softmax.f(z.view());
                curr.derivative = softmax.df(curr.output.view());
            } else {
                curr.output = act_fn.value(z.view());
                curr.derivative = act_fn.grad(curr.output.view());
            }
        }

        Ok(self.layers[last + 1].output.view())
    }

    /// Makes a backward pass through the network for the sample of the last `forward` call.
    ///
    /// The output layer's bias learns first. Then, if `apply_update` is set, the mini-batch
    /// closes and the weights take their averaged step, before this sample's own weight steps
    /// are accumulated. Every other bias learns as its delta is computed.
    ///
    /// # Arguments
    /// * `target` - The one-hot encoded expected output.
    /// * `apply_update` - Whether this sample closes a mini-batch.
    /// * `batch_size` - The divisor of the accumulated weight steps.
    pub fn backward(
        &mut self,
        target: ArrayView1<f32>,
        apply_update: bool,
        batch_size: NonZeroUsize,
    ) -> Result<()> {
        let lr = self.learning_rate;
        let output = self.layers.len() - 1;
        let width = self.layers[output].width();
        if target.len() != width {
            return Err(MlErr::SizeMismatch {
                what: "target",
                got: target.len(),
                expected: width,
            });
        }

        let out = &mut self.layers[output];
        out.delta = (&target - &out.output) / SOFTMAX_GRAD_SCALE;
        out.bias.scaled_add(lr, &out.delta);

        if apply_update {
            self.apply_update(batch_size);
        }

        for (i, dense) in self.links.iter_mut().enumerate().rev() {
            let (lower, upper) = self.layers.split_at_mut(i + 1);
            let (curr, next) = (&mut lower[i], &upper[0]);

            dense.accumulate(lr, curr.output.view(), next.delta.view());
            curr.delta = dense.backward(next.delta.view()) * &curr.derivative;
            curr.bias.scaled_add(lr, &curr.delta);
        }

        Ok(())
    }

    /// Closes a mini-batch: every weight matrix takes the average of its accumulated steps and
    /// every accumulator is reset.
    pub fn apply_update(&mut self, batch_size: NonZeroUsize) {
        for dense in &mut self.links {
            dense.apply(batch_size.get());
        }
    }

    /// Makes a forward pass and returns an owned copy of the output layer's activation.
    pub fn predict(&mut self, x: ArrayView1<f32>) -> Result<Array1<f32>> {
        self.forward(x).map(|y| y.to_owned())
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Returns the amount of nodes of each layer.
    pub fn widths(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::width).collect()
    }

    pub fn act_fn(&self) -> ActFn {
        self.act_fn
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    /// Returns the weights between layer `i` and layer `i + 1`.
    ///
    /// # Panics
    /// If `i >= num_layers() - 1`.
    pub fn weights(&self, i: usize) -> ArrayView2<'_, f32> {
        self.links[i].weights()
    }

    /// Returns the weight steps accumulated in the running mini-batch for link `i`.
    pub fn weight_grad(&self, i: usize) -> ArrayView2<'_, f32> {
        self.links[i].grad()
    }

    /// Returns every weight matrix, in layer order.
    pub fn all_weights(&self) -> impl Iterator<Item = ArrayView2<'_, f32>> {
        self.links.iter().map(Dense::weights)
    }

    pub fn bias(&self, i: usize) -> ArrayView1<'_, f32> {
        self.layers[i].bias.view()
    }

    pub fn output(&self, i: usize) -> ArrayView1<'_, f32> {
        self.layers[i].output.view()
    }

    pub fn derivative(&self, i: usize) -> ArrayView1<'_, f32> {
        self.layers[i].derivative.view()
    }

    pub fn delta(&self, i: usize) -> ArrayView1<'_, f32> {
        self.layers[i].delta.view()
    }
}

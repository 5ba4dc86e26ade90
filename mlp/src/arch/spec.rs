use serde::{Deserialize, Serialize};

use super::activations::ActFn;
use crate::{MlErr, Result};

/// The specification a `Network` is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// The number of layers, input and output included.
    pub num_layers: usize,
    /// The number of nodes of each layer.
    pub widths: Vec<usize>,
    /// The name of the hidden layers' activation function.
    pub activation: String,
    pub learning_rate: f32,
}

impl NetworkSpec {
    /// Creates a new `NetworkSpec` whose `num_layers` agrees with `widths`.
    pub fn new(widths: Vec<usize>, activation: impl Into<String>, learning_rate: f32) -> Self {
        Self {
            num_layers: widths.len(),
            widths,
            activation: activation.into(),
            learning_rate,
        }
    }

    /// Returns the total amount of weights a network built from this spec has.
    pub fn num_weights(&self) -> usize {
        self.widths.windows(2).map(|w| w[0] * w[1]).sum()
    }

    /// Checks the widths and learning rate, then resolves the activation function.
    ///
    /// # Returns
    /// The hidden activation or the first configuration error found.
    pub(crate) fn validate(&self) -> Result<ActFn> {
        if self.widths.len() != self.num_layers {
            return Err(MlErr::LayerCountMismatch {
                got: self.widths.len(),
                expected: self.num_layers,
            });
        }

        if self.num_layers < 2 {
            return Err(MlErr::InvalidConfig(
                "a network needs at least an input and an output layer",
            ));
        }

        if self.widths.contains(&0) {
            return Err(MlErr::InvalidConfig("every layer must have at least one node"));
        }

        validate_learning_rate(self.learning_rate)?;
        self.activation.parse()
    }
}

pub(crate) fn validate_learning_rate(learning_rate: f32) -> Result<()> {
    if !learning_rate.is_finite() || learning_rate <= 0. {
        return Err(MlErr::InvalidConfig(
            "the learning rate must be finite and positive",
        ));
    }

    Ok(())
}

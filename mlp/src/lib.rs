//! A feed-forward classifier trained one sample at a time.
//!
//! - `arch`: activations, layers and the `Network` itself.
//! - `initialization`: generators of the initial weights.
//! - `training`: the epoch loop and its loss metric.
//! - `evaluation`: arg-max prediction and accuracy.
//! - `persistence`: text serialization of weight matrices.

pub mod arch;
pub mod error;
pub mod evaluation;
pub mod initialization;
pub mod persistence;
pub mod training;

pub use arch::{Network, NetworkSpec};
pub use error::{MlErr, Result};
pub use evaluation::{argmax, score};
pub use training::Trainer;

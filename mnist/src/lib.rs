//! Trains the `mlp` classifier on MNIST once per configured hidden activation, exporting the
//! weights and loss curve of every run.

pub mod config;
pub mod data;
mod error;
pub mod report;
pub mod session;

pub use config::{RunConfig, RunSpec, load_config};
pub use error::{Result, RunErr};
pub use session::{RunSummary, Session};

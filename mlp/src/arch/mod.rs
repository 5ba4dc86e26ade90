pub mod activations;
pub mod layers;
mod network;
mod spec;

pub use network::Network;
pub use spec::NetworkSpec;

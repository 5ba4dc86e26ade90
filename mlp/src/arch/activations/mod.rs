mod act_fn;
mod linear;
mod relu;
mod sigmoid;
mod softmax;
mod tanh;

pub use act_fn::ActFn;
pub use linear::Linear;
pub use relu::Relu;
pub use sigmoid::Sigmoid;
pub use softmax::{SOFTMAX_GRAD_SCALE, Softmax};
pub use tanh::Tanh;

mod encoding;
mod loss;
mod trainer;

pub use encoding::one_hot;
pub use loss::{CrossEntropy, LossFn};
pub use trainer::Trainer;

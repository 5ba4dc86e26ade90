use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::NormalError;

/// The result type of the `RandParamGen` constructors.
pub type Result<T> = std::result::Result<T, RandErr>;

/// The normal distribution a `RandParamGen` was asked to sample from is invalid.
#[derive(Debug, Clone)]
pub struct RandErr(NormalError);

impl From<NormalError> for RandErr {
    fn from(value: NormalError) -> Self {
        Self(value)
    }
}

impl Display for RandErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid weight initialization: {}", self.0)
    }
}

impl Error for RandErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use ndarray::ShapeError;

/// The result type used in the entire engine.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The engine's error type.
#[derive(Debug)]
pub enum MlErr {
    /// The activation name is not one of the recognized functions.
    UnknownActivation(String),
    /// The width list doesn't have one entry per layer.
    LayerCountMismatch {
        got: usize,
        expected: usize,
    },
    /// A configuration value is out of its valid domain.
    InvalidConfig(&'static str),
    /// The parameter generator ran dry before the layer's weights were filled.
    ParamGenExhausted {
        layer: usize,
        got: usize,
        expected: usize,
    },
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    Shape(ShapeError),
    InvalidLabel {
        label: usize,
        num_labels: usize,
    },
    EmptyDataset,
    MalformedMatrix {
        line: usize,
        msg: String,
    },
    Io(io::Error),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::UnknownActivation(name) => write!(
                f,
                "unknown activation function '{name}', expected one of: relu, sigmoid, tanh, linear"
            ),
            MlErr::LayerCountMismatch { got, expected } => write!(
                f,
                "the network declares {expected} layers but {got} widths were given"
            ),
            MlErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            MlErr::ParamGenExhausted {
                layer,
                got,
                expected,
            } => write!(
                f,
                "the parameter generator was exhausted at layer {layer}, got {got} of the expected {expected} weights"
            ),
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "size mismatch for {what}: got {got}, expected {expected}"),
            MlErr::Shape(e) => write!(f, "shape error: {e}"),
            MlErr::InvalidLabel { label, num_labels } => write!(
                f,
                "label {label} is out of range for a classifier with {num_labels} labels"
            ),
            MlErr::EmptyDataset => write!(f, "the dataset has no samples"),
            MlErr::MalformedMatrix { line, msg } => {
                write!(f, "malformed weight matrix at line {line}: {msg}")
            }
            MlErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Shape(e) => Some(e),
            MlErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for MlErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<io::Error> for MlErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

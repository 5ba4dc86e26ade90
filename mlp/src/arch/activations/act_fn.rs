use std::{fmt, str::FromStr};

use ndarray::{Array1, ArrayView1};

use super::{Linear, Relu, Sigmoid, Tanh};
use crate::MlErr;

/// The activation shared by every hidden layer of a network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActFn {
    Relu(Relu),
    Sigmoid(Sigmoid),
    Tanh(Tanh),
    Linear(Linear),
}

impl ActFn {
    pub fn relu() -> Self {
        Self::Relu(Relu::new())
    }

    pub fn sigmoid() -> Self {
        Self::Sigmoid(Sigmoid::new())
    }

    pub fn tanh(a: f32, b: f32) -> Self {
        Self::Tanh(Tanh::new(a, b))
    }

    pub fn linear(m: f32, c: f32) -> Self {
        Self::Linear(Linear::new(m, c))
    }

    pub fn f(&self, x: f32) -> f32 {
        match self {
            Self::Relu(a) => a.f(x),
            Self::Sigmoid(a) => a.f(x),
            Self::Tanh(a) => a.f(x),
            Self::Linear(a) => a.f(x),
        }
    }

    pub fn df(&self, x: f32) -> f32 {
        match self {
            Self::Relu(a) => a.df(x),
            Self::Sigmoid(a) => a.df(x),
            Self::Tanh(a) => a.df(x),
            Self::Linear(a) => a.df(x),
        }
    }

    /// Applies the function elementwise.
    pub fn value(&self, z: ArrayView1<f32>) -> Array1<f32> {
        z.mapv(|z| self.f(z))
    }

    /// Applies the derivative elementwise.
    pub fn grad(&self, x: ArrayView1<f32>) -> Array1<f32> {
        x.mapv(|x| self.df(x))
    }

    /// The canonical name, as accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Relu(_) => "relu",
            Self::Sigmoid(_) => "sigmoid",
            Self::Tanh(_) => "tanh",
            Self::Linear(_) => "linear",
        }
    }
}

impl FromStr for ActFn {
    type Err = MlErr;

    /// Parses an activation name. `logistic` and `identity` are accepted as aliases of
    /// `sigmoid` and `linear`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relu" => Ok(Self::relu()),
            "sigmoid" | "logistic" => Ok(Self::sigmoid()),
            "tanh" => Ok(Self::Tanh(Default::default())),
            "linear" | "identity" => Ok(Self::Linear(Default::default())),
            other => Err(MlErr::UnknownActivation(other.to_string())),
        }
    }
}

impl fmt::Display for ActFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use std::vec;

use super::ParamGen;

/// A parameter generator that hands out a fixed sequence of values, in order.
#[derive(Debug, Clone)]
pub struct ConstParamGen {
    values: vec::IntoIter<f32>,
}

impl ConstParamGen {
    /// Creates a `ConstParamGen` that generates `value` up to `limit` times.
    pub fn new(value: f32, limit: usize) -> Self {
        Self::from_values(vec![value; limit])
    }

    /// Creates a `ConstParamGen` that replays `values`. Networks consume them layer by layer,
    /// each weight matrix in row-major order.
    pub fn from_values(values: Vec<f32>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }
}

impl ParamGen for ConstParamGen {
    fn sample(&mut self, n: usize) -> Option<Vec<f32>> {
        if self.values.as_slice().is_empty() {
            return None;
        }

        Some(self.values.by_ref().take(n).collect())
    }
}

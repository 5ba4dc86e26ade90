use ndarray::Array1;

use crate::{MlErr, Result};

/// Encodes `label` as a vector of `num_labels` zeros with a one at the label's index.
pub fn one_hot(label: usize, num_labels: usize) -> Result<Array1<f32>> {
    if label >= num_labels {
        return Err(MlErr::InvalidLabel { label, num_labels });
    }

    let mut target = Array1::zeros(num_labels);
    target[label] = 1.;
    Ok(target)
}

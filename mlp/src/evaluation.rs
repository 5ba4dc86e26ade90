use ndarray::{ArrayView1, ArrayView2, Axis};

use crate::{MlErr, Result, arch::Network};

/// Returns the index of the largest value, the first one on ties. A `NaN` beats every number,
/// so the first `NaN` is returned if there is any. An empty vector yields `0`.
pub fn argmax(v: ArrayView1<f32>) -> usize {
    if let Some(i) = v.iter().position(|v| v.is_nan()) {
        return i;
    }

    let mut best = 0;
    for (i, &value) in v.iter().enumerate().skip(1) {
        if value > v[best] {
            best = i;
        }
    }

    best
}

/// Classifies every row of `x` and compares the prediction to its label.
///
/// # Returns
/// The fraction of rows whose arg-max matches the label, in `[0, 1]`.
pub fn score(network: &mut Network, x: ArrayView2<f32>, y: ArrayView1<usize>) -> Result<f32> {
    if x.nrows() != y.len() {
        return Err(MlErr::SizeMismatch {
            what: "labels",
            got: y.len(),
            expected: x.nrows(),
        });
    }

    if x.nrows() == 0 {
        return Err(MlErr::EmptyDataset);
    }

    let mut hits = 0;
    for (row, &label) in x.axis_iter(Axis(0)).zip(y) {
        let y_pred = network.forward(row)?;
        if argmax(y_pred) == label {
            hits += 1;
        }
    }

    Ok(hits as f32 / x.nrows() as f32)
}

use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use ndarray::{ArrayView1, ArrayView2, Axis};

use super::{CrossEntropy, LossFn, one_hot};
use crate::{MlErr, Result, arch::Network, persistence};

/// Drives the training of a `Network` over a labeled dataset.
///
/// Samples are visited in the given order on every epoch, shuffling is up to the caller.
#[derive(Debug, Clone)]
pub struct Trainer<L: LossFn = CrossEntropy> {
    batch_size: NonZeroUsize,
    epochs: usize,
    num_labels: usize,
    loss_fn: L,
    export_dir: Option<PathBuf>,
}

impl Trainer {
    /// Creates a new `Trainer` measuring the cross-entropy loss.
    ///
    /// # Arguments
    /// * `batch_size` - The amount of samples per weight update.
    /// * `epochs` - The amount of full passes over the dataset.
    /// * `num_labels` - The amount of classes, must match the network's output width.
    pub fn new(batch_size: NonZeroUsize, epochs: usize, num_labels: usize) -> Self {
        Self::with_loss(batch_size, epochs, num_labels, CrossEntropy::new())
    }
}

impl<L: LossFn> Trainer<L> {
    /// Creates a new `Trainer` with a custom loss metric. The metric is only reported, the
    /// network's backward pass doesn't depend on it.
    pub fn with_loss(
        batch_size: NonZeroUsize,
        epochs: usize,
        num_labels: usize,
        loss_fn: L,
    ) -> Self {
        Self {
            batch_size,
            epochs,
            num_labels,
            loss_fn,
            export_dir: None,
        }
    }

    /// Makes `fit` write the network's weights into `dir` once training finishes.
    pub fn export_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    pub fn export_dir(&self) -> Option<&Path> {
        self.export_dir.as_deref()
    }

    /// Trains `network` for the configured amount of epochs.
    ///
    /// The weights are updated on every `batch_size`-th sample of an epoch. The batch counter
    /// restarts with each epoch, so the steps accumulated by a trailing partial batch are
    /// carried into the next epoch's first update.
    ///
    /// # Arguments
    /// * `network` - The network to train.
    /// * `x` - The features, one sample per row.
    /// * `y` - The label of each sample.
    ///
    /// # Returns
    /// The mean loss of each epoch.
    pub fn fit(
        &self,
        network: &mut Network,
        x: ArrayView2<f32>,
        y: ArrayView1<usize>,
    ) -> Result<Vec<f32>> {
        self.validate(network, x, y)?;

        let n = x.nrows();
        let batch_size = self.batch_size;
        let mut losses = Vec::with_capacity(self.epochs);

        for epoch in 0..self.epochs {
            let mut total_loss = 0.;
            let mut non_finite = 0;
            let mut batch_iter = 0;

            for (row, &label) in x.axis_iter(Axis(0)).zip(y) {
                batch_iter += 1;
                let target = one_hot(label, self.num_labels)?;

                let y_pred = network.forward(row)?;
                let loss = self.loss_fn.loss(y_pred, target.view());
                if !loss.is_finite() {
                    non_finite += 1;
                }
                total_loss += loss;

                let apply_update = batch_iter == batch_size.get();
                if apply_update {
                    batch_iter = 0;
                }

                network.backward(target.view(), apply_update, batch_size)?;
            }

            if non_finite > 0 {
                warn!("epoch {epoch}: {non_finite} of {n} samples had a non-finite loss");
            }

            let loss = total_loss / n as f32;
            debug!(epoch = epoch, loss = loss; "epoch finished");
            losses.push(loss);
        }

        info!(
            "trained {} network for {} epochs, final loss {:?}",
            network.act_fn(),
            self.epochs,
            losses.last()
        );

        if let Some(dir) = &self.export_dir {
            persistence::save_weights(network, dir)?;
            debug!("weights exported to {}", dir.display());
        }

        Ok(losses)
    }

    fn validate(&self, network: &Network, x: ArrayView2<f32>, y: ArrayView1<usize>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        let widths = network.widths();
        let (input, output) = (widths[0], widths[widths.len() - 1]);

        if self.num_labels != output {
            return Err(MlErr::SizeMismatch {
                what: "number of labels",
                got: self.num_labels,
                expected: output,
            });
        }

        if x.ncols() != input {
            return Err(MlErr::SizeMismatch {
                what: "features",
                got: x.ncols(),
                expected: input,
            });
        }

        if self.epochs > 0 && x.nrows() == 0 {
            return Err(MlErr::EmptyDataset);
        }

        if let Some(&label) = y.iter().find(|&&label| label >= self.num_labels) {
            return Err(MlErr::InvalidLabel {
                label,
                num_labels: self.num_labels,
            });
        }

        Ok(())
    }
}

use std::path::Path;

use mlp::MlErr;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, s};
use rand::{Rng, seq::SliceRandom};

use super::idx;
use crate::Result;

/// A labeled dataset held in memory, one sample per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f32>,
    y: Array1<usize>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Returns
    /// An error if there isn't exactly one label per row of `x`.
    pub fn new(x: Array2<f32>, y: Array1<usize>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "labels",
                got: y.len(),
                expected: x.nrows(),
            }
            .into());
        }

        Ok(Self { x, y })
    }

    /// Loads a dataset from a pair of IDX files.
    ///
    /// # Arguments
    /// * `images` - The `idx3-ubyte` image file.
    /// * `labels` - The `idx1-ubyte` label file.
    /// * `scale_pixels` - Whether to map the intensities to `[0, 1]`.
    pub fn load(images: &Path, labels: &Path, scale_pixels: bool) -> Result<Self> {
        let x = idx::load_images(images, scale_pixels)?;
        let y = idx::load_labels(labels)?;
        Self::new(x, y)
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn num_features(&self) -> usize {
        self.x.ncols()
    }

    /// Permutes the samples, keeping every row paired with its label.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<_> = (0..self.len()).collect();
        order.shuffle(rng);

        self.x = self.x.select(Axis(0), &order);
        self.y = self.y.select(Axis(0), &order);
    }

    /// Keeps the first `n` samples, or all of them if there are fewer.
    pub fn truncate(&mut self, n: usize) {
        let n = n.min(self.len());
        self.x = self.x.slice(s![..n, ..]).to_owned();
        self.y = self.y.slice(s![..n]).to_owned();
    }

    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, usize> {
        self.y.view()
    }
}

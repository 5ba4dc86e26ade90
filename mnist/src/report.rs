use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use mlp::arch::activations::ActFn;
use serde::{Deserialize, Serialize};

use crate::Result;

/// The per-epoch training loss of one run, ready to be plotted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossCurve {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub losses: Vec<f32>,
}

impl LossCurve {
    pub fn new(act_fn: ActFn, losses: Vec<f32>) -> Self {
        Self {
            title: format!("Custom {act_fn}"),
            x_label: "Epochs".into(),
            y_label: "Training error".into(),
            losses,
        }
    }

    /// Returns the path of `act_fn`'s curve inside `dir`.
    pub fn path(dir: &Path, act_fn: ActFn) -> PathBuf {
        dir.join(format!("custom_{}.json", act_fn.name()))
    }

    /// Writes the curve as pretty JSON, creating `dir` if needed.
    ///
    /// # Returns
    /// The path of the written file.
    pub fn write(&self, dir: &Path, act_fn: ActFn) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let path = Self::path(dir, act_fn);
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, self)?;

        Ok(path)
    }
}

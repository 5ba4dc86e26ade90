use std::{
    env,
    fs::File,
    io::BufReader,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use log::info;
use mlp::arch::activations::ActFn;
use serde::{Deserialize, Serialize};

use crate::{Result, RunErr};

/// The environment variable holding the config path when none is given as an argument.
pub const CONFIG_ENV: &str = "MNIST_CONFIG";

/// One training run: a fresh network with the given hidden activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    pub activation: String,
    pub epochs: usize,
}

impl RunSpec {
    pub fn new(activation: impl Into<String>, epochs: usize) -> Self {
        Self {
            activation: activation.into(),
            epochs,
        }
    }
}

/// The experiment's configuration, every missing field takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub train_images: PathBuf,
    pub train_labels: PathBuf,
    pub test_images: PathBuf,
    pub test_labels: PathBuf,
    /// The amount of training samples kept after shuffling.
    pub train_limit: usize,
    pub test_limit: usize,
    /// The widths of the hidden layers, the input and output widths come from the data.
    pub hidden: Vec<usize>,
    pub num_labels: usize,
    pub learning_rate: f32,
    pub batch_size: usize,
    /// The standard deviation of the zero-mean normal the weights are drawn from.
    pub init_std_dev: f32,
    pub scale_pixels: bool,
    pub runs: Vec<RunSpec>,
    pub weights_dir: PathBuf,
    pub plots_dir: PathBuf,
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            train_images: "images/train-images.idx3-ubyte".into(),
            train_labels: "images/train-labels.idx1-ubyte".into(),
            test_images: "images/t10k-images.idx3-ubyte".into(),
            test_labels: "images/t10k-labels.idx1-ubyte".into(),
            train_limit: 1000,
            test_limit: 1000,
            hidden: vec![256, 128, 64],
            num_labels: 10,
            learning_rate: 0.1,
            batch_size: 100,
            init_std_dev: 0.01,
            scale_pixels: false,
            runs: vec![
                RunSpec::new("relu", 100),
                RunSpec::new("sigmoid", 200),
                RunSpec::new("linear", 10),
                RunSpec::new("tanh", 500),
            ],
            weights_dir: "weights".into(),
            plots_dir: "plots".into(),
            seed: None,
        }
    }
}

impl RunConfig {
    /// Reads and validates a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is in its valid domain.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(RunErr::InvalidConfig(msg.to_string()));

        if self.runs.is_empty() {
            return invalid("at least one run is needed");
        }

        if self.batch_size == 0 {
            return invalid("the batch size must be positive");
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0. {
            return invalid("the learning rate must be finite and positive");
        }

        if !self.init_std_dev.is_finite() || self.init_std_dev < 0. {
            return invalid("the standard deviation must be finite and non-negative");
        }

        if self.num_labels == 0 || self.hidden.contains(&0) {
            return invalid("every layer must have at least one node");
        }

        for run in &self.runs {
            run.activation.parse::<ActFn>()?;
        }

        Ok(())
    }

    pub fn batch_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.batch_size)
            .ok_or_else(|| RunErr::InvalidConfig("the batch size must be positive".into()))
    }

    /// Returns the widths of a network taking `num_features` inputs.
    pub fn layer_widths(&self, num_features: usize) -> Vec<usize> {
        let mut widths = Vec::with_capacity(self.hidden.len() + 2);
        widths.push(num_features);
        widths.extend(&self.hidden);
        widths.push(self.num_labels);
        widths
    }
}

/// Resolves the config: from the file at `arg`, else from the file named by `MNIST_CONFIG`,
/// else the defaults.
pub fn load_config(arg: Option<String>) -> Result<RunConfig> {
    match arg.or_else(|| env::var(CONFIG_ENV).ok()) {
        Some(path) => {
            info!("reading config from {path}");
            RunConfig::from_file(Path::new(&path))
        }
        None => {
            info!("no config given, using the defaults");
            Ok(RunConfig::default())
        }
    }
}

use log::{debug, info};
use mlp::{
    Network, NetworkSpec, Trainer, arch::activations::ActFn, initialization::RandParamGen, score,
};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{Result, RunConfig, RunSpec, data::Dataset, report::LossCurve};

/// The outcome of one training run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub activation: String,
    pub epochs: usize,
    /// The mean loss of the last epoch, if any epoch ran.
    pub final_loss: Option<f32>,
    /// The fraction of test samples classified correctly.
    pub accuracy: f32,
}

/// A set of training runs sharing the same data.
///
/// The training set is shuffled once, before being truncated, so every run sees the same
/// samples in the same order.
pub struct Session {
    config: RunConfig,
    train: Dataset,
    test: Dataset,
    rng: StdRng,
}

impl Session {
    /// Creates a new `Session`, loading the datasets named by `config`.
    pub fn new(config: RunConfig) -> Result<Self> {
        config.validate()?;

        let train = Dataset::load(
            &config.train_images,
            &config.train_labels,
            config.scale_pixels,
        )?;
        let test = Dataset::load(
            &config.test_images,
            &config.test_labels,
            config.scale_pixels,
        )?;
        info!(
            "loaded {} training and {} test samples",
            train.len(),
            test.len()
        );

        Self::with_data(config, train, test)
    }

    /// Creates a new `Session` over already loaded datasets.
    ///
    /// # Arguments
    /// * `config` - The run configuration, its dataset paths are ignored.
    /// * `train` - The training set, shuffled and truncated to `train_limit`.
    /// * `test` - The test set, truncated to `test_limit`.
    pub fn with_data(config: RunConfig, mut train: Dataset, mut test: Dataset) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        train.shuffle(&mut rng);
        train.truncate(config.train_limit);
        test.truncate(config.test_limit);

        Ok(Self {
            config,
            train,
            test,
            rng,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn train_set(&self) -> &Dataset {
        &self.train
    }

    pub fn test_set(&self) -> &Dataset {
        &self.test
    }

    /// Runs every configured experiment, in order.
    pub fn run(&mut self) -> Result<Vec<RunSummary>> {
        let runs = self.config.runs.clone();
        runs.iter().map(|run| self.run_one(run)).collect()
    }

    /// Trains a fresh network, scores it on the test set and writes its weights and loss curve.
    pub fn run_one(&mut self, run: &RunSpec) -> Result<RunSummary> {
        let act_fn: ActFn = run.activation.parse()?;
        let config = &self.config;

        let widths = config.layer_widths(self.train.num_features());
        let spec = NetworkSpec::new(widths, act_fn.name(), config.learning_rate);
        let param_gen = RandParamGen::normal(
            &mut self.rng,
            spec.num_weights(),
            0.,
            config.init_std_dev,
        )?;
        let mut network = Network::new(&spec, param_gen)?;

        info!("starting {act_fn}...");
        let trainer = Trainer::new(config.batch_size()?, run.epochs, config.num_labels)
            .export_to(&config.weights_dir);
        let losses = trainer.fit(&mut network, self.train.x(), self.train.y())?;

        let accuracy = score(&mut network, self.test.x(), self.test.y())?;
        info!(activation = act_fn.name(), accuracy = accuracy; "run finished");

        let final_loss = losses.last().copied();
        let path = LossCurve::new(act_fn, losses).write(&config.plots_dir, act_fn)?;
        debug!("loss curve written to {}", path.display());

        Ok(RunSummary {
            activation: act_fn.name().to_string(),
            epochs: run.epochs,
            final_loss,
            accuracy,
        })
    }
}

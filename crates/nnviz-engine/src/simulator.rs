//! Training-simulation tick.
//!
//! Nothing is trained. Each tick produces the next epoch's loss and accuracy
//! from an exponential approach toward fixed targets plus a little noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use nnviz_model::TrainingState;

/// Shape of the simulated learning curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    pub initial_loss: f64,
    pub target_loss: f64,
    pub initial_accuracy: f64,
    pub target_accuracy: f64,
    /// Per-epoch exponential decay rate toward the targets.
    pub decay: f64,
    /// Half-width of the uniform noise added to both curves.
    pub noise: f64,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            initial_loss: 1.0,
            target_loss: 0.05,
            initial_accuracy: 0.5,
            target_accuracy: 0.98,
            decay: 0.1,
            noise: 0.02,
        }
    }
}

/// Values for one simulated epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpochProgress {
    pub epoch: u32,
    pub loss: f64,
    pub accuracy: f64,
}

/// What the driver should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Record this epoch.
    Progress(EpochProgress),
    /// The epoch ceiling is reached; stop training.
    Finished,
    /// Training is not running.
    Idle,
}

/// Produces simulated epochs.
#[derive(Debug)]
pub struct TrainingSimulator {
    settings: SimulatorSettings,
    rng: StdRng,
}

impl TrainingSimulator {
    pub fn new(settings: SimulatorSettings, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { settings, rng }
    }

    pub fn settings(&self) -> &SimulatorSettings {
        &self.settings
    }

    /// Computes the next step for `training`.
    ///
    /// Never yields an epoch beyond `total_epochs`.
    pub fn tick(&mut self, training: &TrainingState) -> Tick {
        if !training.is_training {
            return Tick::Idle;
        }
        if training.current_epoch >= training.total_epochs {
            return Tick::Finished;
        }
        let epoch = training.current_epoch + 1;
        let progress = self.epoch(epoch);
        tracing::trace!(
            epoch,
            loss = progress.loss,
            accuracy = progress.accuracy,
            "simulated epoch"
        );
        Tick::Progress(progress)
    }

    /// Loss and accuracy for `epoch`, with fresh noise.
    pub fn epoch(&mut self, epoch: u32) -> EpochProgress {
        let remaining = (-self.settings.decay * f64::from(epoch)).exp();
        let loss_noise = self.noise();
        let accuracy_noise = self.noise();
        let s = &self.settings;
        let loss = s.target_loss + (s.initial_loss - s.target_loss) * remaining + loss_noise;
        let accuracy =
            s.target_accuracy - (s.target_accuracy - s.initial_accuracy) * remaining + accuracy_noise;
        EpochProgress {
            epoch,
            loss: loss.max(0.0),
            accuracy: accuracy.clamp(0.0, 1.0),
        }
    }

    fn noise(&mut self) -> f64 {
        let half = self.settings.noise.abs();
        if !half.is_finite() || half == 0.0 {
            0.0
        } else {
            self.rng.random_range(-half..=half)
        }
    }
}

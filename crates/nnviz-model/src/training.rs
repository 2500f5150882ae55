//! Training progress and training configuration.

use serde::{Deserialize, Serialize};

use crate::enums::{LossFunction, Optimizer};

/// Progress of the simulated training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingState {
    pub is_training: bool,
    pub current_epoch: u32,
    pub total_epochs: u32,
    pub loss: f64,
    pub accuracy: f64,
    pub loss_history: Vec<f64>,
    pub accuracy_history: Vec<f64>,
}

impl TrainingState {
    /// Zeroed state with the given epoch ceiling.
    pub fn reset(total_epochs: u32) -> Self {
        Self {
            total_epochs,
            ..Self::default()
        }
    }

    /// Records one epoch. No clamping against `total_epochs`.
    pub fn record(&mut self, epoch: u32, loss: f64, accuracy: f64) {
        self.current_epoch = epoch;
        self.loss = loss;
        self.accuracy = accuracy;
        self.loss_history.push(loss);
        self.accuracy_history.push(accuracy);
    }

    pub fn is_complete(&self) -> bool {
        self.current_epoch >= self.total_epochs
    }
}

/// Hyperparameters written into the generated program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub learning_rate: f64,
    pub batch_size: u32,
    pub epochs: u32,
    pub optimizer: Optimizer,
    pub loss_function: LossFunction,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            batch_size: 32,
            epochs: 50,
            optimizer: Optimizer::Adam,
            loss_function: LossFunction::BinaryCrossentropy,
        }
    }
}

impl NetworkConfig {
    /// Shallow merge. Values are taken as given.
    pub fn merge(&mut self, patch: &NetworkConfigPatch) {
        if let Some(learning_rate) = patch.learning_rate {
            self.learning_rate = learning_rate;
        }
        if let Some(batch_size) = patch.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(epochs) = patch.epochs {
            self.epochs = epochs;
        }
        if let Some(optimizer) = patch.optimizer {
            self.optimizer = optimizer;
        }
        if let Some(loss_function) = patch.loss_function {
            self.loss_function = loss_function;
        }
    }
}

/// Partial [`NetworkConfig`]; `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfigPatch {
    pub learning_rate: Option<f64>,
    pub batch_size: Option<u32>,
    pub epochs: Option<u32>,
    pub optimizer: Option<Optimizer>,
    pub loss_function: Option<LossFunction>,
}

impl NetworkConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

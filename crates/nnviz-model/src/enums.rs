//! Closed sets used throughout the visualizer.
//!
//! Every enum renders to the lowercase token used by the web client and the
//! generated Keras code, and parses back from it case-insensitively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

// =============================================================================
// LAYER KIND
// =============================================================================

/// Kind of a network layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Input,
    Dense,
    Conv2d,
    MaxPool2d,
    AvgPool2d,
    Flatten,
    Dropout,
    BatchNorm,
    Lstm,
    Gru,
    Embedding,
    Attention,
    Output,
}

impl LayerKind {
    /// All kinds in catalog order.
    pub const ALL: [LayerKind; 13] = [
        Self::Input,
        Self::Dense,
        Self::Conv2d,
        Self::MaxPool2d,
        Self::AvgPool2d,
        Self::Flatten,
        Self::Dropout,
        Self::BatchNorm,
        Self::Lstm,
        Self::Gru,
        Self::Embedding,
        Self::Attention,
        Self::Output,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Dense => "dense",
            Self::Conv2d => "conv2d",
            Self::MaxPool2d => "maxpool2d",
            Self::AvgPool2d => "avgpool2d",
            Self::Flatten => "flatten",
            Self::Dropout => "dropout",
            Self::BatchNorm => "batchnorm",
            Self::Lstm => "lstm",
            Self::Gru => "gru",
            Self::Embedding => "embedding",
            Self::Attention => "attention",
            Self::Output => "output",
        }
    }

    /// Whether the kind carries trainable weights in the visualizer's sense.
    pub const fn is_trainable(&self) -> bool {
        matches!(
            self,
            Self::Dense
                | Self::Conv2d
                | Self::BatchNorm
                | Self::Lstm
                | Self::Gru
                | Self::Embedding
                | Self::Attention
                | Self::Output
        )
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownName {
                what: "layer kind",
                value: s.to_string(),
            })
    }
}

// =============================================================================
// ACTIVATION / PADDING
// =============================================================================

/// Activation function attached to a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Linear,
    #[default]
    Relu,
    LeakyRelu,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    pub const ALL: [Activation; 6] = [
        Self::Linear,
        Self::Relu,
        Self::LeakyRelu,
        Self::Sigmoid,
        Self::Tanh,
        Self::Softmax,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Relu => "relu",
            Self::LeakyRelu => "leaky_relu",
            Self::Sigmoid => "sigmoid",
            Self::Tanh => "tanh",
            Self::Softmax => "softmax",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|act| act.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownName {
                what: "activation",
                value: s.to_string(),
            })
    }
}

/// Convolution / pooling border handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    #[default]
    Valid,
    Same,
}

impl Padding {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Same => "same",
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Padding {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "valid" => Ok(Self::Valid),
            "same" => Ok(Self::Same),
            _ => Err(ModelError::UnknownName {
                what: "padding",
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// ARCHITECTURE KIND
// =============================================================================

/// Named architecture family. `Custom` marks a hand-edited network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureKind {
    Perceptron,
    #[default]
    Mlp,
    Cnn,
    Rnn,
    Transformer,
    Gan,
    Autoencoder,
    Custom,
}

impl ArchitectureKind {
    /// Every kind that has a built-in template (everything but `Custom`).
    pub const TEMPLATED: [ArchitectureKind; 7] = [
        Self::Perceptron,
        Self::Mlp,
        Self::Cnn,
        Self::Rnn,
        Self::Transformer,
        Self::Gan,
        Self::Autoencoder,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Perceptron => "perceptron",
            Self::Mlp => "mlp",
            Self::Cnn => "cnn",
            Self::Rnn => "rnn",
            Self::Transformer => "transformer",
            Self::Gan => "gan",
            Self::Autoencoder => "autoencoder",
            Self::Custom => "custom",
        }
    }

    /// Get display name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Perceptron => "Perceptron",
            Self::Mlp => "Multi-Layer Perceptron",
            Self::Cnn => "Convolutional Neural Network",
            Self::Rnn => "Recurrent Neural Network (LSTM)",
            Self::Transformer => "Transformer",
            Self::Gan => "Generative Adversarial Network",
            Self::Autoencoder => "Autoencoder",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for ArchitectureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchitectureKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::TEMPLATED
            .into_iter()
            .chain(std::iter::once(Self::Custom))
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownName {
                what: "architecture",
                value: s.to_string(),
            })
    }
}

// =============================================================================
// TRAINING CONFIG CHOICES
// =============================================================================

/// Optimizer choice for the generated program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Optimizer {
    Sgd,
    #[default]
    Adam,
    Momentum,
}

impl Optimizer {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sgd => "sgd",
            Self::Adam => "adam",
            Self::Momentum => "momentum",
        }
    }
}

impl fmt::Display for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Optimizer {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sgd" => Ok(Self::Sgd),
            "adam" => Ok(Self::Adam),
            "momentum" => Ok(Self::Momentum),
            _ => Err(ModelError::UnknownName {
                what: "optimizer",
                value: s.to_string(),
            }),
        }
    }
}

/// Loss function choice for the generated program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossFunction {
    Mse,
    #[default]
    BinaryCrossentropy,
    CategoricalCrossentropy,
}

impl LossFunction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mse => "mse",
            Self::BinaryCrossentropy => "binary_crossentropy",
            Self::CategoricalCrossentropy => "categorical_crossentropy",
        }
    }
}

impl fmt::Display for LossFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LossFunction {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mse" => Ok(Self::Mse),
            "binary_crossentropy" => Ok(Self::BinaryCrossentropy),
            "categorical_crossentropy" => Ok(Self::CategoricalCrossentropy),
            _ => Err(ModelError::UnknownName {
                what: "loss function",
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// PRESENTATION CHOICES
// =============================================================================

/// Camera preset of the 3D scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Perspective,
    Top,
    Side,
}

/// Tabs of the right-hand panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelTab {
    #[default]
    Parameters,
    Code,
    Theory,
}

/// Color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_kind_round_trips_through_str() {
        for kind in LayerKind::ALL {
            assert_eq!(kind.as_str().parse::<LayerKind>().unwrap(), kind);
        }
        assert_eq!("Conv2D".parse::<LayerKind>().unwrap(), LayerKind::Conv2d);
    }

    #[test]
    fn unknown_architecture_is_an_error() {
        let err = "resnet".parse::<ArchitectureKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown architecture: 'resnet'");
    }

    #[test]
    fn activation_accepts_dashes() {
        assert_eq!(
            "leaky-relu".parse::<Activation>().unwrap(),
            Activation::LeakyRelu
        );
    }

    #[test]
    fn serde_tokens_match_as_str() {
        let json = serde_json::to_string(&LossFunction::CategoricalCrossentropy).unwrap();
        assert_eq!(json, "\"categorical_crossentropy\"");
        let json = serde_json::to_string(&LayerKind::MaxPool2d).unwrap();
        assert_eq!(json, "\"maxpool2d\"");
    }
}

//! Static layer catalog: display names, descriptions and defaults per kind.

use nnviz_model::{LayerKind, LayerParams};

/// Palette grouping shown in the layer picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerCategory {
    Core,
    Convolution,
    Regularization,
    Recurrent,
    Sequence,
}

impl LayerCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Convolution => "convolution",
            Self::Regularization => "regularization",
            Self::Recurrent => "recurrent",
            Self::Sequence => "sequence",
        }
    }
}

/// Catalog entry for one layer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSpec {
    pub kind: LayerKind,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: LayerCategory,
}

impl LayerSpec {
    /// Default parameters for this kind.
    pub fn default_params(&self) -> LayerParams {
        LayerParams::default_for(self.kind)
    }
}

const LAYER_SPECS: [LayerSpec; 13] = [
    LayerSpec {
        kind: LayerKind::Input,
        display_name: "Input",
        description: "Entry point that fixes the shape of one sample.",
        category: LayerCategory::Core,
    },
    LayerSpec {
        kind: LayerKind::Dense,
        display_name: "Dense",
        description: "Fully connected layer: every input feeds every unit.",
        category: LayerCategory::Core,
    },
    LayerSpec {
        kind: LayerKind::Conv2d,
        display_name: "Conv2D",
        description: "Slides learned filters over a 2D feature map.",
        category: LayerCategory::Convolution,
    },
    LayerSpec {
        kind: LayerKind::MaxPool2d,
        display_name: "MaxPooling2D",
        description: "Keeps the largest value in each pooling window.",
        category: LayerCategory::Convolution,
    },
    LayerSpec {
        kind: LayerKind::AvgPool2d,
        display_name: "AveragePooling2D",
        description: "Averages each pooling window.",
        category: LayerCategory::Convolution,
    },
    LayerSpec {
        kind: LayerKind::Flatten,
        display_name: "Flatten",
        description: "Reshapes a feature map into a vector.",
        category: LayerCategory::Core,
    },
    LayerSpec {
        kind: LayerKind::Dropout,
        display_name: "Dropout",
        description: "Randomly zeroes a fraction of activations while training.",
        category: LayerCategory::Regularization,
    },
    LayerSpec {
        kind: LayerKind::BatchNorm,
        display_name: "BatchNormalization",
        description: "Normalizes activations with running batch statistics.",
        category: LayerCategory::Regularization,
    },
    LayerSpec {
        kind: LayerKind::Lstm,
        display_name: "LSTM",
        description: "Gated recurrent cell with a separate long-term memory.",
        category: LayerCategory::Recurrent,
    },
    LayerSpec {
        kind: LayerKind::Gru,
        display_name: "GRU",
        description: "Gated recurrent cell with merged update and reset gates.",
        category: LayerCategory::Recurrent,
    },
    LayerSpec {
        kind: LayerKind::Embedding,
        display_name: "Embedding",
        description: "Maps token ids to dense vectors.",
        category: LayerCategory::Sequence,
    },
    LayerSpec {
        kind: LayerKind::Attention,
        display_name: "MultiHeadAttention",
        description: "Lets every position attend to every other position.",
        category: LayerCategory::Sequence,
    },
    LayerSpec {
        kind: LayerKind::Output,
        display_name: "Output",
        description: "Final dense layer producing the prediction.",
        category: LayerCategory::Core,
    },
];

/// All catalog entries in picker order.
pub fn all_specs() -> &'static [LayerSpec] {
    &LAYER_SPECS
}

/// Catalog entry for `kind`.
pub fn spec(kind: LayerKind) -> &'static LayerSpec {
    // LAYER_SPECS is laid out in LayerKind::ALL order.
    let index = LayerKind::ALL
        .iter()
        .position(|candidate| *candidate == kind)
        .unwrap_or_default();
    &LAYER_SPECS[index]
}

/// Display label used as a new layer's `name`.
pub fn display_name(kind: LayerKind) -> &'static str {
    spec(kind).display_name
}

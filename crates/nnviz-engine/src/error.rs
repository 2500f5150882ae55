use thiserror::Error;

use nnviz_model::LayerKind;

/// Errors raised by shape inference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The incoming tensor has the wrong rank for this layer.
    #[error("{kind} expects a rank-{expected} input, got {shape:?}")]
    Rank {
        /// Kind of the consuming layer.
        kind: LayerKind,
        /// Required rank, without the batch dimension.
        expected: usize,
        /// Incoming shape.
        shape: Vec<u32>,
    },

    /// A convolution or pooling window does not fit the input.
    #[error("{kind} window {window} exceeds input size {size}")]
    WindowTooLarge {
        /// Kind of the consuming layer.
        kind: LayerKind,
        /// Kernel or pool size.
        window: u32,
        /// Spatial extent of the input.
        size: u32,
    },

    /// Flattening the input does not fit a `u32` width.
    #[error("{kind} output width overflows for input {shape:?}")]
    ShapeOverflow {
        /// Kind of the consuming layer.
        kind: LayerKind,
        /// Incoming shape.
        shape: Vec<u32>,
    },

    /// The first layer must be an input layer.
    #[error("network must start with an input layer, found {0}")]
    MissingInput(LayerKind),
}

pub type Result<T> = std::result::Result<T, EngineError>;

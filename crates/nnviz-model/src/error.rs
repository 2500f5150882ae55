use thiserror::Error;

use crate::enums::LayerKind;

/// Errors raised while building or editing model values.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The parameter name does not exist for this layer kind.
    #[error("{kind} layers have no parameter named '{key}'")]
    UnknownParam {
        /// Kind of the layer being edited.
        kind: LayerKind,
        /// Offending parameter name.
        key: String,
    },

    /// The parameter exists but the value has the wrong shape or range.
    #[error("parameter '{key}' expects {expected}, got {found}")]
    ParamType {
        /// Parameter name.
        key: String,
        /// Human-readable description of what is accepted.
        expected: &'static str,
        /// Rendering of the rejected value.
        found: String,
    },

    /// A string did not name any member of a closed set.
    #[error("unknown {what}: '{value}'")]
    UnknownName {
        /// Which set was searched (e.g. "layer kind").
        what: &'static str,
        /// The unmatched input.
        value: String,
    },

    /// Layer ids must be non-empty.
    #[error("invalid layer id: '{0}'")]
    InvalidLayerId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

use std::path::PathBuf;

use thiserror::Error;

use nnviz_catalog::CatalogError;
use nnviz_model::{ArchitectureKind, LayerId, ModelError};

/// Why a store action was rejected. State is unchanged whenever one is
/// returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// No template is registered for the architecture.
    #[error("no template registered for architecture '{0}'")]
    UnknownTemplate(ArchitectureKind),

    /// No layer has this id.
    #[error("no layer with id '{0}'")]
    UnknownLayer(LayerId),

    /// A layer index is outside the layer list.
    #[error("layer index {index} out of range for {len} layers")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Current number of layers.
        len: usize,
    },

    /// Parameters were rejected by the layer kind.
    #[error("invalid layer parameters: {0}")]
    InvalidParams(#[from] ModelError),

    /// A template failed validation.
    #[error(transparent)]
    InvalidTemplate(#[from] CatalogError),

    /// Settings file could not be read.
    #[error("failed to read settings {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`crate::StoreSettings`].
    #[error("failed to parse settings {path}: {source}")]
    SettingsToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Snapshot serialization failed.
    #[error("failed to serialize snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

use thiserror::Error;

use nnviz_model::ModelError;

/// Errors raised while loading or validating templates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// Template JSON could not be parsed.
    #[error("failed to parse template: {0}")]
    Parse(#[from] serde_json::Error),

    /// A template entry carries parameters its layer kind rejects.
    #[error("template '{template}' layer {index}: {source}")]
    InvalidEntry {
        /// Template name.
        template: String,
        /// Zero-based entry index.
        index: usize,
        /// Underlying parameter error.
        source: ModelError,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

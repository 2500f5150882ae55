//! Store settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use nnviz_engine::SimulatorSettings;
use nnviz_model::ArchitectureKind;

use crate::error::{Result, StoreError};

/// Default distance between adjacent layers along the x axis.
pub const DEFAULT_LAYER_SPACING: f32 = 3.0;

/// Construction-time settings of a [`crate::NetworkStore`].
///
/// Every field has a default, so a settings file only needs the keys it
/// changes:
///
/// ```toml
/// layer_spacing = 4.0
/// seed = 7
///
/// [simulator]
/// noise = 0.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Distance between adjacent layers in scene units.
    pub layer_spacing: f32,
    /// Seed for cosmetic randomness. `None` seeds from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Template loaded when the store is created.
    pub initial_architecture: ArchitectureKind,
    /// Learning-curve shape for the training simulation.
    pub simulator: SimulatorSettings,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            layer_spacing: DEFAULT_LAYER_SPACING,
            seed: None,
            initial_architecture: ArchitectureKind::Mlp,
            simulator: SimulatorSettings::default(),
        }
    }
}

impl StoreSettings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| StoreError::SettingsToml {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text, path)?;
        tracing::debug!(path = %path.display(), "loaded store settings");
        Ok(settings)
    }
}

use serde::{Deserialize, Serialize};

use crate::enums::ArchitectureKind;
use crate::ids::LayerId;
use crate::layer::{Connection, Layer};
use crate::training::{NetworkConfig, TrainingState};
use crate::view::{UiState, VisualizationState};

/// Root state tree. Cross-references between aggregates are ids only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkState {
    pub current_architecture: ArchitectureKind,
    pub layers: Vec<Layer>,
    pub connections: Vec<Connection>,
    pub training: TrainingState,
    pub config: NetworkConfig,
    pub visualization: VisualizationState,
    pub ui: UiState,
}

impl NetworkState {
    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| &layer.id == id)
    }

    pub fn layer_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| &layer.id == id)
    }

    pub fn layer_index(&self, id: &LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| &layer.id == id)
    }

    /// The selected layer, if the selection still resolves.
    pub fn selected_layer(&self) -> Option<&Layer> {
        self.visualization
            .selected_layer_id
            .as_ref()
            .and_then(|id| self.layer(id))
    }
}

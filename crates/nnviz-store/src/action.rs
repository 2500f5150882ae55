//! Serializable store actions.
//!
//! Every mutating store method has an [`Action`] variant so a session can be
//! scripted as a JSON list and replayed with [`crate::NetworkStore::dispatch`].

use serde::{Deserialize, Serialize};

use nnviz_catalog::Template;
use nnviz_model::{
    ArchitectureKind, LayerId, LayerKind, NetworkConfigPatch, PanelTab, ParamPatch, Position,
    Theme, ViewMode,
};

/// Refers to a layer by id or by current index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayerRef {
    Index(usize),
    Id(LayerId),
}

impl From<LayerId> for LayerRef {
    fn from(id: LayerId) -> Self {
        Self::Id(id)
    }
}

impl From<usize> for LayerRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// One store action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    // =========================================================================
    // Structure
    // =========================================================================
    SetArchitecture {
        architecture: ArchitectureKind,
    },
    LoadTemplate {
        template: Template,
    },
    AddLayer {
        kind: LayerKind,
        #[serde(default)]
        params: ParamPatch,
    },
    RemoveLayer {
        layer: LayerRef,
    },
    UpdateLayerParams {
        layer: LayerRef,
        params: ParamPatch,
    },
    ReorderLayers {
        from: usize,
        to: usize,
    },
    ClearNetwork,

    // =========================================================================
    // Training
    // =========================================================================
    StartTraining,
    StopTraining,
    ResetTraining,
    UpdateTrainingProgress {
        epoch: u32,
        loss: f64,
        accuracy: f64,
    },
    UpdateConfig {
        config: NetworkConfigPatch,
    },

    // =========================================================================
    // Visualization
    // =========================================================================
    /// `null` clears the selection.
    SetSelectedLayer {
        layer: Option<LayerRef>,
    },
    SetHoveredLayer {
        layer: Option<LayerRef>,
    },
    ToggleDataFlow,
    ToggleWeights,
    ToggleGradients,
    SetAnimationSpeed {
        speed: f32,
    },
    SetViewMode {
        mode: ViewMode,
    },
    SetCameraPosition {
        position: Position,
    },

    // =========================================================================
    // Panels and tour
    // =========================================================================
    ToggleLeftPanel,
    ToggleRightPanel,
    SetRightPanelTab {
        tab: PanelTab,
    },
    SetTheme {
        theme: Theme,
    },
    StartTour,
    NextTourStep,
    PrevTourStep,
    EndTour,
}

impl Action {
    /// Parses a JSON array of actions.
    pub fn parse_script(text: &str) -> serde_json::Result<Vec<Action>> {
        serde_json::from_str(text)
    }

    /// snake_case name of the action, as used in scripts and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetArchitecture { .. } => "set_architecture",
            Self::LoadTemplate { .. } => "load_template",
            Self::AddLayer { .. } => "add_layer",
            Self::RemoveLayer { .. } => "remove_layer",
            Self::UpdateLayerParams { .. } => "update_layer_params",
            Self::ReorderLayers { .. } => "reorder_layers",
            Self::ClearNetwork => "clear_network",
            Self::StartTraining => "start_training",
            Self::StopTraining => "stop_training",
            Self::ResetTraining => "reset_training",
            Self::UpdateTrainingProgress { .. } => "update_training_progress",
            Self::UpdateConfig { .. } => "update_config",
            Self::SetSelectedLayer { .. } => "set_selected_layer",
            Self::SetHoveredLayer { .. } => "set_hovered_layer",
            Self::ToggleDataFlow => "toggle_data_flow",
            Self::ToggleWeights => "toggle_weights",
            Self::ToggleGradients => "toggle_gradients",
            Self::SetAnimationSpeed { .. } => "set_animation_speed",
            Self::SetViewMode { .. } => "set_view_mode",
            Self::SetCameraPosition { .. } => "set_camera_position",
            Self::ToggleLeftPanel => "toggle_left_panel",
            Self::ToggleRightPanel => "toggle_right_panel",
            Self::SetRightPanelTab { .. } => "set_right_panel_tab",
            Self::SetTheme { .. } => "set_theme",
            Self::StartTour => "start_tour",
            Self::NextTourStep => "next_tour_step",
            Self::PrevTourStep => "prev_tour_step",
            Self::EndTour => "end_tour",
        }
    }
}

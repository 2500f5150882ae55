//! Data model for the neural-network architecture visualizer.

pub mod enums;
pub mod error;
pub mod ids;
pub mod layer;
pub mod params;
pub mod state;
pub mod training;
pub mod view;

pub use enums::{
    Activation, ArchitectureKind, LayerKind, LossFunction, Optimizer, Padding, PanelTab, Theme,
    ViewMode,
};
pub use error::{ModelError, Result};
pub use ids::{ConnectionId, LayerId};
pub use layer::{Connection, Layer, Position};
pub use params::{
    AttentionParams, BatchNormParams, Conv2dParams, DenseParams, DropoutParams, EmbeddingParams,
    InputParams, LayerParams, OutputParams, ParamPatch, ParamValue, PoolParams, RecurrentParams,
};
pub use state::NetworkState;
pub use training::{NetworkConfig, NetworkConfigPatch, TrainingState};
pub use view::{TOUR_STEP_COUNT, UiState, VisualizationState};

//! Layers, their scene positions, and the connections between them.

use serde::{Deserialize, Serialize};

use crate::enums::LayerKind;
use crate::error::Result;
use crate::ids::{ConnectionId, LayerId};
use crate::params::{LayerParams, ParamPatch};

/// Point in the 3D scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One layer of the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    /// Display label, fixed at creation.
    pub name: String,
    pub params: LayerParams,
    /// Cached width for dense layers. Refreshed only by `units` edits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neurons: Option<u32>,
    pub position: Position,
}

impl Layer {
    /// Builds a layer with a fresh id at the origin.
    ///
    /// `neurons` is filled for dense layers only.
    pub fn new(name: impl Into<String>, params: LayerParams) -> Self {
        let neurons = match &params {
            LayerParams::Dense(dense) => Some(dense.units),
            _ => None,
        };
        Self {
            id: LayerId::generate(),
            name: name.into(),
            params,
            neurons,
            position: Position::ORIGIN,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.params.kind()
    }

    /// Merges `patch` into the params and refreshes `neurons` when the patch
    /// carries `units`. Leaves the layer untouched on error.
    pub fn apply_patch(&mut self, patch: &ParamPatch) -> Result<()> {
        self.params.apply(patch)?;
        if patch.contains("units") {
            self.neurons = self.params.units();
        }
        Ok(())
    }
}

/// Directed edge between two adjacent layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from_layer_id: LayerId,
    pub to_layer_id: LayerId,
    /// Cosmetic weight in [-1, 1], only used for rendering.
    pub weight: f32,
}

impl Connection {
    pub fn new(from: &Layer, to: &Layer, weight: f32) -> Self {
        Self {
            id: ConnectionId::between(&from.id, &to.id),
            from_layer_id: from.id.clone(),
            to_layer_id: to.id.clone(),
            weight,
        }
    }
}

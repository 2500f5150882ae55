//! Illustrative arithmetic behind the visualizer's animations.
//!
//! None of this trains a network. It provides toy activation functions for
//! the theory panel, output-shape inference for layer labels, a seeded mock
//! forward pass for the data-flow animation, and the [`TrainingSimulator`]
//! that produces the epochs recorded by the store.

pub mod activation;
pub mod error;
pub mod forward;
pub mod shape;
pub mod simulator;

pub use activation::{ActivationFn, sigmoid, softmax};
pub use error::{EngineError, Result};
pub use forward::{LayerActivations, MAX_DISPLAY_NEURONS, display_neurons, mock_forward};
pub use shape::{Shape, format_shape, infer_shapes, output_shape};
pub use simulator::{EpochProgress, SimulatorSettings, Tick, TrainingSimulator};

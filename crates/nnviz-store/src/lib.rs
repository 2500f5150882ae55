//! Architecture state store for the neural-network visualizer.
//!
//! The store is the single source of truth for the network being shown:
//! architecture kind, ordered layers, derived positions and connections,
//! training progress, config, visualization toggles and panel state.
//! Renderers subscribe for [`StoreEvent`]s and pull the state after each one.
//!
//! ```
//! use nnviz_model::{LayerKind, ParamPatch};
//! use nnviz_store::NetworkStore;
//!
//! let mut store = NetworkStore::with_defaults()?;
//! let events = store.subscribe();
//! store.add_layer(LayerKind::Dropout, Some(&ParamPatch::new().with("rate", 0.3)))?;
//! assert_eq!(store.state().layers.len(), 5);
//! assert!(events.try_recv().is_ok());
//! # Ok::<(), nnviz_store::StoreError>(())
//! ```

pub mod action;
pub mod codegen;
pub mod counting;
pub mod error;
pub mod events;
pub mod layout;
pub mod settings;
pub mod store;

pub use action::{Action, LayerRef};
pub use error::{Result, StoreError};
pub use events::{EventBus, StoreEvent};
pub use settings::{DEFAULT_LAYER_SPACING, StoreSettings};
pub use store::NetworkStore;

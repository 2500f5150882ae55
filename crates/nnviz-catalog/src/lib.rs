//! Layer catalog and architecture templates.
//!
//! The catalog is static data consumed read-only by the store: one
//! [`LayerSpec`] per layer kind (display name, description, defaults) and a
//! [`TemplateRegistry`] mapping each built-in architecture to an ordered list
//! of `{kind, params}` slots. Templates are serde values, so custom ones can
//! be loaded from JSON with [`Template::from_json`].

pub mod error;
pub mod layers;
pub mod registry;
pub mod template;

pub use error::{CatalogError, Result};
pub use layers::{LayerCategory, LayerSpec, all_specs, display_name, spec};
pub use registry::TemplateRegistry;
pub use template::{Template, TemplateEntry};

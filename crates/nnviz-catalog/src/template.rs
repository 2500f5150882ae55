use serde::{Deserialize, Serialize};

use nnviz_model::{ArchitectureKind, LayerKind, LayerParams, ParamPatch};

use crate::error::{CatalogError, Result};

/// One layer slot of a template: a kind plus parameter overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub kind: LayerKind,
    #[serde(default, skip_serializing_if = "ParamPatch::is_empty")]
    pub params: ParamPatch,
}

impl TemplateEntry {
    pub fn new(kind: LayerKind, params: ParamPatch) -> Self {
        Self { kind, params }
    }

    /// Catalog defaults with this entry's overrides merged on top.
    pub fn resolve(&self) -> nnviz_model::Result<LayerParams> {
        LayerParams::with_overrides(self.kind, &self.params)
    }
}

/// Named, ordered list of layer slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub kind: ArchitectureKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub layers: Vec<TemplateEntry>,
}

impl Template {
    pub fn new(kind: ArchitectureKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            description: description.into(),
            layers: Vec::new(),
        }
    }

    /// Builder-style append.
    #[must_use]
    pub fn layer(mut self, kind: LayerKind, params: ParamPatch) -> Self {
        self.layers.push(TemplateEntry::new(kind, params));
        self
    }

    /// Parses a template from JSON and validates every entry.
    pub fn from_json(text: &str) -> Result<Self> {
        let template: Template = serde_json::from_str(text)?;
        template.validate()?;
        Ok(template)
    }

    /// Checks that every entry resolves. An empty template is valid and
    /// builds an empty network.
    pub fn validate(&self) -> Result<()> {
        for (index, entry) in self.layers.iter().enumerate() {
            entry.resolve().map_err(|source| CatalogError::InvalidEntry {
                template: self.name.clone(),
                index,
                source,
            })?;
        }
        Ok(())
    }
}

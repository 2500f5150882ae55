//! Architecture template registry.

use std::collections::BTreeMap;

use nnviz_model::{ArchitectureKind, LayerKind, ParamPatch};

use crate::template::Template;

/// Read-only map from architecture kind to its template.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<ArchitectureKind, Template>,
}

impl TemplateRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding one template per built-in architecture.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for template in builtin_templates() {
            registry.insert(template);
        }
        tracing::debug!(count = registry.len(), "loaded built-in templates");
        registry
    }

    /// Registers `template` under its own kind, replacing any previous one.
    pub fn insert(&mut self, template: Template) -> Option<Template> {
        self.templates.insert(template.kind, template)
    }

    pub fn get(&self, kind: ArchitectureKind) -> Option<&Template> {
        self.templates.get(&kind)
    }

    pub fn contains(&self, kind: ArchitectureKind) -> bool {
        self.templates.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

// =============================================================================
// BUILT-IN TEMPLATES
// =============================================================================

fn params() -> ParamPatch {
    ParamPatch::new()
}

fn dense(units: u32, activation: &str) -> ParamPatch {
    params().with("units", units).with("activation", activation)
}

fn builtin_templates() -> Vec<Template> {
    vec![
        Template::new(
            ArchitectureKind::Perceptron,
            "A single neuron computing a weighted sum followed by a step-like activation.",
        )
        .layer(LayerKind::Input, params().with("shape", vec![2u32]))
        .layer(LayerKind::Dense, dense(1, "sigmoid")),
        Template::new(
            ArchitectureKind::Mlp,
            "Stacked fully connected layers learning non-linear decision boundaries.",
        )
        .layer(LayerKind::Input, params().with("shape", vec![784u32]))
        .layer(LayerKind::Dense, dense(64, "relu"))
        .layer(LayerKind::Dense, dense(32, "relu"))
        .layer(LayerKind::Dense, dense(1, "sigmoid")),
        Template::new(
            ArchitectureKind::Cnn,
            "Convolutions extract local features, pooling shrinks them, dense layers classify.",
        )
        .layer(LayerKind::Input, params().with("shape", vec![28u32, 28, 1]))
        .layer(
            LayerKind::Conv2d,
            params().with("filters", 32).with("kernel_size", 3),
        )
        .layer(LayerKind::MaxPool2d, params().with("pool_size", 2))
        .layer(
            LayerKind::Conv2d,
            params().with("filters", 64).with("kernel_size", 3),
        )
        .layer(LayerKind::MaxPool2d, params().with("pool_size", 2))
        .layer(LayerKind::Flatten, params())
        .layer(LayerKind::Dense, dense(128, "relu"))
        .layer(LayerKind::Dropout, params().with("rate", 0.5))
        .layer(LayerKind::Output, dense(10, "softmax")),
        Template::new(
            ArchitectureKind::Rnn,
            "Recurrent cells carry a hidden state across the time steps of a sequence.",
        )
        .layer(LayerKind::Input, params().with("shape", vec![100u32]))
        .layer(
            LayerKind::Embedding,
            params().with("input_dim", 10_000).with("output_dim", 128),
        )
        .layer(
            LayerKind::Lstm,
            params().with("units", 64).with("return_sequences", true),
        )
        .layer(LayerKind::Gru, params().with("units", 32))
        .layer(LayerKind::Dense, dense(1, "sigmoid")),
        Template::new(
            ArchitectureKind::Transformer,
            "Self-attention relates every token to every other token in one step.",
        )
        .layer(LayerKind::Input, params().with("shape", vec![128u32]))
        .layer(
            LayerKind::Embedding,
            params().with("input_dim", 10_000).with("output_dim", 256),
        )
        .layer(
            LayerKind::Attention,
            params().with("num_heads", 8).with("key_dim", 32),
        )
        .layer(LayerKind::BatchNorm, params())
        .layer(LayerKind::Dense, dense(256, "relu"))
        .layer(LayerKind::Dropout, params().with("rate", 0.1))
        .layer(LayerKind::Output, dense(10, "softmax")),
        Template::new(
            ArchitectureKind::Gan,
            "The generator half of a GAN: noise in, synthetic sample out.",
        )
        .layer(LayerKind::Input, params().with("shape", vec![100u32]))
        .layer(LayerKind::Dense, dense(256, "leaky_relu"))
        .layer(LayerKind::BatchNorm, params())
        .layer(LayerKind::Dense, dense(512, "leaky_relu"))
        .layer(LayerKind::BatchNorm, params())
        .layer(LayerKind::Dense, dense(784, "tanh")),
        Template::new(
            ArchitectureKind::Autoencoder,
            "Compresses the input through a bottleneck and reconstructs it.",
        )
        .layer(LayerKind::Input, params().with("shape", vec![784u32]))
        .layer(LayerKind::Dense, dense(128, "relu"))
        .layer(LayerKind::Dense, dense(64, "relu"))
        .layer(LayerKind::Dense, dense(32, "relu"))
        .layer(LayerKind::Dense, dense(64, "relu"))
        .layer(LayerKind::Dense, dense(128, "relu"))
        .layer(LayerKind::Dense, dense(784, "sigmoid")),
    ]
}

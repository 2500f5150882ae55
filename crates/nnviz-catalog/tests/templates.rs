//! Tests for the built-in template registry.

use nnviz_catalog::{Template, TemplateRegistry};
use nnviz_model::{ArchitectureKind, LayerKind};

fn kinds(template: &Template) -> Vec<LayerKind> {
    template.layers.iter().map(|entry| entry.kind).collect()
}

#[test]
fn mlp_template_layout() {
    let registry = TemplateRegistry::builtin();
    let mlp = registry.get(ArchitectureKind::Mlp).expect("mlp template");
    assert_eq!(
        kinds(mlp),
        vec![
            LayerKind::Input,
            LayerKind::Dense,
            LayerKind::Dense,
            LayerKind::Dense
        ]
    );
    let units: Vec<Option<u32>> = mlp
        .layers
        .iter()
        .map(|entry| entry.resolve().unwrap().units())
        .collect();
    assert_eq!(units, vec![None, Some(64), Some(32), Some(1)]);
}

#[test]
fn cnn_template_layout() {
    let registry = TemplateRegistry::builtin();
    let cnn = registry.get(ArchitectureKind::Cnn).expect("cnn template");
    assert_eq!(cnn.layers.len(), 9);
    assert_eq!(cnn.layers[0].kind, LayerKind::Input);
    assert_eq!(cnn.layers[5].kind, LayerKind::Flatten);
    assert_eq!(cnn.layers[8].kind, LayerKind::Output);
}

#[test]
fn template_round_trips_through_json() {
    let registry = TemplateRegistry::builtin();
    let rnn = registry.get(ArchitectureKind::Rnn).expect("rnn template");
    let json = serde_json::to_string(rnn).expect("serialize template");
    let back = Template::from_json(&json).expect("parse template");
    assert_eq!(&back, rnn);
}

#[test]
fn template_names_come_from_architecture() {
    let registry = TemplateRegistry::builtin();
    let names: Vec<&str> = registry.iter().map(|t| t.name.as_str()).collect();
    assert!(names.contains(&"Multi-Layer Perceptron"));
    assert!(names.contains(&"Autoencoder"));
}

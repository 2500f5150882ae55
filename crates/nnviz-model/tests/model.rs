//! Tests for nnviz-model types.

use nnviz_model::{
    Activation, ArchitectureKind, Layer, LayerKind, LayerParams, ModelError, NetworkState,
    ParamPatch, ParamValue,
};

#[test]
fn default_state_is_empty_mlp() {
    let state = NetworkState::default();
    assert_eq!(state.current_architecture, ArchitectureKind::Mlp);
    assert!(state.layers.is_empty());
    assert!(state.visualization.show_data_flow);
    assert!(state.ui.left_panel_open);
    assert_eq!(state.config.epochs, 50);
}

#[test]
fn dense_patch_merges_shallowly() {
    let mut layer = Layer::new("Dense", LayerParams::default_for(LayerKind::Dense));
    layer
        .apply_patch(&ParamPatch::new().with("units", 128))
        .expect("apply units");

    let form = layer.params.to_patch();
    assert_eq!(form.get("units"), Some(&ParamValue::Number(128.0)));
    assert_eq!(form.get("activation"), Some(&ParamValue::Text("relu".into())));
}

#[test]
fn type_mismatch_is_reported() {
    let mut layer = Layer::new("Dense", LayerParams::default_for(LayerKind::Dense));
    let err = layer
        .apply_patch(&ParamPatch::new().with("activation", 3))
        .unwrap_err();
    assert!(matches!(err, ModelError::ParamType { ref key, .. } if key == "activation"));
    assert_eq!(layer.neurons, Some(64));
}

#[test]
fn activation_override_by_name() {
    let params = LayerParams::with_overrides(
        LayerKind::Output,
        &ParamPatch::new().with("activation", "sigmoid").with("units", 1),
    )
    .unwrap();
    let LayerParams::Output(output) = params else {
        panic!("expected output params");
    };
    assert_eq!(output.activation, Activation::Sigmoid);
    assert_eq!(output.units, 1);
}

#[test]
fn state_serializes_layers_with_kind_tag() {
    let mut state = NetworkState::default();
    state.layers.push(Layer::new(
        "Dropout",
        LayerParams::with_overrides(LayerKind::Dropout, &ParamPatch::new().with("rate", 0.3))
            .unwrap(),
    ));
    let json = serde_json::to_value(&state).expect("serialize state");
    assert_eq!(json["layers"][0]["params"]["kind"], "dropout");
    assert_eq!(json["layers"][0]["params"]["rate"], 0.3);
    assert_eq!(json["current_architecture"], "mlp");

    let back: NetworkState = serde_json::from_value(json).expect("deserialize state");
    assert_eq!(back, state);
}

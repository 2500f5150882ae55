//! Behavioral tests for the network store.

use nnviz_catalog::{Template, TemplateRegistry};
use nnviz_engine::{SimulatorSettings, Tick, TrainingSimulator};
use nnviz_model::{
    Activation, ArchitectureKind, LayerKind, LayerParams, NetworkConfigPatch, PanelTab,
    ParamPatch, TOUR_STEP_COUNT, Theme,
};
use nnviz_store::{
    Action, DEFAULT_LAYER_SPACING, LayerRef, NetworkStore, StoreError, StoreEvent, StoreSettings,
};

fn store() -> NetworkStore {
    let settings = StoreSettings {
        seed: Some(11),
        ..StoreSettings::default()
    };
    NetworkStore::new(settings, TemplateRegistry::builtin()).expect("store")
}

fn kinds(store: &NetworkStore) -> Vec<LayerKind> {
    store.state().layers.iter().map(|l| l.kind()).collect()
}

fn assert_layout(store: &NetworkStore) {
    let layers = &store.state().layers;
    let n = layers.len();
    for (i, layer) in layers.iter().enumerate() {
        let expected =
            -((n - 1) as f32 * DEFAULT_LAYER_SPACING) / 2.0 + i as f32 * DEFAULT_LAYER_SPACING;
        assert_eq!(layer.position.x, expected, "layer {i} of {n}");
        assert_eq!(layer.position.y, 0.0);
        assert_eq!(layer.position.z, 0.0);
    }
    let conns = &store.state().connections;
    assert_eq!(conns.len(), n.saturating_sub(1));
    for (i, conn) in conns.iter().enumerate() {
        assert_eq!(conn.from_layer_id, layers[i].id);
        assert_eq!(conn.to_layer_id, layers[i + 1].id);
    }
}

// =============================================================================
// Initial state
// =============================================================================

#[test]
fn starts_with_mlp_template() {
    let store = store();
    assert_eq!(store.state().current_architecture, ArchitectureKind::Mlp);
    assert_eq!(
        kinds(&store),
        vec![
            LayerKind::Input,
            LayerKind::Dense,
            LayerKind::Dense,
            LayerKind::Dense
        ]
    );
    let neurons: Vec<Option<u32>> = store.state().layers.iter().map(|l| l.neurons).collect();
    assert_eq!(neurons, vec![None, Some(64), Some(32), Some(1)]);
    assert_eq!(store.state().training.total_epochs, 50);
    assert_layout(&store);
}

#[test]
fn unknown_initial_architecture_fails() {
    let settings = StoreSettings {
        initial_architecture: ArchitectureKind::Custom,
        ..StoreSettings::default()
    };
    let err = NetworkStore::new(settings, TemplateRegistry::builtin()).unwrap_err();
    assert!(matches!(
        err,
        StoreError::UnknownTemplate(ArchitectureKind::Custom)
    ));
}

// =============================================================================
// Structural actions
// =============================================================================

#[test]
fn scenario_add_dropout_to_mlp() {
    let mut store = store();
    store
        .add_layer(
            LayerKind::Dropout,
            Some(&ParamPatch::new().with("rate", 0.3)),
        )
        .expect("add dropout");

    let state = store.state();
    assert_eq!(state.layers.len(), 5);
    let last = state.layers.last().expect("last layer");
    assert_eq!(last.kind(), LayerKind::Dropout);
    let LayerParams::Dropout(dropout) = &last.params else {
        panic!("expected dropout params");
    };
    assert_eq!(dropout.rate, 0.3);
    assert_eq!(state.current_architecture, ArchitectureKind::Custom);
    assert_eq!(state.connections.len(), 4);
    assert_layout(&store);
}

#[test]
fn architecture_switch_replaces_layers() {
    let mut store = store();
    store.clear_network();
    for _ in 0..3 {
        store.add_layer(LayerKind::Dense, None).unwrap();
    }
    store.set_architecture(ArchitectureKind::Cnn).unwrap();

    let cnn = TemplateRegistry::builtin();
    let expected: Vec<LayerKind> = cnn
        .get(ArchitectureKind::Cnn)
        .unwrap()
        .layers
        .iter()
        .map(|e| e.kind)
        .collect();
    assert_eq!(kinds(&store), expected);
    assert_eq!(store.state().current_architecture, ArchitectureKind::Cnn);
    assert_layout(&store);
}

#[test]
fn adjacent_reorder_round_trips() {
    let mut store = store();
    let before: Vec<_> = store.state().layers.iter().map(|l| l.id.clone()).collect();
    store.reorder_layers(1, 0).unwrap();
    assert_eq!(store.state().layers[0].id, before[1]);
    assert_layout(&store);
    store.reorder_layers(0, 1).unwrap();
    let after: Vec<_> = store.state().layers.iter().map(|l| l.id.clone()).collect();
    assert_eq!(after, before);
    assert_eq!(store.state().current_architecture, ArchitectureKind::Mlp);
}

#[test]
fn reorder_out_of_range_is_rejected() {
    let mut store = store();
    let before = store.snapshot();
    let err = store.reorder_layers(0, 4).unwrap_err();
    assert!(matches!(
        err,
        StoreError::IndexOutOfRange { index: 4, len: 4 }
    ));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn remove_clears_selection_and_hover() {
    let mut store = store();
    let id = store.state().layers[1].id.clone();
    store.set_selected_layer(Some(id.clone())).unwrap();
    store.set_hovered_layer(Some(id.clone())).unwrap();
    store.remove_layer(&id).unwrap();

    let vis = &store.state().visualization;
    assert_eq!(vis.selected_layer_id, None);
    assert_eq!(vis.hovered_layer_id, None);
    assert_eq!(store.state().layers.len(), 3);
    assert_eq!(store.state().current_architecture, ArchitectureKind::Custom);
    assert_layout(&store);
}

fn focus_second_layer(store: &mut NetworkStore) {
    let id = store.state().layers[1].id.clone();
    store.set_selected_layer(Some(id.clone())).unwrap();
    store.set_hovered_layer(Some(id)).unwrap();
}

fn assert_no_focus(store: &NetworkStore) {
    let vis = &store.state().visualization;
    assert_eq!(vis.selected_layer_id, None);
    assert_eq!(vis.hovered_layer_id, None);
}

#[test]
fn clear_drops_selection_and_hover() {
    let mut store = store();
    focus_second_layer(&mut store);
    store.clear_network();
    assert_no_focus(&store);
}

#[test]
fn architecture_switch_drops_selection_and_hover() {
    let mut store = store();
    focus_second_layer(&mut store);
    store.set_architecture(ArchitectureKind::Cnn).unwrap();
    assert_no_focus(&store);
}

#[test]
fn template_load_drops_selection_and_hover() {
    let mut store = store();
    focus_second_layer(&mut store);
    let template = Template::new(ArchitectureKind::Perceptron, "two inputs")
        .layer(LayerKind::Input, ParamPatch::new().with("shape", 2))
        .layer(LayerKind::Dense, ParamPatch::new().with("units", 1));
    store.load_template(&template).unwrap();
    assert_no_focus(&store);
}

#[test]
fn removing_unfocused_layer_leaves_visualization_silent() {
    let mut store = store();
    let selected = store.state().layers[1].id.clone();
    let removed = store.state().layers[2].id.clone();
    store.set_selected_layer(Some(selected.clone())).unwrap();
    let events = store.subscribe();

    store.remove_layer(&removed).unwrap();
    assert_eq!(
        events.try_iter().collect::<Vec<_>>(),
        vec![StoreEvent::LayersChanged, StoreEvent::ArchitectureChanged]
    );
    assert_eq!(store.state().visualization.selected_layer_id, Some(selected.clone()));

    store.remove_layer(&selected).unwrap();
    assert_eq!(
        events.try_iter().collect::<Vec<_>>(),
        vec![
            StoreEvent::LayersChanged,
            StoreEvent::ArchitectureChanged,
            StoreEvent::VisualizationChanged,
        ]
    );
}

#[test]
fn empty_template_builds_empty_network() {
    let mut store = store();
    let template = Template::new(ArchitectureKind::Gan, "nothing yet");
    store.load_template(&template).unwrap();
    assert!(store.state().layers.is_empty());
    assert!(store.state().connections.is_empty());
    assert_eq!(store.state().current_architecture, ArchitectureKind::Gan);
}

#[test]
fn oversized_flatten_reports_shape_error() {
    let mut store = store();
    store.clear_network();
    store
        .add_layer(
            LayerKind::Input,
            Some(&ParamPatch::new().with("shape", vec![70_000u32, 70_000])),
        )
        .unwrap();
    store.add_layer(LayerKind::Flatten, None).unwrap();
    assert!(matches!(
        store.layer_shapes(),
        Err(nnviz_engine::EngineError::ShapeOverflow { .. })
    ));
}

#[test]
fn clear_empties_network() {
    let mut store = store();
    store.clear_network();
    assert!(store.state().layers.is_empty());
    assert!(store.state().connections.is_empty());
    assert_eq!(store.state().current_architecture, ArchitectureKind::Custom);
    assert_eq!(store.total_parameters(), 0);
}

#[test]
fn load_template_adopts_template_kind() {
    let mut store = store();
    let template = Template::new(ArchitectureKind::Perceptron, "two inputs")
        .layer(LayerKind::Input, ParamPatch::new().with("shape", 2))
        .layer(LayerKind::Dense, ParamPatch::new().with("units", 1));
    store.load_template(&template).unwrap();
    assert_eq!(
        store.state().current_architecture,
        ArchitectureKind::Perceptron
    );
    assert_eq!(store.state().layers.len(), 2);
    assert_eq!(store.state().layers[1].name, "Dense");
    assert_layout(&store);
}

#[test]
fn invalid_template_is_rejected_whole() {
    let mut store = store();
    let before = store.snapshot();
    let template = Template::new(ArchitectureKind::Custom, "broken")
        .layer(LayerKind::Input, ParamPatch::new())
        .layer(LayerKind::Flatten, ParamPatch::new().with("units", 3));
    assert!(matches!(
        store.load_template(&template),
        Err(StoreError::InvalidTemplate(_))
    ));
    assert_eq!(store.snapshot(), before);
}

// =============================================================================
// Parameter edits
// =============================================================================

#[test]
fn param_update_is_shallow_merge() {
    let mut store = store();
    let id = store.state().layers[1].id.clone();
    store
        .update_layer_params(&id, &ParamPatch::new().with("units", 128))
        .unwrap();

    let layer = &store.state().layers[1];
    let LayerParams::Dense(dense) = &layer.params else {
        panic!("expected dense params");
    };
    assert_eq!(dense.units, 128);
    assert_eq!(dense.activation, Activation::Relu);
    assert_eq!(layer.neurons, Some(128));
    assert_eq!(store.state().current_architecture, ArchitectureKind::Mlp);
}

#[test]
fn bad_patch_leaves_layer_untouched() {
    let mut store = store();
    let id = store.state().layers[1].id.clone();
    let before = store.snapshot();
    let patch = ParamPatch::new()
        .with("units", 8)
        .with("activation", "swish");
    assert!(matches!(
        store.update_layer_params(&id, &patch),
        Err(StoreError::InvalidParams(_))
    ));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn unknown_layer_is_rejected() {
    let mut store = store();
    let ghost = nnviz_model::LayerId::new("ghost").unwrap();
    assert!(matches!(
        store.remove_layer(&ghost),
        Err(StoreError::UnknownLayer(_))
    ));
    assert!(matches!(
        store.update_layer_params(&ghost, &ParamPatch::new()),
        Err(StoreError::UnknownLayer(_))
    ));
    assert!(matches!(
        store.set_selected_layer(Some(ghost)),
        Err(StoreError::UnknownLayer(_))
    ));
}

// =============================================================================
// Derived values
// =============================================================================

#[test]
fn single_dense_parameter_count() {
    let mut store = store();
    store.clear_network();
    store
        .add_layer(LayerKind::Dense, Some(&ParamPatch::new().with("units", 10)))
        .unwrap();
    assert_eq!(store.total_parameters(), 7850);
}

#[test]
fn mlp_parameter_count() {
    let store = store();
    assert_eq!(store.total_parameters(), 50_240 + 2_080 + 33);
}

#[test]
fn generated_code_is_deterministic() {
    let store = store();
    assert_eq!(store.generated_code(), store.generated_code());
}

#[test]
fn cnn_shapes_are_inferred() {
    let mut store = store();
    store.set_architecture(ArchitectureKind::Cnn).unwrap();
    let shapes = store.layer_shapes().unwrap();
    assert_eq!(shapes.last().unwrap(), &vec![10]);
}

#[test]
fn mock_activations_cover_every_layer() {
    let mut store = store();
    let activations = store.mock_activations();
    assert_eq!(activations.len(), 4);
    assert_eq!(activations[3].values.len(), 1);
    assert!(
        activations
            .iter()
            .flat_map(|a| a.values.iter())
            .all(|v| (0.0..=1.0).contains(v))
    );
}

// =============================================================================
// Training
// =============================================================================

#[test]
fn progress_is_not_clamped() {
    let mut store = store();
    store.reset_training();
    for epoch in 1..=60 {
        store.update_training_progress(epoch, 1.0 / f64::from(epoch), 0.5);
    }
    let training = &store.state().training;
    assert_eq!(training.loss_history.len(), 60);
    assert_eq!(training.accuracy_history.len(), 60);
    assert_eq!(training.current_epoch, 60);
    assert_eq!(training.total_epochs, 50);
}

#[test]
fn reset_picks_up_config_epochs_lazily() {
    let mut store = store();
    store.update_config(&NetworkConfigPatch {
        epochs: Some(5),
        ..NetworkConfigPatch::default()
    });
    assert_eq!(store.state().training.total_epochs, 50);
    store.reset_training();
    assert_eq!(store.state().training.total_epochs, 5);
}

#[test]
fn simulator_run_stops_at_ceiling() {
    let mut store = store();
    store.update_config(&NetworkConfigPatch {
        epochs: Some(4),
        ..NetworkConfigPatch::default()
    });
    store.reset_training();
    store.start_training();
    let mut sim = TrainingSimulator::new(SimulatorSettings::default(), Some(3));
    while let Tick::Progress(_) = store.advance_training(&mut sim) {}

    let training = &store.state().training;
    assert!(!training.is_training);
    assert_eq!(training.current_epoch, 4);
    assert_eq!(training.loss_history.len(), 4);
    assert_eq!(store.advance_training(&mut sim), Tick::Idle);
}

#[test]
fn architecture_switch_resets_training() {
    let mut store = store();
    store.update_training_progress(1, 0.9, 0.4);
    store.set_architecture(ArchitectureKind::Rnn).unwrap();
    assert!(store.state().training.loss_history.is_empty());
    assert_eq!(store.state().training.current_epoch, 0);
}

// =============================================================================
// Visualization and UI
// =============================================================================

#[test]
fn toggles_are_involutions() {
    let mut store = store();
    let before = store.snapshot();
    store.toggle_data_flow();
    assert_ne!(
        store.state().visualization.show_data_flow,
        before.visualization.show_data_flow
    );
    store.toggle_data_flow();
    store.toggle_weights();
    store.toggle_weights();
    store.toggle_gradients();
    store.toggle_gradients();
    store.toggle_left_panel();
    store.toggle_left_panel();
    store.toggle_right_panel();
    store.toggle_right_panel();
    assert_eq!(store.snapshot(), before);
}

#[test]
fn tour_walks_and_ends() {
    let mut store = store();
    store.start_tour();
    for _ in 1..TOUR_STEP_COUNT {
        store.next_tour_step();
    }
    assert_eq!(store.state().ui.tour_step, TOUR_STEP_COUNT - 1);
    store.prev_tour_step();
    assert_eq!(store.state().ui.tour_step, TOUR_STEP_COUNT - 2);
    store.end_tour();
    assert!(!store.state().ui.tour_active);
}

#[test]
fn panel_settings_apply() {
    let mut store = store();
    store.set_right_panel_tab(PanelTab::Code);
    store.set_theme(Theme::Light);
    store.set_animation_speed(2.5);
    assert_eq!(store.state().ui.right_panel_tab, PanelTab::Code);
    assert_eq!(store.state().ui.theme, Theme::Light);
    assert_eq!(store.state().visualization.animation_speed, 2.5);
}

// =============================================================================
// Events
// =============================================================================

#[test]
fn applied_actions_publish_touched_aggregates() {
    let mut store = store();
    let events = store.subscribe();
    store.add_layer(LayerKind::Flatten, None).unwrap();
    let got: Vec<StoreEvent> = events.try_iter().collect();
    assert_eq!(
        got,
        vec![StoreEvent::LayersChanged, StoreEvent::ArchitectureChanged]
    );

    store.toggle_weights();
    assert_eq!(
        events.try_iter().collect::<Vec<_>>(),
        vec![StoreEvent::VisualizationChanged]
    );
}

#[test]
fn rejected_actions_publish_nothing() {
    let mut store = store();
    let events = store.subscribe();
    let _ = store.reorder_layers(9, 0);
    let _ = store.add_layer(
        LayerKind::Dropout,
        Some(&ParamPatch::new().with("rate", "high")),
    );
    assert!(events.try_recv().is_err());
}

#[test]
fn resetting_same_value_is_silent() {
    let mut store = store();
    let events = store.subscribe();
    store.set_theme(Theme::Dark);
    store.set_right_panel_tab(PanelTab::Parameters);
    store.set_selected_layer(None).unwrap();
    assert!(events.try_recv().is_err());
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn scripted_session_replays() {
    let mut store = store();
    let script = Action::parse_script(
        r#"[
            {"action": "set_architecture", "architecture": "cnn"},
            {"action": "update_layer_params", "layer": 1, "params": {"filters": 16}},
            {"action": "remove_layer", "layer": 7},
            {"action": "set_selected_layer", "layer": 0},
            {"action": "update_config", "config": {"optimizer": "sgd", "epochs": 3}},
            {"action": "set_right_panel_tab", "tab": "code"}
        ]"#,
    )
    .unwrap();
    for action in script {
        store.dispatch(action).unwrap();
    }
    let state = store.state();
    assert_eq!(state.layers.len(), 8);
    assert!(!state.layers.iter().any(|l| l.kind() == LayerKind::Dropout));
    assert_eq!(state.current_architecture, ArchitectureKind::Custom);
    assert_eq!(
        state.visualization.selected_layer_id.as_ref(),
        Some(&state.layers[0].id)
    );
    assert!(store.generated_code().contains("keras.optimizers.SGD(learning_rate=0.001)"));
    assert!(store.generated_code().contains("layers.Conv2D(16, (3, 3)"));
}

#[test]
fn dispatch_reports_bad_index() {
    let mut store = store();
    let err = store
        .dispatch(Action::RemoveLayer {
            layer: LayerRef::Index(12),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::IndexOutOfRange { index: 12, len: 4 }
    ));
}

#[test]
fn snapshot_json_names_architecture() {
    let store = store();
    let json = store.snapshot_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["current_architecture"], "mlp");
    assert_eq!(value["layers"].as_array().unwrap().len(), 4);
}

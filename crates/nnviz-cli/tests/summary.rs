//! Integration tests for the summary tables.

use comfy_table::Table;

use nnviz_catalog::TemplateRegistry;
use nnviz_cli::summary::{layer_table, templates_table, training_table, view_line};
use nnviz_model::{ArchitectureKind, LayerKind, TrainingState};
use nnviz_store::NetworkStore;

fn render(mut table: Table) -> String {
    table.force_no_tty();
    table.to_string()
}

#[test]
fn test_layer_table_shows_shapes_and_total() {
    let store = NetworkStore::with_defaults().unwrap();
    let rendered = render(layer_table(&store));

    assert!(rendered.contains("(None, 784)"));
    assert!(rendered.contains("(None, 64)"));
    assert!(rendered.contains("50240"));
    assert!(rendered.contains("TOTAL"));
    assert!(rendered.contains("52353"));
    assert!(rendered.contains("4 layers"));
}

#[test]
fn test_layer_table_without_input_layer() {
    let mut store = NetworkStore::with_defaults().unwrap();
    store.clear_network();
    store.add_layer(LayerKind::Dense, None).unwrap();
    let rendered = render(layer_table(&store));

    assert!(!rendered.contains("(None"));
    assert!(rendered.contains("50240"));
    assert!(rendered.contains("1 layers"));
}

#[test]
fn test_templates_table_lists_every_builtin() {
    let rendered = render(templates_table(&TemplateRegistry::builtin()));
    for kind in ArchitectureKind::TEMPLATED {
        assert!(rendered.contains(kind.as_str()), "missing {kind}");
    }
    assert!(!rendered.contains("custom"));
}

#[test]
fn test_training_table_has_one_row_per_epoch() {
    let mut training = TrainingState::reset(3);
    training.record(1, 0.9, 0.5);
    training.record(2, 0.5, 0.75);
    let rendered = render(training_table(&training));

    assert!(rendered.contains("0.9000"));
    assert!(rendered.contains("0.5000"));
    assert!(rendered.contains("50.0%"));
    assert!(rendered.contains("75.0%"));
}

#[test]
fn test_view_line_names_selected_layer() {
    let mut store = NetworkStore::with_defaults().unwrap();
    assert!(view_line(store.state()).contains("selected none"));

    let id = store.state().layers[1].id.clone();
    let name = store.state().layers[1].name.clone();
    store.set_selected_layer(Some(id)).unwrap();
    assert!(view_line(store.state()).contains(&format!("selected {name}")));
}

//! Terminal tables for the store contents.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use nnviz_catalog::TemplateRegistry;
use nnviz_engine::format_shape;
use nnviz_model::{NetworkState, TrainingState};
use nnviz_store::NetworkStore;
use nnviz_store::counting;

pub fn print_summary(store: &NetworkStore) {
    let state = store.state();
    println!(
        "Architecture: {} ({})",
        state.current_architecture.display_name(),
        state.current_architecture
    );
    println!("{}", layer_table(store));
    if !state.training.loss_history.is_empty() {
        println!("{}", training_line(&state.training));
    }
}

/// One row per layer with its output shape and parameter count.
pub fn layer_table(store: &NetworkStore) -> Table {
    let state = store.state();
    let shapes = match store.layer_shapes() {
        Ok(shapes) => Some(shapes),
        Err(error) => {
            tracing::debug!(%error, "output shapes unavailable");
            None
        }
    };
    let counts = counting::per_layer(&state.layers);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Layer"),
        header_cell("Kind"),
        header_cell("Output shape"),
        header_cell("Params"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (index, (layer, count)) in state.layers.iter().zip(&counts).enumerate() {
        let shape = shapes
            .as_ref()
            .and_then(|shapes| shapes.get(index))
            .map_or_else(|| dim_cell("-"), |shape| Cell::new(format_shape(shape)));
        table.add_row(vec![
            Cell::new(index),
            Cell::new(&layer.name),
            Cell::new(layer.kind()),
            shape,
            count_cell(*count),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} layers", state.layers.len())).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(counting::total(&state.layers)).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn templates_table(registry: &TemplateRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Name"),
        header_cell("Layers"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for template in registry.iter() {
        table.add_row(vec![
            Cell::new(template.kind).add_attribute(Attribute::Bold),
            Cell::new(&template.name),
            Cell::new(template.layers.len()),
            Cell::new(&template.description),
        ]);
    }
    table
}

/// Per-epoch loss and accuracy as recorded in the history.
pub fn training_table(training: &TrainingState) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Epoch"),
        header_cell("Loss"),
        header_cell("Accuracy"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS);
    for column in 0..3 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    let rows = training
        .loss_history
        .iter()
        .zip(&training.accuracy_history)
        .enumerate();
    for (index, (loss, accuracy)) in rows {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(format!("{loss:.4}")),
            Cell::new(format!("{:.1}%", accuracy * 100.0)),
        ]);
    }
    table
}

fn training_line(training: &TrainingState) -> String {
    format!(
        "Training: epoch {}/{}, loss {:.4}, accuracy {:.1}%",
        training.current_epoch,
        training.total_epochs,
        training.loss,
        training.accuracy * 100.0
    )
}

/// Short description of the selection, hover and panel state.
pub fn view_line(state: &NetworkState) -> String {
    let selected = state
        .selected_layer()
        .map_or_else(|| "none".to_string(), |layer| layer.name.clone());
    format!(
        "View: {:?}, selected {selected}, right panel {:?}",
        state.visualization.view_mode, state.ui.right_panel_tab
    )
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: u64) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

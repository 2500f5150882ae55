//! The architecture state store.
//!
//! [`NetworkStore`] owns the only [`NetworkState`]. Every action runs to
//! completion, re-derives positions and connections when it changes the
//! layer list, and then notifies subscribers. Rejected actions return a
//! [`StoreError`], leave the state untouched and notify nobody.

use crossbeam_channel::Receiver;
use rand::rngs::StdRng;
use rand::SeedableRng;

use nnviz_catalog::{Template, TemplateRegistry, display_name};
use nnviz_engine::{LayerActivations, Shape, Tick, TrainingSimulator, infer_shapes, mock_forward};
use nnviz_model::{
    ArchitectureKind, Layer, LayerId, LayerKind, LayerParams, NetworkConfigPatch, NetworkState,
    PanelTab, ParamPatch, Position, Theme, TrainingState, ViewMode,
};

use crate::action::{Action, LayerRef};
use crate::codegen;
use crate::counting;
use crate::error::{Result, StoreError};
use crate::events::{EventBus, StoreEvent};
use crate::layout;
use crate::settings::StoreSettings;

/// Events published by any switch of the whole layer list.
const ARCHITECTURE_SWITCH: [StoreEvent; 4] = [
    StoreEvent::LayersChanged,
    StoreEvent::ArchitectureChanged,
    StoreEvent::TrainingChanged,
    StoreEvent::VisualizationChanged,
];

/// Single source of truth for the visualizer.
#[derive(Debug)]
pub struct NetworkStore {
    state: NetworkState,
    registry: TemplateRegistry,
    settings: StoreSettings,
    rng: StdRng,
    events: EventBus,
}

impl NetworkStore {
    /// Creates a store showing `settings.initial_architecture`.
    pub fn new(settings: StoreSettings, registry: TemplateRegistry) -> Result<Self> {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut store = Self {
            state: NetworkState::default(),
            registry,
            settings,
            rng,
            events: EventBus::new(),
        };
        let initial = store.settings.initial_architecture;
        let template = store
            .registry
            .get(initial)
            .ok_or(StoreError::UnknownTemplate(initial))?;
        let layers = build_layers(template)?;
        store.install(layers, initial);
        tracing::debug!(architecture = %initial, "store created");
        Ok(store)
    }

    /// Store with default settings and the built-in templates.
    pub fn with_defaults() -> Result<Self> {
        Self::new(StoreSettings::default(), TemplateRegistry::builtin())
    }

    // =========================================================================
    // Reading
    // =========================================================================

    pub fn state(&self) -> &NetworkState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> NetworkState {
        self.state.clone()
    }

    /// The current state as pretty-printed JSON.
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Receives an event for every aggregate each applied action touches.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Keras program for the current layers and config.
    pub fn generated_code(&self) -> String {
        codegen::generate(&self.state.layers, &self.state.config)
    }

    /// Simplified parameter total (dense and conv2d only, seeded at 784).
    pub fn total_parameters(&self) -> u64 {
        counting::total(&self.state.layers)
    }

    /// Output shape of every layer.
    pub fn layer_shapes(&self) -> nnviz_engine::Result<Vec<Shape>> {
        infer_shapes(&self.state.layers)
    }

    /// Fresh mock activations for the data-flow animation.
    pub fn mock_activations(&mut self) -> Vec<LayerActivations> {
        mock_forward(&self.state.layers, &mut self.rng)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Replaces the network with the registered template for `kind`.
    pub fn set_architecture(&mut self, kind: ArchitectureKind) -> Result<()> {
        let template = self
            .registry
            .get(kind)
            .ok_or(StoreError::UnknownTemplate(kind))
            .map_err(|err| rejected("set_architecture", err))?;
        let layers = build_layers(template).map_err(|err| rejected("set_architecture", err))?;
        self.install(layers, kind);
        tracing::info!(architecture = %kind, layers = self.state.layers.len(), "architecture switched");
        self.events.publish(&ARCHITECTURE_SWITCH);
        Ok(())
    }

    /// Replaces the network with `template`, adopting its architecture kind.
    pub fn load_template(&mut self, template: &Template) -> Result<()> {
        template
            .validate()
            .map_err(|err| rejected("load_template", err.into()))?;
        let layers = build_layers(template).map_err(|err| rejected("load_template", err))?;
        self.install(layers, template.kind);
        tracing::info!(
            template = %template.name,
            architecture = %template.kind,
            layers = self.state.layers.len(),
            "template loaded"
        );
        self.events.publish(&ARCHITECTURE_SWITCH);
        Ok(())
    }

    /// Appends a layer of `kind` with `overrides` merged over the defaults.
    ///
    /// Returns the id of the new layer.
    pub fn add_layer(&mut self, kind: LayerKind, overrides: Option<&ParamPatch>) -> Result<LayerId> {
        let params = match overrides {
            Some(patch) => LayerParams::with_overrides(kind, patch),
            None => Ok(LayerParams::default_for(kind)),
        }
        .map_err(|err| rejected("add_layer", err.into()))?;
        let layer = Layer::new(display_name(kind), params);
        let id = layer.id.clone();
        self.state.layers.push(layer);
        self.mark_custom();
        tracing::debug!(%kind, layer = %id, count = self.state.layers.len(), "layer added");
        self.events
            .publish(&[StoreEvent::LayersChanged, StoreEvent::ArchitectureChanged]);
        Ok(id)
    }

    /// Removes the layer and drops any selection or hover pointing at it.
    pub fn remove_layer(&mut self, id: &LayerId) -> Result<()> {
        let index = self
            .state
            .layer_index(id)
            .ok_or_else(|| rejected("remove_layer", StoreError::UnknownLayer(id.clone())))?;
        self.state.layers.remove(index);
        let focus_cleared = self.state.visualization.forget_layer(id);
        self.mark_custom();
        tracing::debug!(layer = %id, count = self.state.layers.len(), "layer removed");
        if focus_cleared {
            self.events.publish(&[
                StoreEvent::LayersChanged,
                StoreEvent::ArchitectureChanged,
                StoreEvent::VisualizationChanged,
            ]);
        } else {
            self.events
                .publish(&[StoreEvent::LayersChanged, StoreEvent::ArchitectureChanged]);
        }
        Ok(())
    }

    /// Shallow-merges `patch` into the layer's params. Not structural.
    pub fn update_layer_params(&mut self, id: &LayerId, patch: &ParamPatch) -> Result<()> {
        let layer = self
            .state
            .layer_mut(id)
            .ok_or_else(|| rejected("update_layer_params", StoreError::UnknownLayer(id.clone())))?;
        layer
            .apply_patch(patch)
            .map_err(|err| rejected("update_layer_params", err.into()))?;
        tracing::debug!(layer = %id, keys = patch.len(), "layer params updated");
        self.events.publish(&[StoreEvent::LayersChanged]);
        Ok(())
    }

    /// Moves the layer at `from` so it ends up at `to`.
    pub fn reorder_layers(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.state.layers.len();
        for index in [from, to] {
            if index >= len {
                return Err(rejected(
                    "reorder_layers",
                    StoreError::IndexOutOfRange { index, len },
                ));
            }
        }
        let layer = self.state.layers.remove(from);
        self.state.layers.insert(to, layer);
        self.regenerate();
        tracing::debug!(from, to, "layers reordered");
        self.events.publish(&[StoreEvent::LayersChanged]);
        Ok(())
    }

    /// Empties the network.
    pub fn clear_network(&mut self) {
        self.state.layers.clear();
        self.state.visualization.clear_focus();
        self.mark_custom();
        tracing::debug!("network cleared");
        self.events.publish(&[
            StoreEvent::LayersChanged,
            StoreEvent::ArchitectureChanged,
            StoreEvent::VisualizationChanged,
        ]);
    }

    // =========================================================================
    // Training
    // =========================================================================

    pub fn start_training(&mut self) {
        self.state.training.is_training = true;
        tracing::debug!("training started");
        self.events.publish(&[StoreEvent::TrainingChanged]);
    }

    pub fn stop_training(&mut self) {
        self.state.training.is_training = false;
        tracing::debug!(epoch = self.state.training.current_epoch, "training stopped");
        self.events.publish(&[StoreEvent::TrainingChanged]);
    }

    /// Zeroes training progress; the ceiling is re-read from the config.
    pub fn reset_training(&mut self) {
        self.state.training = TrainingState::reset(self.state.config.epochs);
        tracing::debug!(total_epochs = self.state.training.total_epochs, "training reset");
        self.events.publish(&[StoreEvent::TrainingChanged]);
    }

    /// Records one epoch as reported. Nothing is clamped.
    pub fn update_training_progress(&mut self, epoch: u32, loss: f64, accuracy: f64) {
        self.state.training.record(epoch, loss, accuracy);
        tracing::trace!(epoch, loss, accuracy, "training progress");
        self.events.publish(&[StoreEvent::TrainingChanged]);
    }

    /// Runs one simulation tick and records its outcome.
    pub fn advance_training(&mut self, simulator: &mut TrainingSimulator) -> Tick {
        let tick = simulator.tick(&self.state.training);
        match tick {
            Tick::Progress(p) => self.update_training_progress(p.epoch, p.loss, p.accuracy),
            Tick::Finished => self.stop_training(),
            Tick::Idle => {}
        }
        tick
    }

    /// Shallow-merges `patch` into the config. Values are not range-checked.
    pub fn update_config(&mut self, patch: &NetworkConfigPatch) {
        self.state.config.merge(patch);
        tracing::debug!(?patch, "config updated");
        self.events.publish(&[StoreEvent::ConfigChanged]);
    }

    // =========================================================================
    // Visualization
    // =========================================================================

    /// Selects a layer, or clears the selection with `None`.
    pub fn set_selected_layer(&mut self, id: Option<LayerId>) -> Result<()> {
        self.ensure_known(id.as_ref(), "set_selected_layer")?;
        if self.state.visualization.selected_layer_id != id {
            self.state.visualization.selected_layer_id = id;
            self.events.publish(&[StoreEvent::VisualizationChanged]);
        }
        Ok(())
    }

    /// Marks a layer as hovered, or clears hover with `None`.
    pub fn set_hovered_layer(&mut self, id: Option<LayerId>) -> Result<()> {
        self.ensure_known(id.as_ref(), "set_hovered_layer")?;
        if self.state.visualization.hovered_layer_id != id {
            self.state.visualization.hovered_layer_id = id;
            self.events.publish(&[StoreEvent::VisualizationChanged]);
        }
        Ok(())
    }

    pub fn toggle_data_flow(&mut self) {
        let vis = &mut self.state.visualization;
        vis.show_data_flow = !vis.show_data_flow;
        self.events.publish(&[StoreEvent::VisualizationChanged]);
    }

    pub fn toggle_weights(&mut self) {
        let vis = &mut self.state.visualization;
        vis.show_weights = !vis.show_weights;
        self.events.publish(&[StoreEvent::VisualizationChanged]);
    }

    pub fn toggle_gradients(&mut self) {
        let vis = &mut self.state.visualization;
        vis.show_gradients = !vis.show_gradients;
        self.events.publish(&[StoreEvent::VisualizationChanged]);
    }

    pub fn set_animation_speed(&mut self, speed: f32) {
        if self.state.visualization.animation_speed != speed {
            self.state.visualization.animation_speed = speed;
            self.events.publish(&[StoreEvent::VisualizationChanged]);
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.state.visualization.view_mode != mode {
            self.state.visualization.view_mode = mode;
            self.events.publish(&[StoreEvent::VisualizationChanged]);
        }
    }

    pub fn set_camera_position(&mut self, position: Position) {
        if self.state.visualization.camera_position != position {
            self.state.visualization.camera_position = position;
            self.events.publish(&[StoreEvent::VisualizationChanged]);
        }
    }

    // =========================================================================
    // Panels and tour
    // =========================================================================

    pub fn toggle_left_panel(&mut self) {
        self.state.ui.left_panel_open = !self.state.ui.left_panel_open;
        self.events.publish(&[StoreEvent::UiChanged]);
    }

    pub fn toggle_right_panel(&mut self) {
        self.state.ui.right_panel_open = !self.state.ui.right_panel_open;
        self.events.publish(&[StoreEvent::UiChanged]);
    }

    pub fn set_right_panel_tab(&mut self, tab: PanelTab) {
        if self.state.ui.right_panel_tab != tab {
            self.state.ui.right_panel_tab = tab;
            self.events.publish(&[StoreEvent::UiChanged]);
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.state.ui.theme != theme {
            self.state.ui.theme = theme;
            self.events.publish(&[StoreEvent::UiChanged]);
        }
    }

    pub fn start_tour(&mut self) {
        self.state.ui.start_tour();
        self.events.publish(&[StoreEvent::UiChanged]);
    }

    pub fn next_tour_step(&mut self) {
        self.state.ui.next_tour_step();
        self.events.publish(&[StoreEvent::UiChanged]);
    }

    pub fn prev_tour_step(&mut self) {
        self.state.ui.prev_tour_step();
        self.events.publish(&[StoreEvent::UiChanged]);
    }

    pub fn end_tour(&mut self) {
        self.state.ui.end_tour();
        self.events.publish(&[StoreEvent::UiChanged]);
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Applies one serialized action.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        tracing::trace!(action = action.name(), "dispatch");
        match action {
            Action::SetArchitecture { architecture } => self.set_architecture(architecture)?,
            Action::LoadTemplate { template } => self.load_template(&template)?,
            Action::AddLayer { kind, params } => {
                self.add_layer(kind, Some(&params))?;
            }
            Action::RemoveLayer { layer } => {
                let id = self.resolve(&layer, "remove_layer")?;
                self.remove_layer(&id)?;
            }
            Action::UpdateLayerParams { layer, params } => {
                let id = self.resolve(&layer, "update_layer_params")?;
                self.update_layer_params(&id, &params)?;
            }
            Action::ReorderLayers { from, to } => self.reorder_layers(from, to)?,
            Action::ClearNetwork => self.clear_network(),
            Action::StartTraining => self.start_training(),
            Action::StopTraining => self.stop_training(),
            Action::ResetTraining => self.reset_training(),
            Action::UpdateTrainingProgress {
                epoch,
                loss,
                accuracy,
            } => self.update_training_progress(epoch, loss, accuracy),
            Action::UpdateConfig { config } => self.update_config(&config),
            Action::SetSelectedLayer { layer } => {
                let id = self.resolve_optional(layer.as_ref(), "set_selected_layer")?;
                self.set_selected_layer(id)?;
            }
            Action::SetHoveredLayer { layer } => {
                let id = self.resolve_optional(layer.as_ref(), "set_hovered_layer")?;
                self.set_hovered_layer(id)?;
            }
            Action::ToggleDataFlow => self.toggle_data_flow(),
            Action::ToggleWeights => self.toggle_weights(),
            Action::ToggleGradients => self.toggle_gradients(),
            Action::SetAnimationSpeed { speed } => self.set_animation_speed(speed),
            Action::SetViewMode { mode } => self.set_view_mode(mode),
            Action::SetCameraPosition { position } => self.set_camera_position(position),
            Action::ToggleLeftPanel => self.toggle_left_panel(),
            Action::ToggleRightPanel => self.toggle_right_panel(),
            Action::SetRightPanelTab { tab } => self.set_right_panel_tab(tab),
            Action::SetTheme { theme } => self.set_theme(theme),
            Action::StartTour => self.start_tour(),
            Action::NextTourStep => self.next_tour_step(),
            Action::PrevTourStep => self.prev_tour_step(),
            Action::EndTour => self.end_tour(),
        }
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Installs a freshly built layer list for `kind`.
    fn install(&mut self, layers: Vec<Layer>, kind: ArchitectureKind) {
        self.state.layers = layers;
        self.state.current_architecture = kind;
        self.state.training = TrainingState::reset(self.state.config.epochs);
        self.state.visualization.clear_focus();
        self.regenerate();
    }

    /// Structural edit: the network no longer matches a named template.
    fn mark_custom(&mut self) {
        self.state.current_architecture = ArchitectureKind::Custom;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.state.connections = layout::regenerate(
            &mut self.state.layers,
            self.settings.layer_spacing,
            &mut self.rng,
        );
    }

    fn ensure_known(&self, id: Option<&LayerId>, action: &'static str) -> Result<()> {
        match id {
            Some(id) if self.state.layer(id).is_none() => {
                Err(rejected(action, StoreError::UnknownLayer(id.clone())))
            }
            _ => Ok(()),
        }
    }

    fn resolve(&self, layer: &LayerRef, action: &'static str) -> Result<LayerId> {
        match layer {
            LayerRef::Id(id) => Ok(id.clone()),
            LayerRef::Index(index) => self
                .state
                .layers
                .get(*index)
                .map(|layer| layer.id.clone())
                .ok_or_else(|| {
                    rejected(
                        action,
                        StoreError::IndexOutOfRange {
                            index: *index,
                            len: self.state.layers.len(),
                        },
                    )
                }),
        }
    }

    fn resolve_optional(
        &self,
        layer: Option<&LayerRef>,
        action: &'static str,
    ) -> Result<Option<LayerId>> {
        layer.map(|layer| self.resolve(layer, action)).transpose()
    }
}

/// Builds layers from a template: defaults merged with each entry's
/// overrides, a fresh id and the catalog display name.
fn build_layers(template: &Template) -> Result<Vec<Layer>> {
    template
        .layers
        .iter()
        .map(|entry| -> Result<Layer> {
            Ok(Layer::new(display_name(entry.kind), entry.resolve()?))
        })
        .collect()
}

fn rejected(action: &'static str, err: StoreError) -> StoreError {
    tracing::warn!(action, error = %err, "action rejected");
    err
}


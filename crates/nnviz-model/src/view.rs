//! Visualization toggles and panel state.

use serde::{Deserialize, Serialize};

use crate::enums::{PanelTab, Theme, ViewMode};
use crate::ids::LayerId;
use crate::layer::Position;

/// Number of steps in the guided tour.
pub const TOUR_STEP_COUNT: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationState {
    pub show_data_flow: bool,
    pub show_weights: bool,
    pub show_gradients: bool,
    pub animation_speed: f32,
    pub view_mode: ViewMode,
    pub camera_position: Position,
    pub selected_layer_id: Option<LayerId>,
    pub hovered_layer_id: Option<LayerId>,
}

impl Default for VisualizationState {
    fn default() -> Self {
        Self {
            show_data_flow: true,
            show_weights: true,
            show_gradients: false,
            animation_speed: 1.0,
            view_mode: ViewMode::Perspective,
            camera_position: Position::new(0.0, 5.0, 15.0),
            selected_layer_id: None,
            hovered_layer_id: None,
        }
    }
}

impl VisualizationState {
    /// Drops selection and hover if they point at `id`. Returns whether
    /// either was cleared.
    pub fn forget_layer(&mut self, id: &LayerId) -> bool {
        let mut changed = false;
        if self.selected_layer_id.as_ref() == Some(id) {
            self.selected_layer_id = None;
            changed = true;
        }
        if self.hovered_layer_id.as_ref() == Some(id) {
            self.hovered_layer_id = None;
            changed = true;
        }
        changed
    }

    pub fn clear_focus(&mut self) {
        self.selected_layer_id = None;
        self.hovered_layer_id = None;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    pub left_panel_open: bool,
    pub right_panel_open: bool,
    pub right_panel_tab: PanelTab,
    pub theme: Theme,
    pub tour_active: bool,
    pub tour_step: u32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            left_panel_open: true,
            right_panel_open: true,
            right_panel_tab: PanelTab::Parameters,
            theme: Theme::Dark,
            tour_active: false,
            tour_step: 0,
        }
    }
}

impl UiState {
    pub fn start_tour(&mut self) {
        self.tour_active = true;
        self.tour_step = 0;
    }

    /// Advances the tour; stepping past the last step ends it.
    pub fn next_tour_step(&mut self) {
        if !self.tour_active {
            return;
        }
        if self.tour_step + 1 >= TOUR_STEP_COUNT {
            self.end_tour();
        } else {
            self.tour_step += 1;
        }
    }

    pub fn prev_tour_step(&mut self) {
        if self.tour_active {
            self.tour_step = self.tour_step.saturating_sub(1);
        }
    }

    pub fn end_tour(&mut self) {
        self.tour_active = false;
        self.tour_step = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tour_ends_after_last_step() {
        let mut ui = UiState::default();
        ui.start_tour();
        for _ in 0..TOUR_STEP_COUNT - 1 {
            ui.next_tour_step();
        }
        assert!(ui.tour_active);
        assert_eq!(ui.tour_step, TOUR_STEP_COUNT - 1);

        ui.next_tour_step();
        assert!(!ui.tour_active);
        assert_eq!(ui.tour_step, 0);
    }

    #[test]
    fn prev_step_stops_at_zero() {
        let mut ui = UiState::default();
        ui.start_tour();
        ui.prev_tour_step();
        assert_eq!(ui.tour_step, 0);
    }

    #[test]
    fn forget_layer_only_clears_matching_ids() {
        let a = LayerId::new("a").unwrap();
        let b = LayerId::new("b").unwrap();
        let mut vis = VisualizationState {
            selected_layer_id: Some(a.clone()),
            hovered_layer_id: Some(b.clone()),
            ..VisualizationState::default()
        };
        assert!(vis.forget_layer(&a));
        assert_eq!(vis.selected_layer_id, None);
        assert_eq!(vis.hovered_layer_id, Some(b));
        assert!(!vis.forget_layer(&a));
    }
}

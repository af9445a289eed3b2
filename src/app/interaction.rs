use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use crate::plot::{CANVAS_HEIGHT, CANVAS_WIDTH};

use super::render_utils::{canvas_center, circle_visible, screen_to_world};
use super::{ViewModel, ViewScratch};

impl ViewModel {
    /// Scales the canvas so the whole sheet fits the allocated rect, with a
    /// small margin so the border stays visible.
    pub(in crate::app) fn fit_view(&mut self, rect: Rect) {
        let fit = (rect.width() / CANVAS_WIDTH).min(rect.height() / CANVAS_HEIGHT);
        self.zoom = (fit * 0.96).clamp(0.05, 6.0);
        self.pan = Vec2::ZERO;
        self.auto_fit = false;
    }

    pub(in crate::app) fn handle_canvas_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 6.0);
        self.pan = pointer - rect.center() - (world_before - canvas_center()) * self.zoom;
    }

    pub(in crate::app) fn handle_canvas_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn visible_indices_into(
        rect: Rect,
        screen_radius: f32,
        scratch: &mut ViewScratch,
    ) {
        let ViewScratch {
            screen_positions,
            visible_indices,
            ..
        } = scratch;
        visible_indices.clear();
        visible_indices.extend(
            (0..screen_positions.len())
                .filter(|&index| circle_visible(rect, screen_positions[index], screen_radius)),
        );
    }

    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        visible_indices: &[usize],
        screen_positions: &[Pos2],
        screen_radius: f32,
    ) -> Option<(usize, f32)> {
        let pointer_pos = ui.input(|input| input.pointer.hover_pos());
        pointer_pos.and_then(|pointer| {
            visible_indices
                .iter()
                .filter_map(|index| {
                    let distance = screen_positions[*index].distance(pointer);
                    if distance <= screen_radius {
                        Some((*index, distance))
                    } else {
                        None
                    }
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
        })
    }
}

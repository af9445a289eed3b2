use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, Vec2, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::plot::{
    LEGEND_HEIGHT, LEGEND_WIDTH, LEGEND_X, LEGEND_Y, MARGIN_LEFT, POINT_RADIUS, QuadNode,
    collect_cells, legend_spec,
};
use crate::tweets::ColorMetric;
use crate::util::excerpt;

use super::render_utils::{dim_color, draw_background, point_fill, world_to_screen};
use super::{SearchMatchCache, SwarmScene, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    fn update_screen_space(rect: Rect, pan: Vec2, zoom: f32, scene: &mut SwarmScene) {
        scene.view_scratch.screen_positions.clear();
        scene.view_scratch.screen_positions.reserve(
            scene
                .points
                .len()
                .saturating_sub(scene.view_scratch.screen_positions.capacity()),
        );
        for point in &scene.points {
            scene
                .view_scratch
                .screen_positions
                .push(world_to_screen(rect, pan, zoom, point.pos));
        }
    }

    fn refresh_quadtree_cells(scene: &mut SwarmScene) {
        let SwarmScene {
            points,
            view_scratch,
            ..
        } = scene;

        view_scratch.quadtree_positions.clear();
        view_scratch
            .quadtree_positions
            .extend(points.iter().map(|point| point.pos));

        view_scratch.quadtree_cells.clear();
        if let Some(tree) = QuadNode::build(&view_scratch.quadtree_positions) {
            collect_cells(&tree, 0, &mut view_scratch.quadtree_cells);
        }
    }

    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let search_query = self.search.trim();
        if search_query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.scene_revision == self.scene_revision
            && cached.query == search_query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let scene = self.scene.as_ref()?;
        let matcher = SkimMatcherV2::default();
        let matches = scene
            .points
            .iter()
            .enumerate()
            .filter_map(|(index, point)| {
                let record = self.dataset.records.get(point.record)?;
                fuzzy_match_score(&matcher, &record.text, search_query).map(|_score| index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: search_query.to_owned(),
            scene_revision: self.scene_revision,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_swarm(&mut self, ui: &mut Ui) {
        if self.scene_dirty {
            self.rebuild_scene();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        if self.auto_fit {
            self.fit_view(rect);
        }
        self.handle_canvas_zoom(ui, rect, &response);
        self.handle_canvas_pan(&response);
        if response.dragged() {
            ui.ctx().request_repaint();
        }

        draw_background(&painter, rect, self.pan, self.zoom);

        let matches = self.cached_search_matches();
        let pan = self.pan;
        let zoom = self.zoom;
        let metric = self.metric;
        let show_quadtree_overlay = self.show_quadtree_overlay;
        let screen_radius = (POINT_RADIUS * zoom).max(0.5);

        let Some(scene) = self.scene.as_mut() else {
            self.visible_point_count = 0;
            return;
        };

        Self::update_screen_space(rect, pan, zoom, scene);
        Self::visible_indices_into(rect, screen_radius, &mut scene.view_scratch);
        self.visible_point_count = scene.view_scratch.visible_indices.len();

        let band_font = FontId::proportional((22.0 * zoom).clamp(9.0, 44.0));
        for band in &scene.bands {
            let anchor = world_to_screen(rect, pan, zoom, vec2(MARGIN_LEFT * 0.5, band.center_y));
            painter.text(
                anchor,
                Align2::CENTER_CENTER,
                band.label,
                band_font.clone(),
                Color32::from_gray(40),
            );
        }

        if show_quadtree_overlay {
            Self::refresh_quadtree_cells(scene);
            for cell in &scene.view_scratch.quadtree_cells {
                let min = cell.center - vec2(cell.half_extent, cell.half_extent);
                let max = cell.center + vec2(cell.half_extent, cell.half_extent);
                let top_left = world_to_screen(rect, pan, zoom, vec2(min.x, min.y));
                let top_right = world_to_screen(rect, pan, zoom, vec2(max.x, min.y));
                let bottom_right = world_to_screen(rect, pan, zoom, vec2(max.x, max.y));
                let bottom_left = world_to_screen(rect, pan, zoom, vec2(min.x, max.y));

                let alpha = if cell.is_leaf { 110 } else { 55 };
                let line_width: f32 =
                    (1.4_f32 - (cell.depth as f32 * 0.09_f32)).clamp(0.45_f32, 1.4_f32);
                let stroke = Stroke::new(
                    line_width,
                    Color32::from_rgba_unmultiplied(106, 198, 255, alpha),
                );

                painter.line_segment([top_left, top_right], stroke);
                painter.line_segment([top_right, bottom_right], stroke);
                painter.line_segment([bottom_right, bottom_left], stroke);
                painter.line_segment([bottom_left, top_left], stroke);
            }
        }

        let hovered = Self::hovered_index(
            ui,
            &scene.view_scratch.visible_indices,
            &scene.view_scratch.screen_positions,
            screen_radius,
        );

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let pending_toggle = if response.clicked_by(egui::PointerButton::Primary) {
            hovered.and_then(|(index, _distance)| {
                scene.points.get(index).and_then(|point| {
                    self.dataset
                        .records
                        .get(point.record)
                        .map(|record| (record.id.clone(), record.text.clone()))
                })
            })
        } else {
            None
        };

        let search_active = matches
            .as_ref()
            .is_some_and(|matched| !matched.is_empty());
        let outline = Stroke::new((2.0 * zoom).clamp(0.8, 6.0), Color32::BLACK);

        for &index in &scene.view_scratch.visible_indices {
            let point = &scene.points[index];
            let position = scene.view_scratch.screen_positions[index];

            let is_match = matches
                .as_ref()
                .is_some_and(|matched| matched.contains(&index));
            let fill = if search_active && !is_match {
                dim_color(point_fill(point.fill), 0.35)
            } else {
                point_fill(point.fill)
            };
            painter.circle_filled(position, screen_radius, fill);

            let is_selected = self
                .dataset
                .records
                .get(point.record)
                .is_some_and(|record| self.selection.contains(&record.id));
            if is_selected {
                painter.circle_stroke(position, screen_radius, outline);
            }
        }

        Self::draw_legend(&painter, rect, pan, zoom, metric);

        if let Some((hovered_index, _distance)) = hovered
            && let Some(point) = scene.points.get(hovered_index)
            && let Some(record) = self.dataset.records.get(point.record)
        {
            let position = scene.view_scratch.screen_positions[hovered_index];
            painter.circle_stroke(
                position,
                screen_radius + 2.0,
                Stroke::new(1.2, Color32::from_gray(70)),
            );

            let readout = format!(
                "{}  |  {} {:.2}  |  {}",
                record.month,
                metric.label(),
                record.metric(metric),
                excerpt(&record.text, 90)
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                readout,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if let Some((id, text)) = pending_toggle {
            self.selection.toggle(&id, &text);
        }
    }

    fn draw_legend(painter: &egui::Painter, rect: Rect, pan: Vec2, zoom: f32, metric: ColorMetric) {
        let spec = legend_spec(metric);
        let slices = 100usize;
        let step = LEGEND_HEIGHT / slices as f32;

        for slice in 0..slices {
            // Offset 1.0 sits at the top of the bar, next to the high label.
            let offset = 1.0 - ((slice as f32 + 0.5) / slices as f32);
            let top_left = world_to_screen(
                rect,
                pan,
                zoom,
                vec2(LEGEND_X, LEGEND_Y + step * slice as f32),
            );
            let bottom_right = world_to_screen(
                rect,
                pan,
                zoom,
                vec2(LEGEND_X + LEGEND_WIDTH, LEGEND_Y + step * (slice as f32 + 1.0)),
            );
            painter.rect_filled(
                Rect::from_min_max(top_left, bottom_right),
                0.0,
                spec.color_at(offset),
            );
        }

        let corners = [
            world_to_screen(rect, pan, zoom, vec2(LEGEND_X, LEGEND_Y)),
            world_to_screen(rect, pan, zoom, vec2(LEGEND_X + LEGEND_WIDTH, LEGEND_Y)),
            world_to_screen(
                rect,
                pan,
                zoom,
                vec2(LEGEND_X + LEGEND_WIDTH, LEGEND_Y + LEGEND_HEIGHT),
            ),
            world_to_screen(rect, pan, zoom, vec2(LEGEND_X, LEGEND_Y + LEGEND_HEIGHT)),
        ];
        let frame = Stroke::new(1.0, Color32::from_gray(120));
        painter.line_segment([corners[0], corners[1]], frame);
        painter.line_segment([corners[1], corners[2]], frame);
        painter.line_segment([corners[2], corners[3]], frame);
        painter.line_segment([corners[3], corners[0]], frame);

        // Labels sit to the right of the bar, centered on its ends.
        let label_x = LEGEND_X + LEGEND_WIDTH + 5.0;
        let label_font = FontId::proportional((15.0 * zoom).clamp(8.0, 30.0));
        painter.text(
            world_to_screen(rect, pan, zoom, vec2(label_x, LEGEND_Y)),
            Align2::LEFT_CENTER,
            spec.high_label,
            label_font.clone(),
            Color32::from_gray(40),
        );
        painter.text(
            world_to_screen(rect, pan, zoom, vec2(label_x, LEGEND_Y + LEGEND_HEIGHT)),
            Align2::LEFT_CENTER,
            spec.low_label,
            label_font,
            Color32::from_gray(40),
        );
    }
}

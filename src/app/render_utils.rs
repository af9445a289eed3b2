use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, vec2};

use crate::plot::{CANVAS_HEIGHT, CANVAS_WIDTH};

const BACKDROP: Color32 = Color32::from_rgb(34, 38, 44);
const CANVAS_PAPER: Color32 = Color32::WHITE;
const CANVAS_EDGE: Color32 = Color32::from_gray(120);

pub(super) fn canvas_center() -> Vec2 {
    vec2(CANVAS_WIDTH * 0.5, CANVAS_HEIGHT * 0.5)
}

/// Maps canvas coordinates (0..width, 0..height, y down) to screen pixels.
pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + (world - canvas_center()) * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom + canvas_center()
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// Dark surround with the white plot sheet on top, so the canvas edge stays
/// readable at any pan or zoom.
pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, BACKDROP);

    let top_left = world_to_screen(rect, pan, zoom, Vec2::ZERO);
    let bottom_right = world_to_screen(rect, pan, zoom, vec2(CANVAS_WIDTH, CANVAS_HEIGHT));
    let sheet = Rect::from_min_max(top_left, bottom_right);

    painter.rect_filled(sheet, 0.0, CANVAS_PAPER);

    let stroke = Stroke::new(1.0, CANVAS_EDGE);
    painter.line_segment([sheet.left_top(), sheet.right_top()], stroke);
    painter.line_segment([sheet.right_top(), sheet.right_bottom()], stroke);
    painter.line_segment([sheet.right_bottom(), sheet.left_bottom()], stroke);
    painter.line_segment([sheet.left_bottom(), sheet.left_top()], stroke);
}

/// Fill with the 0.7 alpha every point is drawn at.
pub(super) fn point_fill(color: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 178)
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn world_and_screen_transforms_round_trip() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1200.0, 800.0));
        let pan = vec2(14.0, -30.0);
        let zoom = 0.8;

        let world = vec2(350.0, 260.0);
        let back = screen_to_world(rect, pan, zoom, world_to_screen(rect, pan, zoom, world));
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn canvas_center_maps_to_view_center_at_zero_pan() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1000.0, 600.0));
        let screen = world_to_screen(
            rect,
            Vec2::ZERO,
            1.0,
            vec2(CANVAS_WIDTH * 0.5, CANVAS_HEIGHT * 0.5),
        );
        assert_eq!(screen, rect.center());
    }

    #[test]
    fn offscreen_circles_are_culled() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));
        assert!(circle_visible(rect, pos2(104.0, 50.0), 8.0));
        assert!(!circle_visible(rect, pos2(120.0, 50.0), 8.0));
    }
}

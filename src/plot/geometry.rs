/// Band rows, top to bottom. Fixed configuration rather than data-derived so
/// an empty month still reserves its row.
pub const MONTH_BANDS: [&str; 3] = ["March", "April", "May"];

pub const CANVAS_WIDTH: f32 = 2000.0;
pub const CANVAS_HEIGHT: f32 = 900.0;

pub const MARGIN_TOP: f32 = 100.0;
pub const MARGIN_RIGHT: f32 = 20.0;
pub const MARGIN_BOTTOM: f32 = 50.0;
pub const MARGIN_LEFT: f32 = 250.0;

/// Extra breathing room inside the horizontal margins before the first slot
/// and after the last one.
const SLOT_INSET_LEFT: f32 = 100.0;
const SLOT_INSET_RIGHT: f32 = 300.0;

/// Inner and outer padding of the band scale, as a fraction of the band step.
const BAND_PADDING: f32 = 0.5;

pub const POINT_RADIUS: f32 = 8.0;

pub const LEGEND_WIDTH: f32 = 20.0;
pub const LEGEND_HEIGHT: f32 = 200.0;
pub const LEGEND_X: f32 = CANVAS_WIDTH - MARGIN_RIGHT - 100.0;
pub const LEGEND_Y: f32 = MARGIN_TOP;

/// Maps band rank to a vertical row, with uniform step and padded ends,
/// centered inside the vertical margins.
#[derive(Clone, Copy, Debug)]
pub struct BandScale {
    start: f32,
    step: f32,
    bandwidth: f32,
}

impl BandScale {
    pub fn new(band_count: usize) -> Self {
        let extent = (CANVAS_HEIGHT - MARGIN_BOTTOM) - MARGIN_TOP;
        let count = band_count.max(1) as f32;
        let step = extent / (count - BAND_PADDING + BAND_PADDING * 2.0);
        let start = MARGIN_TOP + (extent - step * (count - BAND_PADDING)) * 0.5;

        Self {
            start,
            step,
            bandwidth: step * (1.0 - BAND_PADDING),
        }
    }

    pub fn top(&self, band: usize) -> f32 {
        self.start + self.step * band as f32
    }

    pub fn center(&self, band: usize) -> f32 {
        self.top(band) + self.bandwidth * 0.5
    }
}

/// Maps rank-within-band to an evenly spaced x slot across the plot area.
/// Callers skip empty bands; the clamp only guards the division.
#[derive(Clone, Copy, Debug)]
pub struct SlotScale {
    origin: f32,
    span: f32,
    count: usize,
}

impl SlotScale {
    pub fn new(count: usize) -> Self {
        let origin = MARGIN_LEFT + SLOT_INSET_LEFT;
        let end = CANVAS_WIDTH - MARGIN_RIGHT - SLOT_INSET_RIGHT;

        Self {
            origin,
            span: end - origin,
            count: count.max(1),
        }
    }

    pub fn slot(&self, rank: usize) -> f32 {
        self.origin + self.span * (rank as f32 / self.count as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_rows_are_uniformly_spaced() {
        let scale = BandScale::new(MONTH_BANDS.len());
        let gap_one = scale.center(1) - scale.center(0);
        let gap_two = scale.center(2) - scale.center(1);
        assert!((gap_one - gap_two).abs() < 1e-3);
        assert!(gap_one > scale.bandwidth);
    }

    #[test]
    fn band_rows_stay_inside_vertical_margins() {
        let scale = BandScale::new(MONTH_BANDS.len());
        assert!(scale.top(0) >= MARGIN_TOP);
        assert!(scale.top(2) + scale.bandwidth <= CANVAS_HEIGHT - MARGIN_BOTTOM);
    }

    #[test]
    fn middle_band_is_vertically_centered() {
        let scale = BandScale::new(3);
        let midline = MARGIN_TOP + ((CANVAS_HEIGHT - MARGIN_BOTTOM) - MARGIN_TOP) * 0.5;
        assert!((scale.center(1) - midline).abs() < 1e-3);
    }

    #[test]
    fn slots_start_at_the_left_inset_and_step_evenly() {
        let scale = SlotScale::new(4);
        assert_eq!(scale.slot(0), MARGIN_LEFT + 100.0);
        let step_one = scale.slot(1) - scale.slot(0);
        let step_two = scale.slot(2) - scale.slot(1);
        assert!((step_one - step_two).abs() < 1e-3);
    }

    #[test]
    fn single_slot_band_uses_its_assigned_slot() {
        let scale = SlotScale::new(1);
        assert_eq!(scale.slot(0), MARGIN_LEFT + 100.0);
    }
}

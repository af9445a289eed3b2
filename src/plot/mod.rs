mod color;
mod geometry;
mod layout;
mod quadtree;

pub use color::{LegendSpec, legend_spec, metric_color};
pub use geometry::{
    BandScale, CANVAS_HEIGHT, CANVAS_WIDTH, LEGEND_HEIGHT, LEGEND_WIDTH, LEGEND_X, LEGEND_Y,
    MARGIN_LEFT, MONTH_BANDS, POINT_RADIUS, SlotScale,
};
pub use layout::{MIN_SEPARATION, relax_band};
pub use quadtree::{QuadCell, QuadNode, collect_cells};

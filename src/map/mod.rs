mod color;
mod geometry;
mod projection;
mod renderer;

pub use color::{fill_intensity, ylorrd, EDGE_COLOR, SATURATION_COUNT};
pub use projection::{Window, LAT_RANGE, LON_RANGE};
pub use renderer::{draw_province, MapRenderer, ShapeStyle};

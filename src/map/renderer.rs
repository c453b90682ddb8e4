use crate::braille::BrailleCanvas;
use crate::data::{PolygonStore, ProvincePolygon, Ring};
use crate::map::color::{ylorrd, EDGE_COLOR};
use crate::map::geometry::{draw_line, scanline_cells};
use crate::map::projection::Window;
use ratatui::style::Color;
use rayon::prelude::*;
use std::collections::HashMap;

/// Edge and fill colour shared by every shape of one province
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeStyle {
    pub edge: Color,
    pub fill: Color,
}

impl ShapeStyle {
    /// Gray edge, fill taken from the YlOrRd scale
    pub fn for_intensity(intensity: f64) -> Self {
        Self { edge: EDGE_COLOR, fill: ylorrd(intensity) }
    }
}

/// Choropleth renderer over the province boundaries
pub struct MapRenderer {
    store: PolygonStore,
}

impl MapRenderer {
    pub fn new(store: PolygonStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &PolygonStore {
        &self.store
    }

    /// Render every province onto a `cols` x `rows` canvas. Provinces missing
    /// from `intensities` are drawn at intensity 0.
    pub fn render(&self, intensities: &HashMap<String, f64>, cols: usize, rows: usize) -> BrailleCanvas {
        let window = Window::thailand(cols, rows);
        let mut canvas = BrailleCanvas::new(cols, rows);

        // Store order, so overlapping fills are deterministic
        let shapes: usize = self
            .store
            .iter()
            .map(|polygon| {
                let intensity = intensities.get(&polygon.province).copied().unwrap_or(0.0);
                draw_province(&mut canvas, &window, polygon, ShapeStyle::for_intensity(intensity))
            })
            .sum();
        tracing::trace!(cols, rows, shapes, "map rendered");

        canvas
    }
}

/// Draw one province: each outline filled and stroked with the same style.
/// Returns the number of shapes drawn.
pub fn draw_province(canvas: &mut BrailleCanvas, window: &Window, polygon: &ProvincePolygon, style: ShapeStyle) -> usize {
    let outlines = polygon.outlines();
    let (cols, rows) = (canvas.width(), canvas.height());

    // Rasterise every shape in parallel; large MultiPolygons carry dozens of islands
    let cells: Vec<(usize, usize)> = outlines
        .par_iter()
        .flat_map_iter(|ring| fill_cells(ring, window, cols, rows))
        .collect();
    for (cx, cy) in cells {
        canvas.fill_cell(cx, cy, style.fill);
    }

    for ring in &outlines {
        stroke_ring(canvas, window, ring, style.edge);
    }
    outlines.len()
}

/// Cells covered by `ring`. A ring too small to contain any cell centre still
/// colours the cell under the middle of its bounding box.
fn fill_cells(ring: &Ring, window: &Window, cols: usize, rows: usize) -> Vec<(usize, usize)> {
    let projected: Vec<(f64, f64)> = ring.iter().map(|&(lon, lat)| window.project(lon, lat)).collect();
    let cells = scanline_cells(&projected, cols, rows);
    if !cells.is_empty() || projected.is_empty() {
        return cells;
    }

    let (min_x, min_y, max_x, max_y) = projected.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(min_x, min_y, max_x, max_y), &(x, y)| (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)),
    );
    let cx = ((min_x + max_x) / 2.0 / 2.0).floor();
    let cy = ((min_y + max_y) / 2.0 / 4.0).floor();
    if cx >= 0.0 && cy >= 0.0 && (cx as usize) < cols && (cy as usize) < rows {
        vec![(cx as usize, cy as usize)]
    } else {
        Vec::new()
    }
}

fn stroke_ring(canvas: &mut BrailleCanvas, window: &Window, ring: &Ring, color: Color) {
    let mut prev: Option<(i32, i32)> = None;
    for &(lon, lat) in ring.iter().chain(ring.first()) {
        let dot = window.to_dot(lon, lat);
        if let Some(prev) = prev {
            if window.segment_might_be_visible(prev, dot) {
                draw_line(canvas, prev, dot, color);
            }
        }
        prev = Some(dot);
    }
}

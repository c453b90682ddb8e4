use crate::braille::BrailleCanvas;
use ratatui::style::Color;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: Color) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let (mut x, mut y) = (x0, y0);

    loop {
        canvas.plot(x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Character cells whose centre lies inside `ring` (even-odd rule).
/// `ring` is in dot coordinates; the closing edge is implied.
pub fn scanline_cells(ring: &[(f64, f64)], cols: usize, rows: usize) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    if ring.len() < 3 || cols == 0 {
        return cells;
    }

    let (min_y, max_y) = ring
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    // Rows whose centre (row*4 + 2) falls within the ring's extent
    let first_row = ((min_y - 2.0) / 4.0).ceil().max(0.0) as usize;
    let last_row = (((max_y - 2.0) / 4.0).floor().max(-1.0) + 1.0) as usize;

    let mut crossings: Vec<f64> = Vec::new();
    for row in first_row..last_row.min(rows) {
        let y = row as f64 * 4.0 + 2.0;
        crossings.clear();

        for (i, &(x0, y0)) in ring.iter().enumerate() {
            let (x1, y1) = ring[(i + 1) % ring.len()];
            if (y0 <= y) != (y1 <= y) {
                crossings.push(x0 + (y - y0) / (y1 - y0) * (x1 - x0));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for span in crossings.chunks_exact(2) {
            // Cell centre x = col*2 + 1
            let start = ((span[0] - 1.0) / 2.0).ceil().max(0.0);
            let end = ((span[1] - 1.0) / 2.0).floor().min((cols - 1) as f64);
            if end < start {
                continue;
            }
            cells.extend((start as usize..=end as usize).map(|col| (col, row)));
        }
    }

    cells
}

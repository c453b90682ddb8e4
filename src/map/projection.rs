/// Longitude range always kept in view
pub const LON_RANGE: (f64, f64) = (95.0, 110.0);
/// Latitude range always kept in view
pub const LAT_RANGE: (f64, f64) = (0.0, 25.0);

/// Dot coordinates are clamped to this magnitude so line stepping stays within `i32`
const DOT_LIMIT: f64 = (1 << 20) as f64;

/// Fixed lon/lat window mapped onto a Braille dot grid with one scale for
/// both axes. The window is centred; the spare axis shows extra map.
#[derive(Clone, Debug)]
pub struct Window {
    /// Canvas dot width
    pub width: usize,
    /// Canvas dot height
    pub height: usize,
    /// Dots per degree
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Window {
    /// Window around Thailand for a canvas of `cols` x `rows` characters
    pub fn thailand(cols: usize, rows: usize) -> Self {
        // Braille gives 2x4 resolution per character
        Self::new(LON_RANGE, LAT_RANGE, cols * 2, rows * 4)
    }

    pub fn new(lon: (f64, f64), lat: (f64, f64), width: usize, height: usize) -> Self {
        let lon_span = lon.1 - lon.0;
        let lat_span = lat.1 - lat.0;
        let scale = (width as f64 / lon_span).min(height as f64 / lat_span);

        // Centre of the requested window lands on the centre of the canvas
        let offset_x = width as f64 / 2.0 - (lon.0 + lon_span / 2.0) * scale;
        let offset_y = height as f64 / 2.0 + (lat.0 + lat_span / 2.0) * scale;

        Self { width, height, scale, offset_x, offset_y }
    }

    /// Project (lon, lat) to fractional dot coordinates, y growing downwards
    #[inline(always)]
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        (self.offset_x + lon * self.scale, self.offset_y - lat * self.scale)
    }

    /// Project to the dot that contains the point
    #[inline(always)]
    pub fn to_dot(&self, lon: f64, lat: f64) -> (i32, i32) {
        let (x, y) = self.project(lon, lat);
        (
            x.floor().clamp(-DOT_LIMIT, DOT_LIMIT) as i32,
            y.floor().clamp(-DOT_LIMIT, DOT_LIMIT) as i32,
        )
    }

    /// Check if a segment's bounding box touches the canvas
    pub fn segment_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0 && min_x < self.width as i32 && max_y >= 0 && min_y < self.height as i32
    }
}

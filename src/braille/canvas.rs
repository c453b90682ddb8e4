use ratatui::style::Color;

/// Braille Unicode canvas with a background fill per character cell.
/// Each cell holds a 2x4 dot grid (U+2800..U+28FF), the colour the dots are
/// drawn in, and an optional fill painted behind them.
pub struct BrailleCanvas {
    width: usize,  // Characters
    height: usize, // Characters
    dots: Vec<u8>,
    ink: Vec<Option<Color>>,
    fills: Vec<Option<Color>>,
}

impl BrailleCanvas {
    /// Create a blank canvas of `width` x `height` characters.
    /// Effective dot resolution: width*2 x height*4
    pub fn new(width: usize, height: usize) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            dots: vec![0; cells],
            ink: vec![None; cells],
            fills: vec![None; cells],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn index(&self, cx: usize, cy: usize) -> Option<usize> {
        (cx < self.width && cy < self.height).then(|| cy * self.width + cx)
    }

    /// Set a dot and colour its cell.
    /// Dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    pub fn plot(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let Some(idx) = self.index(x / 2, y / 4) else {
            return;
        };

        let bit = match (x % 2, y % 4) {
            (0, 0) => 0x01,
            (1, 0) => 0x08,
            (0, 1) => 0x02,
            (1, 1) => 0x10,
            (0, 2) => 0x04,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            _ => 0x80,
        };

        self.dots[idx] |= bit;
        self.ink[idx] = Some(color);
    }

    /// Paint the background of a character cell; later fills win
    pub fn fill_cell(&mut self, cx: usize, cy: usize, color: Color) {
        if let Some(idx) = self.index(cx, cy) {
            self.fills[idx] = Some(color);
        }
    }

    /// Braille glyph of a cell, `None` when no dot is set
    pub fn glyph(&self, cx: usize, cy: usize) -> Option<char> {
        let idx = self.index(cx, cy)?;
        match self.dots[idx] {
            0 => None,
            bits => char::from_u32(0x2800 + bits as u32),
        }
    }

    pub fn ink(&self, cx: usize, cy: usize) -> Option<Color> {
        self.index(cx, cy).and_then(|idx| self.ink[idx])
    }

    pub fn fill(&self, cx: usize, cy: usize) -> Option<Color> {
        self.index(cx, cy).and_then(|idx| self.fills[idx])
    }

    /// Glyph rows as strings, blank cells rendered as U+2800
    #[cfg(test)]
    pub fn to_string(&self) -> String {
        self.dots
            .chunks(self.width.max(1))
            .map(|row| {
                row.iter()
                    .map(|&b| char::from_u32(0x2800 + b as u32).unwrap_or(' '))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

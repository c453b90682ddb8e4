use ratatui::style::Color;

/// Counts at or above this get the darkest colour
pub const SATURATION_COUNT: u32 = 5;

/// Province outline colour
pub const EDGE_COLOR: Color = Color::Rgb(128, 128, 128);

/// ColorBrewer YlOrRd, light to dark
const YL_OR_RD: [(u8, u8, u8); 9] = [
    (0xff, 0xff, 0xcc),
    (0xff, 0xed, 0xa0),
    (0xfe, 0xd9, 0x76),
    (0xfe, 0xb2, 0x4c),
    (0xfd, 0x8d, 0x3c),
    (0xfc, 0x4e, 0x2a),
    (0xe3, 0x1a, 0x1c),
    (0xbd, 0x00, 0x26),
    (0x80, 0x00, 0x26),
];

/// `min(count, 5) / 5`
pub fn fill_intensity(count: u32) -> f64 {
    count.min(SATURATION_COUNT) as f64 / SATURATION_COUNT as f64
}

/// Sample the yellow-orange-red scale at `t` in [0, 1] (clamped)
pub fn ylorrd(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (YL_OR_RD.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(YL_OR_RD.len() - 1);
    let frac = pos - lo as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (YL_OR_RD[lo], YL_OR_RD[hi]);
    Color::Rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

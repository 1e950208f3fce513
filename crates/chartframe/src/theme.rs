// File: crates/chartframe/src/theme.rs
// Summary: Chart color themes, HSL helpers and a per-owner hue sequence.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub axis_label: skia::Color,
    pub grid_border: skia::Color,
    pub grid_lines: skia::Color,
    /// Neutral series fill.
    pub value: skia::Color,
    /// Highlight color for single-series charts.
    pub accent: skia::Color,
}

/// Primary-axis series color.
pub const PURPLE: skia::Color = skia::Color::new(0xffe4_32e4);
/// Secondary-axis series color.
pub const BLUE: skia::Color = skia::Color::new(0xff4b_4bde);

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            axis_label: skia::Color::from_rgb(0xb1, 0xb1, 0xb1),
            grid_border: skia::Color::from_rgb(0x3a, 0x3a, 0x3a),
            grid_lines: skia::Color::from_rgb(0x2a, 0x2a, 0x2a),
            value: skia::Color::from_rgb(0x9a, 0x9a, 0x9a),
            accent: skia::Color::from_rgb(0x05, 0xa3, 0x5a),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            axis_label: skia::Color::from_rgb(0x1b, 0x1b, 0x1b),
            grid_border: skia::Color::from_rgb(0x3a, 0x3a, 0x3a),
            grid_lines: skia::Color::from_rgb(0xda, 0xda, 0xda),
            value: skia::Color::from_rgb(0x4d, 0x4d, 0x4d),
            accent: skia::Color::from_rgb(0x20, 0x7a, 0x46),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}

/// Opaque color from hue (degrees), saturation and lightness (0..=1).
pub fn hsl(h: f64, s: f64, l: f64) -> skia::Color {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    skia::Color::from_rgb(to_u8(r), to_u8(g), to_u8(b))
}

/// Sequence of well-separated hues: red, then the odd quarters, eighths and
/// sixteenths of the color wheel. Starts past red and wraps after fifteen.
/// Each owner keeps its own position.
#[derive(Clone, Debug)]
pub struct HueGenerator {
    hues: Vec<f64>,
    idx: usize,
}

impl HueGenerator {
    pub fn new() -> Self {
        let mut hues = Vec::new();
        let mut denom = 2u32;
        let mut num = 0u32;
        while denom <= 16 {
            while num < denom {
                hues.push(num as f64 / denom as f64 * 360.0);
                num += 2;
            }
            denom *= 2;
            num = 1;
        }
        Self { hues, idx: 1 }
    }

    /// Next hue in degrees.
    pub fn next_hue(&mut self) -> f64 {
        let h = self.hues[self.idx % self.hues.len()];
        self.idx += 1;
        h
    }

    /// Next color at 70% saturation, 50% lightness.
    pub fn next_color(&mut self) -> skia::Color {
        hsl(self.next_hue(), 0.7, 0.5)
    }
}

impl Default for HueGenerator {
    fn default() -> Self { Self::new() }
}

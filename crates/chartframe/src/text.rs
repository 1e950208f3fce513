// File: crates/chartframe/src/text.rs
// Summary: Text measurement seam and centered label drawing with Skia fonts.

use std::sync::atomic::{AtomicBool, Ordering};

use skia_safe as skia;

/// Preferred label families, first match wins.
const FAMILIES: [&str; 6] = ["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "Liberation Sans"];
/// Advance per char, relative to font size, used when no typeface resolves.
const FALLBACK_ADVANCE: f32 = 0.6;

static MISSING_TYPEFACE_LOGGED: AtomicBool = AtomicBool::new(false);

/// System typeface for labels: the first installed preferred family, else the
/// font manager's default face.
fn label_typeface() -> Option<skia::Typeface> {
    let mgr = skia::FontMgr::default();
    let style = skia::FontStyle::normal();
    FAMILIES
        .iter()
        .find_map(|family| mgr.match_family_style(family, style))
        .or_else(|| mgr.legacy_make_typeface(None, style))
}

/// Pixel width of rendered text, as used for axis-column sizing.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f32;
}

/// Deterministic measurer: every char advances by the same width.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvance(pub f32);

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.0
    }
}

/// Font used for tick labels and messages. Text is drawn centered on the
/// given point, horizontally and vertically.
///
/// Without any installed typeface, text cannot be drawn: an error is logged
/// once, drawing is skipped and widths are estimated from the font size so
/// axis columns keep their room.
pub struct LabelFont {
    font: skia::Font,
    resolved: bool,
}

impl LabelFont {
    pub fn new(size: f32) -> Self {
        let size = size.max(1.0);
        match label_typeface() {
            Some(typeface) => Self { font: skia::Font::from_typeface(typeface, size), resolved: true },
            None => {
                if !MISSING_TYPEFACE_LOGGED.swap(true, Ordering::Relaxed) {
                    tracing::error!("no system typeface found; chart text will not be drawn");
                }
                let mut font = skia::Font::default();
                font.set_size(size);
                Self { font, resolved: false }
            }
        }
    }

    pub fn size(&self) -> f32 {
        self.font.size()
    }

    /// Whether a real typeface backs this font.
    pub fn has_typeface(&self) -> bool {
        self.resolved
    }

    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, x: f64, y: f64, color: skia::Color) {
        if !self.resolved {
            return;
        }
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_color(color);
        let w = self.measure(text);
        let (_, metrics) = self.font.metrics();
        // ascent is negative; shift the baseline so the glyph box straddles y
        let baseline = y as f32 - (metrics.ascent + metrics.descent) / 2.0;
        canvas.draw_str(text, (x as f32 - w / 2.0, baseline), &self.font, &paint);
    }

    /// Like [`Self::draw_centered`], shrinking the font so the text fits `max_width`.
    pub fn draw_centered_fit(&self, canvas: &skia::Canvas, text: &str, x: f64, y: f64, max_width: f64, color: skia::Color) {
        let w = self.measure(text) as f64;
        if w <= max_width || w <= 0.0 {
            self.draw_centered(canvas, text, x, y, color);
            return;
        }
        let scaled = LabelFont::new((self.size() as f64 * max_width / w) as f32);
        scaled.draw_centered(canvas, text, x, y, color);
    }
}

impl TextMeasure for LabelFont {
    fn measure(&self, text: &str) -> f32 {
        if !self.resolved {
            return FixedAdvance(self.size() * FALLBACK_ADVANCE).measure(text);
        }
        self.font.measure_str(text, None).0
    }
}

// File: crates/chartframe/src/region.rs
// Summary: Screen-space regions of a canvas with data<->screen translators and scoped clipping.

use skia_safe as skia;

use crate::extents::Extents;

/// Saves the canvas state on creation and restores it on drop, including
/// during unwinding. Nested guards unwind in reverse order of creation.
pub(crate) struct SavedState<'c> {
    canvas: &'c skia::Canvas,
    count: usize,
}

impl<'c> SavedState<'c> {
    pub(crate) fn save(canvas: &'c skia::Canvas) -> Self {
        let count = canvas.save();
        Self { canvas, count }
    }
}

impl Drop for SavedState<'_> {
    fn drop(&mut self) {
        self.canvas.restore_to_count(self.count);
    }
}

/// Forward and inverse mappings between one data-space [`Extents`] and a
/// region's screen rectangle. Screen y grows downward, data y upward.
///
/// Produced fresh for every [`Region::plot`] call; never cached on the region.
#[derive(Clone, Copy)]
pub struct Translator<'c> {
    x_min: f64,
    y_min: f64,
    x_range: f64,
    y_range: f64,
    screen_min_x: f64,
    screen_max_y: f64,
    screen_w: f64,
    screen_h: f64,
    x_factor: f64,
    y_factor: f64,
    canvas: Option<&'c skia::Canvas>,
}

impl<'c> Translator<'c> {
    fn new(screen: &Extents, data: &Extents, canvas: Option<&'c skia::Canvas>) -> Self {
        let x_range = data.x_range();
        let y_range = data.y_range();
        let screen_w = screen.x_range();
        let screen_h = screen.y_range();
        Self {
            x_min: data.x.min,
            y_min: data.y.min,
            x_range,
            y_range,
            screen_min_x: screen.x.min,
            screen_max_y: screen.y.max,
            screen_w,
            screen_h,
            x_factor: screen_w / x_range,
            y_factor: screen_h / y_range,
            canvas,
        }
    }

    #[inline]
    pub fn x(&self, x: f64) -> f64 {
        (x - self.x_min) * self.x_factor + self.screen_min_x
    }

    #[inline]
    pub fn y(&self, y: f64) -> f64 {
        self.screen_max_y - (y - self.y_min) * self.y_factor
    }

    #[inline]
    pub fn unx(&self, px: f64) -> f64 {
        (px - self.screen_min_x) / self.x_factor + self.x_min
    }

    #[inline]
    pub fn uny(&self, py: f64) -> f64 {
        self.y_min - (py - self.screen_max_y) / self.y_factor
    }

    /// Data width to pixels, ignoring the origin.
    #[inline]
    pub fn w(&self, w: f64) -> f64 {
        w / self.x_range * self.screen_w
    }

    /// Data height to pixels, ignoring the origin. Negated for the y flip.
    #[inline]
    pub fn h(&self, h: f64) -> f64 {
        -h / self.y_range * self.screen_h
    }

    /// Screen point for a data point, in Skia's scalar type.
    pub fn point(&self, x: f64, y: f64) -> skia::Point {
        skia::Point::new(self.x(x) as f32, self.y(y) as f32)
    }

    /// Affine matrix taking data coordinates to the same pixels as [`Self::x`]
    /// and [`Self::y`].
    pub fn data_matrix(&self) -> skia::Matrix {
        let sx = self.x_factor;
        let sy = -self.y_factor;
        let tx = self.screen_min_x - self.x_min * self.x_factor;
        let ty = self.screen_max_y + self.y_min * self.y_factor;
        skia::Matrix::new_all(
            sx as f32, 0.0, tx as f32,
            0.0, sy as f32, ty as f32,
            0.0, 0.0, 1.0,
        )
    }

    /// Run `f` with the data matrix pushed onto the canvas, popping it before
    /// returning. Fills issued inside land in data coordinates; strokes would
    /// be distorted, so stroke outside (see [`Self::data_path`]).
    ///
    /// Translators not produced by [`Region::plot`] have no canvas and run `f`
    /// untransformed.
    pub fn data_coords<R>(&self, f: impl FnOnce() -> R) -> R {
        match self.canvas {
            Some(canvas) => {
                let _saved = SavedState::save(canvas);
                canvas.concat(&self.data_matrix());
                f()
            }
            None => f(),
        }
    }

    /// Build a path in data coordinates and return it mapped to screen space.
    pub fn data_path(&self, build: impl FnOnce(&mut skia::Path)) -> skia::Path {
        let mut path = skia::Path::new();
        build(&mut path);
        path.transform(&self.data_matrix());
        path
    }
}

/// A fixed screen rectangle on a borrowed canvas. The borrow keeps the region
/// from outliving the surface that owns the canvas.
pub struct Region<'c> {
    canvas: &'c skia::Canvas,
    extents: Extents,
}

impl<'c> Region<'c> {
    pub fn new(canvas: &'c skia::Canvas, extents: Extents) -> Self {
        Self { canvas, extents }
    }

    pub fn extents(&self) -> &Extents {
        &self.extents
    }

    pub fn set_extents(&mut self, x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
        self.extents.set_extents(x_min, x_max, y_min, y_max);
    }

    pub fn width(&self) -> f64 {
        self.extents.x_range()
    }

    pub fn height(&self) -> f64 {
        self.extents.y_range()
    }

    /// Strict interior test in screen coordinates.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.extents.contains(x, y)
    }

    /// Mappings for `data` onto this region. `data_coords` is inert here; use
    /// [`Self::plot`] for a translator wired to the canvas.
    pub fn translator(&self, data: &Extents) -> Translator<'c> {
        Translator::new(&self.extents, data, None)
    }

    /// Clear the region's rectangle to transparent.
    pub fn clear(&self) {
        let mut paint = skia::Paint::default();
        paint.set_blend_mode(skia::BlendMode::Clear);
        self.canvas.draw_rect(screen_rect(&self.extents), &paint);
    }

    /// Draw clipped to this region with a translator for `data`.
    pub fn plot<R>(&self, data: &Extents, draw: impl FnOnce(&'c skia::Canvas, &Translator<'c>) -> R) -> R {
        self.plot_inner(data, draw, false)
    }

    /// Like [`Self::plot`] but without the clip, for labels that may spill
    /// past the region edge.
    pub fn plot_unmasked<R>(&self, data: &Extents, draw: impl FnOnce(&'c skia::Canvas, &Translator<'c>) -> R) -> R {
        self.plot_inner(data, draw, true)
    }

    fn plot_inner<R>(
        &self,
        data: &Extents,
        draw: impl FnOnce(&'c skia::Canvas, &Translator<'c>) -> R,
        skip_mask: bool,
    ) -> R {
        let canvas = self.canvas;
        let _saved = SavedState::save(canvas);
        if !skip_mask {
            canvas.clip_rect(screen_rect(&self.extents), skia::ClipOp::Intersect, false);
        }
        let tools = Translator::new(&self.extents, data, Some(canvas));
        draw(canvas, &tools)
    }
}

fn screen_rect(e: &Extents) -> skia::Rect {
    skia::Rect::from_ltrb(e.x.min as f32, e.y.min as f32, e.x.max as f32, e.y.max as f32)
}

/// Stroke a single segment in screen coordinates.
pub fn line(canvas: &skia::Canvas, x0: f64, y0: f64, x1: f64, y1: f64, paint: &skia::Paint) {
    canvas.draw_line((x0 as f32, y0 as f32), (x1 as f32, y1 as f32), paint);
}

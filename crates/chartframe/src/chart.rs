// File: crates/chartframe/src/chart.rs
// Summary: Shared chart state, the chart capability trait and per-pass drawing helpers.

use std::sync::Arc;
use std::time::Duration;

use skia_safe as skia;

use crate::clock::{SystemClock, TickSource};
use crate::error::{ChartError, ChartResult};
use crate::extents::Extents;
use crate::geometry::Point;
use crate::labels::{make_labels, Label, LabelSet};
use crate::layout::ChartLayout;
use crate::region::{line, Region};
use crate::surface::ChartSurface;
use crate::text::LabelFont;
use crate::theme::Theme;
use crate::types::ChartOptions;

/// Callbacks into the host application.
pub struct ChartReporters {
    pub resize: Box<dyn FnMut() + Send>,
    pub click: Box<dyn FnMut(f64, f64) + Send>,
    pub zoom: Box<dyn FnMut(bool) + Send>,
}

impl Default for ChartReporters {
    fn default() -> Self {
        Self {
            resize: Box::new(|| {}),
            click: Box::new(|_, _| {}),
            zoom: Box::new(|_| {}),
        }
    }
}

/// State every chart composes: its surface, layout, pointer, visibility and
/// the deferred-render flag.
pub struct ChartBase {
    surface: Option<ChartSurface>,
    opts: ChartOptions,
    layout: ChartLayout,
    mouse_pos: Option<Point>,
    visible: bool,
    render_scheduled: bool,
    last_wheel: Option<Duration>,
    clock: Arc<dyn TickSource>,
    reporters: ChartReporters,
}

impl ChartBase {
    /// Acquire a surface of `opts.width` x `opts.height`. On failure the error
    /// is logged and the chart stays inert: renders become no-ops.
    pub fn new(opts: ChartOptions) -> Self {
        let surface = acquire_surface(opts.width, opts.height);
        let layout = ChartLayout::initial(opts.width.max(0) as f64, opts.height.max(0) as f64, &opts);
        Self {
            surface,
            opts,
            layout,
            mouse_pos: None,
            visible: true,
            render_scheduled: false,
            last_wheel: None,
            clock: SystemClock::shared(),
            reporters: ChartReporters::default(),
        }
    }

    pub fn set_reporters(&mut self, reporters: ChartReporters) {
        self.reporters = reporters;
    }

    /// Time source for the wheel limiter.
    pub fn set_clock(&mut self, clock: Arc<dyn TickSource>) {
        self.clock = clock;
    }

    pub fn options(&self) -> &ChartOptions { &self.opts }
    pub fn theme(&self) -> &Theme { &self.opts.theme }
    pub fn layout(&self) -> &ChartLayout { &self.layout }
    pub fn set_layout(&mut self, layout: ChartLayout) { self.layout = layout; }
    pub fn surface(&self) -> Option<&ChartSurface> { self.surface.as_ref() }
    pub fn mouse_pos(&self) -> Option<Point> { self.mouse_pos }
    pub fn is_visible(&self) -> bool { self.visible }
    pub fn render_scheduled(&self) -> bool { self.render_scheduled }

    pub fn width(&self) -> f64 {
        self.surface.as_ref().map_or(0.0, |s| s.width() as f64)
    }

    pub fn height(&self) -> f64 {
        self.surface.as_ref().map_or(0.0, |s| s.height() as f64)
    }

    /// PNG of the last rendered frame.
    pub fn to_png(&self) -> ChartResult<Vec<u8>> {
        match self.surface.as_ref() {
            Some(surface) => surface.to_png(),
            None => Err(ChartError::SurfaceUnavailable("chart has no surface".into())),
        }
    }

    pub fn write_png(&self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        match self.surface.as_ref() {
            Some(surface) => surface.write_png(path),
            None => Err(ChartError::SurfaceUnavailable("chart has no surface".into()).into()),
        }
    }

    /// Font for tick labels at the configured size.
    pub fn label_font(&self) -> LabelFont {
        LabelFont::new(self.opts.font_size)
    }

    /// Resize the surface and reset the layout to its unmeasured guess.
    pub fn resize_surface(&mut self, width: i32, height: i32) {
        self.opts.width = width;
        self.opts.height = height;
        match self.surface.as_mut() {
            Some(surface) => {
                if let Err(err) = surface.resize(width, height) {
                    tracing::error!(%err, "resizing chart surface");
                    self.surface = None;
                }
            }
            None => self.surface = acquire_surface(width, height),
        }
        self.layout = ChartLayout::initial(self.width(), self.height(), &self.opts);
        (self.reporters.resize)();
    }

    /// Whether a render can run now. When it can't (hidden, no data yet, or
    /// nothing to draw on) the render is deferred until visibility returns.
    pub fn ready(&mut self, has_data: bool) -> bool {
        let drawable = self.surface.as_ref().map_or(false, ChartSurface::is_drawable);
        if !has_data || !self.visible || !drawable {
            self.render_scheduled = true;
            return false;
        }
        true
    }

    /// Consume the deferred-render flag.
    pub fn take_scheduled(&mut self) -> bool {
        std::mem::take(&mut self.render_scheduled)
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_mouse_pos(&mut self, pos: Option<Point>) {
        self.mouse_pos = pos;
    }

    /// Rate-limit wheel zooms: true at most once per cooldown window.
    pub fn wheel_allowed(&mut self) -> bool {
        let now = self.clock.now();
        if let Some(last) = self.last_wheel {
            if now.saturating_sub(last) < self.opts.wheel_cooldown {
                return false;
            }
        }
        self.last_wheel = Some(now);
        true
    }

    pub fn report_click(&mut self, x: f64, y: f64) {
        (self.reporters.click)(x, y);
    }

    pub fn report_zoom(&mut self, bigger: bool) {
        (self.reporters.zoom)(bigger);
    }

    /// Run one render pass against the surface.
    pub fn paint<R>(&mut self, f: impl FnOnce(&RenderPass<'_>) -> R) -> ChartResult<R> {
        let Self { surface, opts, layout, .. } = self;
        let surface = surface
            .as_mut()
            .ok_or_else(|| ChartError::SurfaceUnavailable("chart has no surface".into()))?;
        surface.with_canvas(|canvas| {
            let pass = RenderPass { canvas, theme: opts.theme, font: LabelFont::new(opts.font_size), layout: *layout };
            f(&pass)
        })
    }
}

fn acquire_surface(width: i32, height: i32) -> Option<ChartSurface> {
    match ChartSurface::new(width, height) {
        Ok(surface) => Some(surface),
        Err(err) => {
            tracing::error!(%err, width, height, "error acquiring chart surface");
            None
        }
    }
}

/// What every chart can do. Shared behavior lives in the provided methods and
/// delegates to the composed [`ChartBase`].
pub trait ChartView {
    fn base(&self) -> &ChartBase;
    fn base_mut(&mut self) -> &mut ChartBase;

    fn render(&mut self) -> ChartResult<()>;

    /// Adopt a new surface size and redraw.
    fn resize(&mut self, width: i32, height: i32) -> ChartResult<()> {
        self.base_mut().resize_surface(width, height);
        self.render()
    }

    fn handle_click(&mut self, x: f64, y: f64) {
        self.base_mut().report_click(x, y);
    }

    fn handle_zoom(&mut self, bigger: bool) {
        self.base_mut().report_zoom(bigger);
    }

    fn draw(&mut self) -> ChartResult<()> {
        self.render()
    }

    /// Pointer moved to `(x, y)` relative to the surface.
    fn handle_mouse_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        self.base_mut().set_mouse_pos(Some(Point::new(x, y)));
        self.draw()
    }

    fn handle_mouse_leave(&mut self) -> ChartResult<()> {
        self.base_mut().set_mouse_pos(None);
        self.draw()
    }

    /// Wheel scrolled; negative `delta_y` zooms in.
    fn handle_wheel(&mut self, delta_y: f64) {
        if self.base_mut().wheel_allowed() {
            self.handle_zoom(delta_y < 0.0);
        }
    }

    fn hide(&mut self) {
        self.base_mut().set_visible(false);
    }

    fn show(&mut self) -> ChartResult<()> {
        self.base_mut().set_visible(true);
        let (w, h) = (self.base().options().width, self.base().options().height);
        self.resize(w, h)
    }

    /// Host visibility changed. Becoming visible runs any deferred render.
    fn set_visibility(&mut self, visible: bool) -> ChartResult<()> {
        self.base_mut().set_visible(visible);
        if visible && self.base_mut().take_scheduled() {
            return self.draw();
        }
        Ok(())
    }
}

/// One render pass: the borrowed canvas plus the layout it was computed for.
pub struct RenderPass<'c> {
    canvas: &'c skia::Canvas,
    theme: Theme,
    font: LabelFont,
    layout: ChartLayout,
}

impl<'c> RenderPass<'c> {
    pub fn canvas(&self) -> &'c skia::Canvas { self.canvas }
    pub fn theme(&self) -> &Theme { &self.theme }
    pub fn font(&self) -> &LabelFont { &self.font }
    pub fn layout(&self) -> &ChartLayout { &self.layout }

    pub fn region(&self, extents: Extents) -> Region<'c> {
        Region::new(self.canvas, extents)
    }

    pub fn plot_region(&self) -> Region<'c> { self.region(self.layout.plot) }
    pub fn x_region(&self) -> Region<'c> { self.region(self.layout.x_labels) }
    pub fn y_region(&self) -> Region<'c> { self.region(self.layout.y_labels) }
    pub fn y2_region(&self) -> Option<Region<'c>> { self.layout.y2_labels.map(|e| self.region(e)) }

    /// Clear the whole canvas to transparent.
    pub fn clear(&self) {
        self.canvas.clear(skia::Color::TRANSPARENT);
    }

    fn grid_paint(&self) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(1.0);
        paint.set_color(self.theme.grid_lines);
        paint
    }

    /// Tick labels in the x strip plus vertical grid lines in the plot area.
    /// The unit text sits in the label gap nearest the axis center.
    pub fn plot_x_labels(&self, labels: &[Label], min_x: f64, max_x: f64, unit_lines: &[&str]) {
        let extents = Extents::new(min_x, max_x, 0.0, 1.0);
        let color = self.theme.axis_label;
        self.x_region().plot_unmasked(&extents, |canvas, tools| {
            let center = (max_x + min_x) / 2.0;
            let mut last = min_x;
            let mut unit_center = center;
            for lbl in labels {
                self.font.draw_centered(canvas, &lbl.text, tools.x(lbl.value), tools.y(0.5), color);
                if center >= last && center < lbl.value {
                    unit_center = (last + lbl.value) / 2.0;
                }
                last = lbl.value;
            }
            let unit_font = LabelFont::new(11.0);
            match unit_lines {
                [top, bottom] => {
                    unit_font.draw_centered(canvas, top, tools.x(unit_center), tools.y(0.63), color);
                    unit_font.draw_centered(canvas, bottom, tools.x(unit_center), tools.y(0.23), color);
                }
                [only] => unit_font.draw_centered(canvas, only, tools.x(unit_center), tools.y(0.5), color),
                _ => {}
            }
        });
        let paint = self.grid_paint();
        self.plot_region().plot_unmasked(&extents, |canvas, tools| {
            for lbl in labels {
                let x = tools.x(lbl.value);
                line(canvas, x, tools.y(0.0), x, tools.y(1.0), &paint);
            }
        });
    }

    /// Tick labels in `y_region` plus, unless `skip_lines`, horizontal grid
    /// lines across `plot`.
    #[allow(clippy::too_many_arguments)]
    pub fn plot_y_labels(
        &self,
        plot: &Region<'c>,
        labels: &LabelSet,
        min_y: f64,
        max_y: f64,
        unit: &str,
        y_region: &Region<'c>,
        skip_lines: bool,
    ) {
        let extents = Extents::new(0.0, 1.0, min_y, max_y);
        let color = self.theme.axis_label;
        y_region.plot_unmasked(&extents, |canvas, tools| {
            let center = (max_y + min_y) / 2.0;
            let mut last = min_y;
            let mut unit_center = center;
            for lbl in &labels.labels {
                self.font.draw_centered(canvas, &lbl.text, tools.x(0.5), tools.y(lbl.value), color);
                if center >= last && center < lbl.value {
                    unit_center = (last + lbl.value) / 2.0;
                }
                last = lbl.value;
            }
            self.font.draw_centered(canvas, unit, tools.x(0.5), tools.y(unit_center), color);
        });
        if skip_lines {
            return;
        }
        let paint = self.grid_paint();
        plot.plot_unmasked(&extents, |canvas, tools| {
            for lbl in &labels.labels {
                let y = tools.y(lbl.value);
                line(canvas, tools.x(0.0), y, tools.x(1.0), y, &paint);
            }
        });
    }

    /// Outline the plot area.
    pub fn draw_frame(&self) {
        let mut paint = self.grid_paint();
        paint.set_color(self.theme.grid_border);
        self.plot_region().plot(&Extents::new(0.0, 1.0, 0.0, 1.0), |canvas, tools| {
            let path = tools.data_path(|p| {
                p.move_to((0.0, 0.0));
                p.line_to((0.0, 1.0));
                p.line_to((1.0, 1.0));
                p.line_to((1.0, 0.0));
                p.close();
            });
            canvas.draw_path(&path, &paint);
        });
    }

    /// Stroke a polyline of data points onto `region` in `data` coordinates.
    pub fn plot_series(&self, region: &Region<'c>, data: &Extents, xs: &[f64], ys: &[f64], paint: &skia::Paint) {
        if xs.is_empty() || ys.is_empty() {
            return;
        }
        region.plot(data, |canvas, tools| {
            let mut path = skia::Path::new();
            path.move_to(tools.point(xs[0], ys[0]));
            for (&x, &y) in xs.iter().zip(ys).skip(1) {
                path.line_to(tools.point(x, y));
            }
            canvas.draw_path(&path, paint);
        });
    }
}

/// Pixel spacing aimed for between y ticks.
pub const Y_LABEL_SPACING: f64 = 50.0;

/// First phase of y-axis labeling: ticks and the widest label for an axis
/// `screen_h` pixels tall. The result sizes the axis column before anything
/// is drawn, then goes to [`RenderPass::plot_y_labels`].
pub fn measure_y_labels(font: &LabelFont, screen_h: f64, min: f64, max: f64, step: f64, unit: &str) -> LabelSet {
    make_labels(font, screen_h, min, max, Y_LABEL_SPACING, step, unit)
}

/// Data bounds widened by one unit when flat, so a constant series still maps
/// to finite pixels.
pub fn padded_bounds((min, max): (f64, f64)) -> (f64, f64) {
    if max > min { (min, max) } else { (min - 0.5, max + 0.5) }
}

/// Stroke paint with anti-aliasing.
pub fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

/// Fill paint with anti-aliasing.
pub fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

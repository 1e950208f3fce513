// File: crates/chartframe/src/charts/wave.rs
// Summary: Ambient loading wave: summed cosines stroked with a cycling hue gradient.

use std::f64::consts::PI;
use std::sync::Arc;

use skia_safe as skia;

use super::{Ambient, AmbientScene};
use crate::chart::{stroke_paint, ChartBase};
use crate::clock::{SystemClock, TickSource};
use crate::error::ChartResult;
use crate::extents::Extents;
use crate::geometry::clamp;
use crate::text::LabelFont;
use crate::theme::hsl;
use crate::types::ChartOptions;

/// Milliseconds per full cycle of the slowest-moving term.
const PERIOD_MS: f64 = 1500.0;
/// Milliseconds per full trip around the hue wheel.
const HUE_CYCLE_MS: f64 = 2000.0;
const SAMPLES: usize = 75;
const AMPLITUDES: [f64; 3] = [1.0, 0.65, 0.75];
const KS: [f64; 3] = [3.0, 3.0, 2.0];
const SPEEDS: [f64; 3] = [PI, PI * 10.0 / 9.0, PI / 2.5];
const PHASES: [f64; 3] = [0.0, 0.0, PI * 1.5];
const MAX_W: f64 = 150.0;
const MAX_H: f64 = 100.0;
const STROKE_WIDTH: f32 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct WaveOpts {
    /// Text centered under the wave.
    pub message: Option<String>,
    /// Fill behind the wave. Transparent when unset.
    pub background: Option<skia::Color>,
}

/// Height of the wave at `x` in `[0, 1]` after `angular_time` radians, in `[-1, 1]`.
pub fn wave_value(x: f64, angular_time: f64) -> f64 {
    let angular_x = x * PI * 2.0;
    let sum: f64 = (0..3)
        .map(|i| AMPLITUDES[i] * (KS[i] * angular_x + SPEEDS[i] * angular_time + PHASES[i]).cos())
        .sum();
    sum / 3.0
}

struct WaveScene {
    base: ChartBase,
    opts: WaveOpts,
    clock: Arc<dyn TickSource>,
    region: Extents,
    msg_region: Option<Extents>,
    font_size: f32,
    start_ms: f64,
    color_shift: f64,
}

impl WaveScene {
    fn new(chart: ChartOptions, opts: WaveOpts, clock: Arc<dyn TickSource>) -> Self {
        // Offsets vary per instance so neighbouring waves don't move in lockstep.
        let seed = chrono::Utc::now().timestamp_subsec_nanos() as f64;
        Self {
            base: ChartBase::new(chart),
            opts,
            clock,
            region: Extents::new(0.0, 0.0, 0.0, 0.0),
            msg_region: None,
            font_size: chart.font_size,
            start_ms: seed % PERIOD_MS,
            color_shift: seed % 360.0,
        }
    }
}

impl AmbientScene for WaveScene {
    fn base(&self) -> &ChartBase { &self.base }
    fn base_mut(&mut self) -> &mut ChartBase { &mut self.base }

    fn resized(&mut self) {
        let (cw, ch) = (self.base.width(), self.base.height());
        let w = (cw * 0.8).min(MAX_W);
        let h = (ch * 0.8).min(MAX_H);
        let l = (cw - w) / 2.0;
        let mut t = (ch - h) / 2.0;
        self.msg_region = None;
        if self.opts.message.is_some() {
            self.font_size = clamp(h * 0.15, 10.0, 14.0) as f32;
            let pad = self.font_size as f64 * 0.5;
            let half_h = self.font_size as f64 / 2.0 + pad;
            t -= half_h;
            self.msg_region = Some(Extents::new(0.0, cw, t + h, t + h + 2.0 * half_h));
        }
        self.region = Extents::new(l, l + w, t, t + h);
    }

    fn draw_frame(&mut self) -> ChartResult<()> {
        if !self.base.ready(true) {
            return Ok(());
        }
        let now_ms = self.clock.now().as_secs_f64() * 1000.0;
        let angular_time = (now_ms - self.start_ms) / PERIOD_MS * PI * 2.0;
        let shift = self.color_shift + (now_ms % HUE_CYCLE_MS) / HUE_CYCLE_MS * 360.0;
        let values: Vec<f64> = (0..SAMPLES)
            .map(|i| wave_value(i as f64 / (SAMPLES - 1) as f64, angular_time))
            .collect();

        let Self { base, opts, region, msg_region, font_size, .. } = self;
        base.paint(|pass| {
            pass.canvas().clear(opts.background.unwrap_or(skia::Color::TRANSPARENT));
            pass.region(*region).plot(&Extents::new(0.0, 1.0, -1.0, 1.0), |canvas, tools| {
                let last = (values.len() - 1) as f64;
                let mut colors = vec![hsl(shift, 0.35, 0.5)];
                let mut stops = vec![0.0f32];
                let mut path = skia::Path::new();
                path.move_to(tools.point(0.0, values[0]));
                for (i, v) in values.iter().enumerate().skip(1) {
                    let prog = i as f64 / last;
                    colors.push(hsl(prog * 300.0 + shift, 0.35, 0.5));
                    stops.push(prog as f32);
                    path.line_to(tools.point(prog, *v));
                }
                let ends = (tools.point(0.0, 0.0), tools.point(1.0, 0.0));
                let mut paint = stroke_paint(colors[0], STROKE_WIDTH);
                paint.set_stroke_cap(skia::paint::Cap::Round);
                paint.set_stroke_join(skia::paint::Join::Round);
                paint.set_shader(skia::gradient_shader::linear(
                    ends,
                    colors.as_slice(),
                    stops.as_slice(),
                    skia::TileMode::Clamp,
                    None,
                    None,
                ));
                canvas.draw_path(&path, &paint);
            });
            if let (Some(msg), Some(msg_region)) = (opts.message.as_deref(), *msg_region) {
                let font = LabelFont::new(*font_size);
                let color = pass.theme().axis_label;
                let region = pass.region(msg_region);
                let max_w = region.width();
                region.plot(&Extents::new(0.0, 1.0, 0.0, 1.0), |canvas, tools| {
                    font.draw_centered_fit(canvas, msg, tools.x(0.5), tools.y(0.5), max_w, color);
                });
            }
        })
    }
}

/// Ambient loading animation. Starts animating on construction and keeps
/// going until [`Wave::stop`] or drop.
pub struct Wave {
    inner: Ambient<WaveScene>,
}

impl Wave {
    pub fn new(chart: ChartOptions, opts: WaveOpts) -> Self {
        Self::with_clock(chart, opts, SystemClock::shared())
    }

    pub fn with_clock(chart: ChartOptions, opts: WaveOpts, clock: Arc<dyn TickSource>) -> Self {
        let scene = WaveScene::new(chart, opts, Arc::clone(&clock));
        Self { inner: Ambient::new(scene, clock, true) }
    }

    /// A wave that only draws on [`Wave::render`], for still frames.
    pub fn still(chart: ChartOptions, opts: WaveOpts, clock: Arc<dyn TickSource>) -> Self {
        let scene = WaveScene::new(chart, opts, Arc::clone(&clock));
        Self { inner: Ambient::new(scene, clock, false) }
    }
}

ambient_surface_api!(Wave);


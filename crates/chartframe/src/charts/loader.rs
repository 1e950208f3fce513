// File: crates/chartframe/src/charts/loader.rs
// Summary: Ambient loading blob: four points morphing on a smoothed closed curve.

use std::f64::consts::PI;
use std::sync::Arc;

use skia_safe as skia;

use super::{Ambient, AmbientScene};
use crate::chart::{fill_paint, ChartBase};
use crate::clock::{SystemClock, TickSource};
use crate::error::ChartResult;
use crate::extents::Extents;
use crate::geometry::{control_points, Point};
use crate::types::ChartOptions;

const PERIOD_MS: f64 = 3000.0;
/// Width over height of the drawing area.
const ASPECT_RATIO: f64 = 0.5;
const TOP_BOTTOM_PHASE: f64 = PI / 18.0;
const BLOB_FILL: skia::Color = skia::Color::new(0xff77_7777);

/// Corners of the blob at phase `theta`, in unit data space, clockwise from
/// top left. Always mirror-symmetric about `x = 0.5`.
pub fn blob_points(theta: f64) -> [Point; 4] {
    let top_y = 0.35 + (theta + TOP_BOTTOM_PHASE).cos().powi(2) * 0.5;
    let bottom_y = 0.15 + theta.cos().powi(2) * 0.5;
    let top_dx = 0.2 + (theta + TOP_BOTTOM_PHASE).sin().powi(2) * 0.2;
    let bottom_dx = 0.2 + theta.cos().powi(2) * 0.2;
    [
        Point::new(top_dx, top_y),
        Point::new(1.0 - top_dx, top_y),
        Point::new(1.0 - bottom_dx, bottom_y),
        Point::new(bottom_dx, bottom_y),
    ]
}

struct LoaderScene {
    base: ChartBase,
    clock: Arc<dyn TickSource>,
    region: Extents,
}

impl AmbientScene for LoaderScene {
    fn base(&self) -> &ChartBase { &self.base }
    fn base_mut(&mut self) -> &mut ChartBase { &mut self.base }

    fn resized(&mut self) {
        let (cw, ch) = (self.base.width(), self.base.height());
        let (mut x, mut y) = (0.0, 0.0);
        if ch > 0.0 && cw / ch > ASPECT_RATIO {
            x = (cw - ch * ASPECT_RATIO) / 2.0;
        } else {
            y = (ch - cw / ASPECT_RATIO) / 2.0;
        }
        self.region = Extents::new(x, cw - x, y, ch - y);
    }

    fn draw_frame(&mut self) -> ChartResult<()> {
        if !self.base.ready(true) {
            return Ok(());
        }
        let theta = self.clock.now().as_secs_f64() * 1000.0 / PERIOD_MS * PI * 2.0;
        let corners = blob_points(theta);
        let region = self.region;
        self.base.paint(|pass| {
            pass.canvas().clear(pass.theme().background);
            pass.region(region).plot(&Extents::new(0.0, 1.0, 0.0, 1.0), |canvas, tools| {
                let pts = corners.map(|p| Point::new(tools.x(p.x), tools.y(p.y)));
                let n = pts.len();
                let mut path = skia::Path::new();
                path.move_to(pts[0]);
                for i in 0..n {
                    let pt1 = pts[i];
                    let pt2 = pts[(i + 1) % n];
                    let (h1, h2) = control_points(pts[(i + n - 1) % n], pt1, pt2, pts[(i + 2) % n]);
                    path.cubic_to(h1, h2, pt2);
                }
                path.close();
                canvas.draw_path(&path, &fill_paint(BLOB_FILL));
            });
        })
    }
}

/// Ambient loading animation, animating from construction until
/// [`Loader::stop`] or drop.
pub struct Loader {
    inner: Ambient<LoaderScene>,
}

impl Loader {
    pub fn new(chart: ChartOptions) -> Self {
        Self::with_clock(chart, SystemClock::shared())
    }

    pub fn with_clock(chart: ChartOptions, clock: Arc<dyn TickSource>) -> Self {
        Self { inner: Ambient::new(Self::scene(chart, &clock), clock, true) }
    }

    /// A loader that only draws on [`Loader::render`].
    pub fn still(chart: ChartOptions, clock: Arc<dyn TickSource>) -> Self {
        Self { inner: Ambient::new(Self::scene(chart, &clock), clock, false) }
    }

    fn scene(chart: ChartOptions, clock: &Arc<dyn TickSource>) -> LoaderScene {
        LoaderScene {
            base: ChartBase::new(chart),
            clock: Arc::clone(clock),
            region: Extents::new(0.0, 0.0, 0.0, 0.0),
        }
    }
}

ambient_surface_api!(Loader);


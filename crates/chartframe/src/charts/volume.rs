// File: crates/chartframe/src/charts/volume.rs
// Summary: Relative volume bars filling the whole surface.

use skia_safe as skia;

use crate::chart::{fill_paint, stroke_paint, ChartBase, ChartView};
use crate::error::ChartResult;
use crate::extents::Extents;
use crate::layout::ChartLayout;
use crate::types::ChartOptions;

const BAR_FILL: skia::Color = skia::Color::new(0xff33_3333);
const BAR_STROKE_WIDTH: f32 = 2.0;
/// Gap on each side of a bar, as a fraction of its slot.
const BAR_INSET: f64 = 0.1;

pub struct VolumeChart {
    base: ChartBase,
    vols: Option<Vec<f64>>,
    color: skia::Color,
}

impl VolumeChart {
    pub fn new(chart: ChartOptions) -> Self {
        let color = chart.theme.value;
        Self { base: ChartBase::new(chart), vols: None, color }
    }

    /// Replace the bars and redraw. Heights are relative to the largest volume.
    pub fn update(&mut self, vols: Vec<f64>, color: skia::Color) -> ChartResult<()> {
        self.vols = Some(vols);
        self.color = color;
        self.render()
    }
}

impl ChartView for VolumeChart {
    fn base(&self) -> &ChartBase { &self.base }
    fn base_mut(&mut self) -> &mut ChartBase { &mut self.base }

    fn render(&mut self) -> ChartResult<()> {
        if !self.base.ready(self.vols.is_some()) {
            return Ok(());
        }
        let Some(vols) = self.vols.as_ref() else { return Ok(()) };
        self.base.set_layout(ChartLayout::full(self.base.width(), self.base.height()));

        let n = vols.len();
        let max_vol = vols.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let fill = fill_paint(BAR_FILL);
        let stroke = stroke_paint(self.color, BAR_STROKE_WIDTH);

        self.base.paint(|pass| {
            pass.clear();
            if n == 0 || !(max_vol > 0.0) {
                tracing::warn!(bars = n, max_vol, "no positive volume to draw");
                return;
            }
            pass.plot_region().plot(&Extents::new(0.0, n as f64, 0.0, 1.0), |canvas, tools| {
                for (i, vol) in vols.iter().enumerate() {
                    let rect = skia::Rect::from_xywh(
                        tools.x(i as f64 + BAR_INSET) as f32,
                        tools.y(0.0) as f32,
                        tools.w(1.0 - 2.0 * BAR_INSET) as f32,
                        tools.h(vol / max_vol) as f32,
                    )
                    .sorted();
                    canvas.draw_rect(rect, &fill);
                    canvas.draw_rect(rect, &stroke);
                }
            });
        })
    }
}

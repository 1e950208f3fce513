// File: crates/chartframe/src/charts/double_axis.rs
// Summary: Two series sharing a date x axis, each with its own y axis.

use crate::chart::{measure_y_labels, padded_bounds, stroke_paint, ChartBase, ChartView};
use crate::error::{ChartError, ChartResult};
use crate::extents::{min_max, Extents};
use crate::labels::make_date_labels;
use crate::layout::ChartLayout;
use crate::theme::{BLUE, PURPLE};
use crate::types::ChartOptions;

const MS_PER_DAY: f64 = 86_400_000.0;
const X_LABEL_SPACING: f64 = 100.0;
const LEFT_STEP: f64 = 1000.0;
const RIGHT_STEP: f64 = 10.0;

#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleAxisOpts {
    /// x values are unix milliseconds. The only supported x axis.
    pub x_date: bool,
}

#[derive(Default)]
struct Series {
    x: Vec<f64>,
    y1: Vec<f64>,
    y2: Vec<f64>,
}

/// Left axis in USD, right axis in ETH, dates along the bottom.
pub struct DoubleAxisChart {
    base: ChartBase,
    opts: DoubleAxisOpts,
    data: Option<Series>,
}

impl DoubleAxisChart {
    pub fn new(chart: ChartOptions, opts: DoubleAxisOpts) -> Self {
        Self { base: ChartBase::new(chart), opts, data: None }
    }

    /// Replace the data and redraw.
    pub fn update(&mut self, x: Vec<f64>, y1: Vec<f64>, y2: Vec<f64>) -> ChartResult<()> {
        if y1.len() != x.len() || y2.len() != x.len() {
            return Err(ChartError::InvalidData(format!(
                "series lengths differ: x={} y1={} y2={}",
                x.len(),
                y1.len(),
                y2.len()
            )));
        }
        self.data = Some(Series { x, y1, y2 });
        self.render()
    }
}

impl ChartView for DoubleAxisChart {
    fn base(&self) -> &ChartBase { &self.base }
    fn base_mut(&mut self) -> &mut ChartBase { &mut self.base }

    fn render(&mut self) -> ChartResult<()> {
        let has_data = self.data.as_ref().map_or(false, |d| !d.x.is_empty());
        if !self.base.ready(has_data) {
            return Ok(());
        }
        if !self.opts.x_date {
            return Err(ChartError::UnsupportedAxis("only date x axes are supported"));
        }
        let Some(data) = self.data.as_ref() else { return Ok(()) };

        let start_x = data.x[0];
        let end_x = data.x[data.x.len() - 1];
        let (x_min, x_max) = padded_bounds((start_x, end_x));
        let (y1_min, y1_max) = padded_bounds(min_max(&data.y1).unwrap_or((0.0, 1.0)));
        let (y2_min, y2_max) = padded_bounds(min_max(&data.y2).unwrap_or((0.0, 1.0)));
        let extents1 = Extents::new(x_min, x_max, y1_min, y1_max);
        let extents2 = Extents::new(x_min, x_max, y2_min, y2_max);

        // Measure both y axes, then fix every rectangle before drawing.
        let (w, h) = (self.base.width(), self.base.height());
        let font = self.base.label_font();
        let guess = ChartLayout::initial(w, h, self.base.options());
        let plot_h = guess.plot.y_range();
        let usd = measure_y_labels(&font, plot_h, y1_min, y1_max, LEFT_STEP, "USD");
        let eth = measure_y_labels(&font, plot_h, y2_min, y2_max, RIGHT_STEP, "ETH");
        let layout = ChartLayout::measured(w, h, self.base.options(), usd.widest, Some(eth.widest));
        self.base.set_layout(layout);

        let x_labels = make_date_labels(start_x, end_x, MS_PER_DAY, layout.plot.x_range(), X_LABEL_SPACING);
        tracing::debug!(points = data.x.len(), x_labels = x_labels.len(), "double axis render");

        self.base.paint(|pass| {
            pass.clear();
            let plot = pass.plot_region();
            pass.plot_y_labels(&plot, &usd, y1_min, y1_max, "USD", &pass.y_region(), false);
            pass.plot_x_labels(&x_labels, x_min, x_max, &["Date"]);
            if let Some(right) = pass.y2_region() {
                pass.plot_y_labels(&plot, &eth, y2_min, y2_max, "ETH", &right, true);
            }
            pass.draw_frame();
            pass.plot_series(&plot, &extents2, &data.x, &data.y2, &stroke_paint(BLUE, 2.0));
            pass.plot_series(&plot, &extents1, &data.x, &data.y1, &stroke_paint(PURPLE, 2.0));
        })
    }
}

// File: crates/chartframe/src/charts/score.rs
// Summary: Score-versus-spread lines, one per selected pool.

use skia_safe as skia;

use crate::chart::{measure_y_labels, padded_bounds, stroke_paint, ChartBase, ChartView};
use crate::error::{ChartError, ChartResult};
use crate::extents::Extents;
use crate::labels::make_labels;
use crate::layout::ChartLayout;
use crate::text::LabelFont;
use crate::types::ChartOptions;

const EMPTY_MESSAGE: &str = "no pools selected";
const MESSAGE_FONT_SIZE: f32 = 15.0;
const Y_STEP: f64 = 100.0;
const X_STEP: f64 = 0.005;
const X_LABEL_SPACING: f64 = 100.0;
const X_UNIT: &str = "spread ±";

/// One stroked line.
#[derive(Clone, Debug)]
pub struct ScoreLine {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub color: skia::Color,
    pub width: f32,
}

pub struct ScoreChart {
    base: ChartBase,
    lines: Option<Vec<ScoreLine>>,
}

impl ScoreChart {
    pub fn new(chart: ChartOptions) -> Self {
        Self { base: ChartBase::new(chart), lines: None }
    }

    /// Replace every line and redraw. The four inputs are parallel: line `i`
    /// is `xs[i]` against `ys[i]`, stroked `colors[i]` at `line_widths[i]`.
    pub fn update(
        &mut self,
        xs: Vec<Vec<f64>>,
        ys: Vec<Vec<f64>>,
        colors: Vec<skia::Color>,
        line_widths: Vec<f32>,
    ) -> ChartResult<()> {
        let n = xs.len();
        if ys.len() != n || colors.len() != n || line_widths.len() != n {
            return Err(ChartError::InvalidData(format!(
                "expected {n} ys, colors and widths, got {}, {}, {}",
                ys.len(),
                colors.len(),
                line_widths.len()
            )));
        }
        let mut lines = Vec::with_capacity(n);
        for (((xs, ys), color), width) in xs.into_iter().zip(ys).zip(colors).zip(line_widths) {
            if xs.len() != ys.len() {
                return Err(ChartError::InvalidData(format!("line has {} xs and {} ys", xs.len(), ys.len())));
            }
            lines.push(ScoreLine { xs, ys, color, width });
        }
        self.lines = Some(lines);
        self.render()
    }

    fn render_empty(&mut self) -> ChartResult<()> {
        let layout = ChartLayout::initial(self.base.width(), self.base.height(), self.base.options());
        self.base.set_layout(layout);
        self.base.paint(|pass| {
            pass.clear();
            let font = LabelFont::new(MESSAGE_FONT_SIZE);
            let color = pass.theme().axis_label;
            pass.plot_region().plot(&Extents::new(0.0, 1.0, 0.0, 1.0), |canvas, tools| {
                font.draw_centered(canvas, EMPTY_MESSAGE, tools.x(0.5), tools.y(0.5), color);
            });
        })
    }
}

impl ChartView for ScoreChart {
    fn base(&self) -> &ChartBase { &self.base }
    fn base_mut(&mut self) -> &mut ChartBase { &mut self.base }

    fn render(&mut self) -> ChartResult<()> {
        if !self.base.ready(self.lines.is_some()) {
            return Ok(());
        }
        let Some(lines) = self.lines.as_ref() else { return Ok(()) };
        let bounds = Extents::bounding(lines.iter().flat_map(|l| &l.xs), lines.iter().flat_map(|l| &l.ys));
        let Some(bounds) = bounds else {
            return self.render_empty();
        };
        let (x_min, x_max) = padded_bounds((bounds.x.min, bounds.x.max));
        let (y_min, y_max) = padded_bounds((bounds.y.min, bounds.y.max));
        let extents = Extents::new(x_min, x_max, y_min, y_max);

        let (w, h) = (self.base.width(), self.base.height());
        let font = self.base.label_font();
        let guess = ChartLayout::initial(w, h, self.base.options());
        let y_labels = measure_y_labels(&font, guess.plot.y_range(), y_min, y_max, Y_STEP, "score");
        let layout = ChartLayout::measured(w, h, self.base.options(), y_labels.widest, None);
        self.base.set_layout(layout);
        let x_labels = make_labels(&font, layout.plot.x_range(), x_min, x_max, X_LABEL_SPACING, X_STEP, X_UNIT);

        self.base.paint(|pass| {
            pass.clear();
            let plot = pass.plot_region();
            pass.plot_y_labels(&plot, &y_labels, y_min, y_max, "score", &pass.y_region(), false);
            pass.plot_x_labels(&x_labels.labels, x_min, x_max, &[X_UNIT]);
            pass.draw_frame();
            for line in lines {
                pass.plot_series(&plot, &extents, &line.xs, &line.ys, &stroke_paint(line.color, line.width));
            }
        })
    }
}

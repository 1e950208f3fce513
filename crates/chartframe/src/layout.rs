// File: crates/chartframe/src/layout.rs
// Summary: Screen rectangles for the plot area and axis strips, computed before drawing.

use crate::extents::Extents;
use crate::types::{ChartOptions, LABEL_COLUMN_FACTOR};

/// Screen-space rectangles of one render pass. Computed in full from label
/// measurements before any layer draws, and not changed afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    pub plot: Extents,
    pub x_labels: Extents,
    pub y_labels: Extents,
    /// Right-hand axis column, for dual-axis charts.
    pub y2_labels: Option<Extents>,
}

impl ChartLayout {
    /// Layout before any label has been measured.
    pub fn initial(width: f64, height: f64, opts: &ChartOptions) -> Self {
        Self::with_columns(width, height, opts, opts.y_label_guess, None)
    }

    /// Layout from measured label widths: the left column is `left_widest`
    /// scaled by the column factor, likewise the optional right column.
    pub fn measured(width: f64, height: f64, opts: &ChartOptions, left_widest: f32, right_widest: Option<f32>) -> Self {
        let left = left_widest as f64 * LABEL_COLUMN_FACTOR;
        let right = right_widest.map(|w| w as f64 * LABEL_COLUMN_FACTOR);
        Self::with_columns(width, height, opts, left, right)
    }

    fn with_columns(width: f64, height: f64, opts: &ChartOptions, left: f64, right: Option<f64>) -> Self {
        let bottom = (height - opts.x_label_height).max(opts.top_pad);
        let plot_right = match right {
            Some(r) => (width - r).max(left),
            None => width,
        };
        let layout = Self {
            plot: Extents::new(left, plot_right, opts.top_pad, bottom),
            x_labels: Extents::new(left, plot_right, bottom, height.max(bottom)),
            y_labels: Extents::new(0.0, left, opts.top_pad, bottom),
            y2_labels: right.map(|_| Extents::new(plot_right, width, opts.top_pad, bottom)),
        };
        tracing::debug!(plot = ?layout.plot, left, ?right, "chart layout");
        layout
    }

    /// Whole surface as the plot area, no axis strips.
    pub fn full(width: f64, height: f64) -> Self {
        let all = Extents::new(0.0, width, 0.0, height);
        Self {
            plot: all,
            x_labels: Extents::new(0.0, width, height, height),
            y_labels: Extents::new(0.0, 0.0, 0.0, height),
            y2_labels: None,
        }
    }
}

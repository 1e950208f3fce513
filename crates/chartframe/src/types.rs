// File: crates/chartframe/src/types.rs
// Summary: Shared constants and chart configuration.

use std::time::Duration;

use crate::theme::Theme;

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Height of the x-axis label strip.
pub const X_LABEL_HEIGHT: f64 = 30.0;
/// Y label column width used until labels have been measured.
pub const Y_LABEL_GUESS: f64 = 40.0;
/// Gap above the plot area.
pub const PLOT_TOP_PAD: f64 = 10.0;
/// Axis column width relative to the widest label.
pub const LABEL_COLUMN_FACTOR: f64 = 1.5;
/// Zoom requests closer together than this are dropped.
pub const WHEEL_COOLDOWN: Duration = Duration::from_millis(100);

/// Chart construction options.
#[derive(Clone, Copy, Debug)]
pub struct ChartOptions {
    pub width: i32,
    pub height: i32,
    pub theme: Theme,
    /// Tick label font size in pixels.
    pub font_size: f32,
    pub x_label_height: f64,
    pub y_label_guess: f64,
    pub top_pad: f64,
    pub wheel_cooldown: Duration,
}

impl ChartOptions {
    pub fn sized(width: i32, height: i32) -> Self {
        Self { width, height, ..Self::default() }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            theme: Theme::dark(),
            font_size: 12.0,
            x_label_height: X_LABEL_HEIGHT,
            y_label_guess: Y_LABEL_GUESS,
            top_pad: PLOT_TOP_PAD,
            wheel_cooldown: WHEEL_COOLDOWN,
        }
    }
}

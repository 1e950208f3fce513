// File: crates/chartframe/src/lib.rs
// Summary: Library entry point; exports regions, animations, labels and the concrete charts.

pub mod animation;
pub mod chart;
pub mod charts;
pub mod clock;
pub mod error;
pub mod extents;
pub mod geometry;
pub mod labels;
pub mod layout;
pub mod region;
pub mod sub_animator;
pub mod surface;
pub mod text;
pub mod theme;
pub mod types;
pub mod telemetry;

pub use animation::{Animation, AnimationBuilder, AnimationLength, AnimationOutcome, Easing, StopHandle};
pub use chart::{ChartBase, ChartReporters, ChartView, RenderPass};
pub use charts::{DoubleAxisChart, DoubleAxisOpts, Loader, ScoreChart, VolumeChart, Wave, WaveOpts};
pub use clock::{ManualClock, SystemClock, TickSource};
pub use error::{ChartError, ChartResult};
pub use extents::{Extents, MinMax};
pub use labels::{make_date_labels, make_labels, Label, LabelSet};
pub use layout::ChartLayout;
pub use region::{Region, Translator};
pub use sub_animator::SubAnimator;
pub use surface::ChartSurface;
pub use theme::{HueGenerator, Theme};
pub use types::ChartOptions;

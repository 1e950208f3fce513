// File: crates/chartframe/src/error.rs
// Summary: Library error type shared by surfaces, charts and animations.

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("unsupported axis configuration: {0}")]
    UnsupportedAxis(&'static str),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("animation worker panicked")]
    AnimationPanicked,

    #[error("failed to encode {0}")]
    Encode(&'static str),
}

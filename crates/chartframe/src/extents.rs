// File: crates/chartframe/src/extents.rs
// Summary: Axis-aligned rectangle in data or screen space.

/// Closed interval on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn mid(&self) -> f64 {
        (self.max + self.min) / 2.0
    }
}

/// A rectangle in a single coordinate space, either data or screen, never both.
///
/// Contract: `max >= min` on each axis. Zero-width or zero-height extents are
/// allowed; transforms built from them divide by zero, so callers guard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extents {
    pub x: MinMax,
    pub y: MinMax,
}

impl Extents {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x: MinMax::new(x_min, x_max), y: MinMax::new(y_min, y_max) }
    }

    /// Replace all four bounds in place.
    pub fn set_extents(&mut self, x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
        self.x = MinMax::new(x_min, x_max);
        self.y = MinMax::new(y_min, y_max);
    }

    pub fn x_range(&self) -> f64 { self.x.range() }
    pub fn mid_x(&self) -> f64 { self.x.mid() }
    pub fn y_range(&self) -> f64 { self.y.range() }
    pub fn mid_y(&self) -> f64 { self.y.mid() }

    /// Strict interior test; points on the boundary are outside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x < self.x.max && x > self.x.min && y < self.y.max && y > self.y.min
    }

    /// Bounding extents of a set of series, or `None` when every series is empty
    /// or a value is not finite.
    pub fn bounding<'a, X, Y>(xs: X, ys: Y) -> Option<Self>
    where
        X: IntoIterator<Item = &'a f64>,
        Y: IntoIterator<Item = &'a f64>,
    {
        let (x_min, x_max) = min_max(xs)?;
        let (y_min, y_max) = min_max(ys)?;
        Some(Self::new(x_min, x_max, y_min, y_max))
    }
}

/// Minimum and maximum of a sequence; `None` when empty or non-finite.
pub fn min_max<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo.is_finite() && hi.is_finite() { Some((lo, hi)) } else { None }
}

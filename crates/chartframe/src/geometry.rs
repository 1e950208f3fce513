// File: crates/chartframe/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math and curve smoothing.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<Point> for skia_safe::Point {
    fn from(p: Point) -> Self {
        skia_safe::Point::new(p.x as f32, p.y as f32)
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

/// Tension of the closed-curve smoothing; 1 keeps handles on the chord midpoints.
pub const SMOOTHING_FACTOR: f64 = 1.0;

/// Bezier handles for the segment `pt1 -> pt2` of a smooth closed curve,
/// given its neighbours. Handles are scaled by the relative chord lengths
/// so short segments don't overshoot.
pub fn control_points(before: Point, pt1: Point, pt2: Point, after: Point) -> (Point, Point) {
    let c1 = before.midpoint(pt1);
    let c2 = pt1.midpoint(pt2);
    let c3 = pt2.midpoint(after);

    let len1 = before.distance(pt1);
    let len2 = pt1.distance(pt2);
    let len3 = pt2.distance(after);

    let k1 = len1 / (len1 + len2);
    let k2 = len2 / (len2 + len3);

    let m1 = Point::new(c1.x + (c2.x - c1.x) * k1, c1.y + (c2.y - c1.y) * k1);
    let m2 = Point::new(c2.x + (c3.x - c2.x) * k2, c2.y + (c3.y - c2.y) * k2);

    let h1 = Point::new(
        m1.x + (c2.x - m1.x) * SMOOTHING_FACTOR + pt1.x - m1.x,
        m1.y + (c2.y - m1.y) * SMOOTHING_FACTOR + pt1.y - m1.y,
    );
    let h2 = Point::new(
        m2.x + (c2.x - m2.x) * SMOOTHING_FACTOR + pt2.x - m2.x,
        m2.y + (c2.y - m2.y) * SMOOTHING_FACTOR + pt2.y - m2.y,
    );
    (h1, h2)
}

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A point in the plane.
///
/// Sites are supplied by the host as integer coordinates and promoted to `f64` here.
/// The sweep processes points in [`Point::sweep_cmp`] order: by `y` first, then by `x`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        self.dist_sq(other).sqrt()
    }

    pub fn dist_sq(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Compares two points in sweep order: ascending `y`, ties broken by ascending `x`.
    pub fn sweep_cmp(&self, other: &Point) -> Ordering {
        self.y.total_cmp(&other.y).then_with(|| self.x.total_cmp(&other.x))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x as f64, y as f64)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Point::new(p[0], p[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Totally ordered key for a coordinate, used to index cells by location.
///
/// Negative zero is folded into positive zero so that `(0, -0)` and `(0, 0)` share a key.
#[derive(Clone, Copy, Debug)]
pub struct CellKey(Point);

impl CellKey {
    pub fn new(p: Point) -> Self {
        CellKey(Point::new(p.x + 0.0, p.y + 0.0))
    }

    pub fn point(&self) -> Point {
        self.0
    }
}

impl PartialEq for CellKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellKey {}

impl PartialOrd for CellKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.sweep_cmp(&other.0)
    }
}

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// A line `a*x + b*y = c`.
///
/// Bisectors are normalised so that the coefficient of the axis with the larger site
/// delta is exactly `1.0`. Code in the sweep relies on that and compares `a == 1.0`
/// to know which axis the line is parametrised over.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Perpendicular bisector of `s1` and `s2`.
    pub fn bisector(s1: Point, s2: Point) -> Line {
        let dx = s2.x - s1.x;
        let dy = s2.y - s1.y;
        let c = s1.x * dx + s1.y * dy + (dx * dx + dy * dy) * 0.5;

        if dx.abs() > dy.abs() {
            Line::new(1.0, dy / dx, c / dx)
        } else {
            Line::new(dx / dy, 1.0, c / dy)
        }
    }

    /// True when the line is parametrised over `y` (`x = c - b*y`).
    pub fn is_x_unit(&self) -> bool {
        self.a == 1.0
    }

    /// Signed residual `a*x + b*y - c`.
    pub fn eval(&self, p: &Point) -> f64 {
        self.a * p.x + self.b * p.y - self.c
    }

    /// Intersection with `other`, or `None` when the determinant is within `parallel_eps` of zero.
    pub fn intersection(&self, other: &Line, parallel_eps: f64) -> Option<Point> {
        let d = self.a * other.b - self.b * other.a;
        if -parallel_eps < d && d < parallel_eps {
            return None;
        }
        let x = (self.c * other.b - other.c * self.b) / d;
        let y = (other.c * self.a - self.c * other.a) / d;
        Some(Point::new(x, y))
    }
}

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in the plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// The square clip box used for finite edge segments.
    ///
    /// The side is the larger extent of the sites scaled by `padding`, and the extra length
    /// is split evenly between both sides of each axis. A single site gives a degenerate box.
    pub fn padded_from_extents(min: [f64; 2], max: [f64; 2], padding: f64) -> Self {
        let dx = max[0] - min[0];
        let dy = max[1] - min[1];
        let d = dx.max(dy) * padding;
        Self {
            min: [min[0] - (d - dx) / 2.0, min[1] - (d - dy) / 2.0],
            max: [max[0] + (d - dx) / 2.0, max[1] + (d - dy) / 2.0],
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min[0] && p.x <= self.max[0] && p.y >= self.min[1] && p.y <= self.max[1]
    }

    /// Clamps `p` so that it lies at least `margin` inside the box. An axis narrower
    /// than `2 * margin` snaps to its centre.
    pub fn clamp_inside(&self, p: Point, margin: f64) -> Point {
        let axis = |v: f64, lo: f64, hi: f64| {
            if hi - lo < 2.0 * margin {
                (lo + hi) / 2.0
            } else {
                v.clamp(lo + margin, hi - margin)
            }
        };
        Point::new(
            axis(p.x, self.min[0], self.max[0]),
            axis(p.y, self.min[1], self.max[1]),
        )
    }

    pub fn is_valid(&self) -> bool {
        self.min[0] < self.max[0] && self.min[1] < self.max[1]
    }
}

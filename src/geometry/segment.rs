use crate::bounds::BoundingBox;
use crate::geometry::{Line, Point};
use serde::{Deserialize, Serialize};

/// A finite piece of a bisector, ready for display or distance checks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }

    /// Clips a possibly half-open bisector to `bbox`.
    ///
    /// `ends` holds the left and right endpoints of the edge; `None` marks an open ray.
    /// Returns `None` when the finite portion of the line lies entirely outside the box.
    pub fn clip(line: &Line, ends: [Option<Point>; 2], bbox: &BoundingBox) -> Option<Segment> {
        let [xmin, ymin] = bbox.min;
        let [xmax, ymax] = bbox.max;
        let (a, b, c) = (line.a, line.b, line.c);

        // For lines running "up and right" the right endpoint is the lower one.
        let (s1, s2) = if line.is_x_unit() && b >= 0.0 {
            (ends[1], ends[0])
        } else {
            (ends[0], ends[1])
        };

        let (mut x1, mut y1, mut x2, mut y2);

        if line.is_x_unit() {
            y1 = match s1 {
                Some(s) if s.y > ymin => s.y,
                _ => ymin,
            };
            if y1 > ymax {
                return None;
            }
            x1 = c - b * y1;

            y2 = match s2 {
                Some(s) if s.y < ymax => s.y,
                _ => ymax,
            };
            if y2 < ymin {
                return None;
            }
            x2 = c - b * y2;

            if (x1 > xmax && x2 > xmax) || (x1 < xmin && x2 < xmin) {
                return None;
            }

            if x1 > xmax {
                x1 = xmax;
                y1 = (c - x1) / b;
            }
            if x1 < xmin {
                x1 = xmin;
                y1 = (c - x1) / b;
            }
            if x2 > xmax {
                x2 = xmax;
                y2 = (c - x2) / b;
            }
            if x2 < xmin {
                x2 = xmin;
                y2 = (c - x2) / b;
            }
        } else {
            x1 = match s1 {
                Some(s) if s.x > xmin => s.x,
                _ => xmin,
            };
            if x1 > xmax {
                return None;
            }
            y1 = c - a * x1;

            x2 = match s2 {
                Some(s) if s.x < xmax => s.x,
                _ => xmax,
            };
            if x2 < xmin {
                return None;
            }
            y2 = c - a * x2;

            if (y1 > ymax && y2 > ymax) || (y1 < ymin && y2 < ymin) {
                return None;
            }

            if y1 > ymax {
                y1 = ymax;
                x1 = (c - y1) / a;
            }
            if y1 < ymin {
                y1 = ymin;
                x1 = (c - y1) / a;
            }
            if y2 > ymax {
                y2 = ymax;
                x2 = (c - y2) / a;
            }
            if y2 < ymin {
                y2 = ymin;
                x2 = (c - y2) / a;
            }
        }

        Some(Segment::new(Point::new(x1, y1), Point::new(x2, y2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new([-0.5, -0.5], [10.5, 10.5])
    }

    #[test]
    fn test_clip_open_vertical_line() {
        let line = Line::new(1.0, 0.0, 5.0);
        let seg = Segment::clip(&line, [None, None], &unit_box()).expect("line crosses box");
        assert_eq!(seg.p1, Point::new(5.0, -0.5));
        assert_eq!(seg.p2, Point::new(5.0, 10.5));
    }

    #[test]
    fn test_clip_half_open_ray() {
        // Vertical bisector ending at a vertex at y = 3.75 (left endpoint).
        let line = Line::new(1.0, 0.0, 5.0);
        let vertex = Point::new(5.0, 3.75);
        let seg = Segment::clip(&line, [Some(vertex), None], &unit_box()).expect("ray crosses box");
        assert_eq!(seg.p1, Point::new(5.0, -0.5));
        assert_eq!(seg.p2, vertex);
    }

    #[test]
    fn test_clip_closed_inside() {
        let line = Line::new(0.0, 1.0, 4.0);
        let p = Point::new(2.0, 4.0);
        let q = Point::new(6.0, 4.0);
        let seg = Segment::clip(&line, [Some(p), Some(q)], &unit_box()).expect("inside");
        assert_eq!(seg.p1, p);
        assert_eq!(seg.p2, q);
        assert!((seg.length() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_clip_outside() {
        let line = Line::new(1.0, 0.0, 50.0);
        assert!(Segment::clip(&line, [None, None], &unit_box()).is_none());
    }

    #[test]
    fn test_clip_diagonal_to_box_edges() {
        // y = x through a box [0, 10]^2, expressed with b = 1: -x + y = 0.
        let bbox = BoundingBox::new([0.0, 0.0], [10.0, 10.0]);
        let line = Line::new(-1.0, 1.0, 0.0);
        let seg = Segment::clip(&line, [None, None], &bbox).expect("diagonal");
        assert!((seg.p1.x - 0.0).abs() < 1e-12 && (seg.p1.y - 0.0).abs() < 1e-12);
        assert!((seg.p2.x - 10.0).abs() < 1e-12 && (seg.p2.y - 10.0).abs() < 1e-12);
    }
}

use crate::geometry::Point;
use crate::queue::HalfEdgeId;
use crate::sweep::{Side, SweepEdge, SweepSite};

/// Sentinel closing the beach line on the left.
pub const LEFT_END: HalfEdgeId = 0;
/// Sentinel closing the beach line on the right.
pub const RIGHT_END: HalfEdgeId = 1;

/// One side of a bisector on the beach line.
#[derive(Clone, Debug)]
pub struct HalfEdge {
    pub left: HalfEdgeId,
    pub right: HalfEdgeId,
    /// Index into the sweep edges, `None` for the sentinels.
    pub edge: Option<usize>,
    pub side: Side,
    pub deleted: bool,
    /// Candidate circle event vertex, set while the half-edge sits in the queue.
    pub vertex: Option<usize>,
    pub ystar: f64,
}

/// The beach line: an arena backed doubly linked list of half-edges between two sentinels,
/// plus a hash of buckets over x that gives `locate` a starting point close to its answer.
pub struct BeachLine {
    half_edges: Vec<HalfEdge>,
    hash: Vec<Option<HalfEdgeId>>,
    xmin: f64,
    deltax: f64,
}

impl BeachLine {
    /// Creates an empty beach line for `site_count` sites spanning `xmin..=xmax`.
    pub fn new(site_count: usize, xmin: f64, xmax: f64) -> Self {
        let sqrt_sites = ((site_count + 4) as f64).sqrt() as usize;
        let size = 2 * sqrt_sites;

        let sentinel = |left, right| HalfEdge {
            left,
            right,
            edge: None,
            side: Side::Left,
            deleted: false,
            vertex: None,
            ystar: 0.0,
        };

        let mut hash = vec![None; size];
        hash[0] = Some(LEFT_END);
        hash[size - 1] = Some(RIGHT_END);

        BeachLine {
            half_edges: vec![sentinel(LEFT_END, RIGHT_END), sentinel(LEFT_END, RIGHT_END)],
            hash,
            xmin,
            deltax: xmax - xmin,
        }
    }

    /// Allocates an unlinked half-edge for `edge`.
    pub fn create(&mut self, edge: usize, side: Side) -> HalfEdgeId {
        let id = self.half_edges.len();
        self.half_edges.push(HalfEdge {
            left: id,
            right: id,
            edge: Some(edge),
            side,
            deleted: false,
            vertex: None,
            ystar: 0.0,
        });
        id
    }

    pub fn get(&self, he: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[he]
    }

    pub fn get_mut(&mut self, he: HalfEdgeId) -> &mut HalfEdge {
        &mut self.half_edges[he]
    }

    pub fn left(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[he].left
    }

    pub fn right(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[he].right
    }

    /// Links `new` directly to the right of `lb`.
    pub fn insert_after(&mut self, lb: HalfEdgeId, new: HalfEdgeId) {
        let next = self.half_edges[lb].right;
        self.half_edges[new].left = lb;
        self.half_edges[new].right = next;
        self.half_edges[next].left = new;
        self.half_edges[lb].right = new;
    }

    /// Unlinks `he` and marks it deleted. Hash slots still pointing at it are cleared lazily.
    pub fn delete(&mut self, he: HalfEdgeId) {
        assert!(he != LEFT_END && he != RIGHT_END, "cannot delete a beach line sentinel");
        let HalfEdge { left, right, .. } = self.half_edges[he];
        self.half_edges[left].right = right;
        self.half_edges[right].left = left;
        self.half_edges[he].deleted = true;
    }

    /// Site on the left of `he`, or `bottom` for the sentinels.
    pub fn left_region(&self, he: HalfEdgeId, edges: &[SweepEdge], bottom: usize) -> usize {
        let h = &self.half_edges[he];
        match h.edge {
            Some(e) => edges[e].region[h.side.index()],
            None => bottom,
        }
    }

    /// Site on the right of `he`, or `bottom` for the sentinels.
    pub fn right_region(&self, he: HalfEdgeId, edges: &[SweepEdge], bottom: usize) -> usize {
        let h = &self.half_edges[he];
        match h.edge {
            Some(e) => edges[e].region[h.side.opposite().index()],
            None => bottom,
        }
    }

    /// Live half-edges from left to right, sentinels excluded.
    pub fn iter(&self) -> impl Iterator<Item = &HalfEdge> + '_ {
        let mut he = self.right(LEFT_END);
        std::iter::from_fn(move || {
            if he == RIGHT_END {
                return None;
            }
            let current = &self.half_edges[he];
            he = current.right;
            Some(current)
        })
    }

    fn bucket_of(&self, x: f64) -> usize {
        let size = self.hash.len();
        let b = ((x - self.xmin) / self.deltax * size as f64).floor();
        if b.is_nan() || b < 0.0 {
            0
        } else if b >= size as f64 {
            size - 1
        } else {
            b as usize
        }
    }

    fn hash_entry(&mut self, bucket: isize) -> Option<HalfEdgeId> {
        if bucket < 0 || bucket as usize >= self.hash.len() {
            return None;
        }
        let slot = &mut self.hash[bucket as usize];
        match *slot {
            Some(he) if self.half_edges[he].deleted => {
                *slot = None;
                None
            }
            entry => entry,
        }
    }

    /// Finds the half-edge immediately to the left of `p`.
    pub fn locate(&mut self, p: Point, edges: &[SweepEdge], sites: &[SweepSite]) -> HalfEdgeId {
        let size = self.hash.len() as isize;
        let bucket = self.bucket_of(p.x);

        let mut he = match self.hash_entry(bucket as isize) {
            Some(he) => he,
            None => {
                let mut found = None;
                for i in 1..=size {
                    found = self
                        .hash_entry(bucket as isize - i)
                        .or_else(|| self.hash_entry(bucket as isize + i));
                    if found.is_some() {
                        break;
                    }
                }
                match found {
                    Some(he) => he,
                    None => panic!("beach line hash holds no live half-edge"),
                }
            }
        };

        if he == LEFT_END || (he != RIGHT_END && self.right_of(he, p, edges, sites)) {
            loop {
                he = self.right(he);
                if he == RIGHT_END || !self.right_of(he, p, edges, sites) {
                    break;
                }
            }
            he = self.left(he);
        } else {
            loop {
                he = self.left(he);
                if he == LEFT_END || self.right_of(he, p, edges, sites) {
                    break;
                }
            }
        }

        if bucket > 0 && bucket < self.hash.len() - 1 {
            self.hash[bucket] = Some(he);
        }
        he
    }

    /// Whether `p` lies to the right of the half-edge `he`.
    pub fn right_of(&self, he: HalfEdgeId, p: Point, edges: &[SweepEdge], sites: &[SweepSite]) -> bool {
        let h = &self.half_edges[he];
        let Some(e) = h.edge else {
            panic!("right_of on a sentinel half-edge");
        };
        let edge = &edges[e];
        let line = &edge.line;
        let top = sites[edge.region[Side::Right.index()]].point;

        let right_of_site = p.x > top.x;
        if right_of_site && h.side == Side::Left {
            return true;
        }
        if !right_of_site && h.side == Side::Right {
            return false;
        }

        let above = if line.is_x_unit() {
            let dyp = p.y - top.y;
            let dxp = p.x - top.x;
            let mut fast = false;
            let mut above;

            if (!right_of_site && line.b < 0.0) || (right_of_site && line.b >= 0.0) {
                above = dyp >= line.b * dxp;
                fast = above;
            } else {
                above = p.x + p.y * line.b > line.c;
                if line.b < 0.0 {
                    above = !above;
                }
                if !above {
                    fast = true;
                }
            }

            if !fast {
                let dxs = top.x - sites[edge.region[Side::Left.index()]].point.x;
                // Vertically aligned regions leave the curve test undefined.
                above = dxs != 0.0
                    && line.b * (dxp * dxp - dyp * dyp)
                        < dxs * dyp * (1.0 + 2.0 * dxp / dxs + line.b * line.b);
                if line.b < 0.0 {
                    above = !above;
                }
            }
            above
        } else {
            let yl = line.c - line.a * p.x;
            let t1 = p.y - yl;
            let t2 = p.x - top.x;
            let t3 = yl - top.y;
            t1 * t1 > t2 * t2 + t3 * t3
        };

        match h.side {
            Side::Left => above,
            Side::Right => !above,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;

    fn site(x: f64, y: f64, num: usize) -> SweepSite {
        SweepSite {
            point: Point::new(x, y),
            id: Some(num as u32),
            num: Some(num),
            refs: 0,
        }
    }

    fn single_edge() -> (Vec<SweepSite>, Vec<SweepEdge>) {
        let sites = vec![site(0.0, 0.0, 0), site(10.0, 0.0, 1)];
        let edges = vec![SweepEdge {
            line: Line::bisector(sites[0].point, sites[1].point),
            region: [0, 1],
            endpoint: [None, None],
        }];
        (sites, edges)
    }

    #[test]
    fn test_insert_delete_links() {
        let mut beach = BeachLine::new(4, 0.0, 10.0);
        let a = beach.create(0, Side::Left);
        let b = beach.create(0, Side::Right);
        beach.insert_after(LEFT_END, a);
        beach.insert_after(a, b);

        assert_eq!(beach.right(LEFT_END), a);
        assert_eq!(beach.right(a), b);
        assert_eq!(beach.left(RIGHT_END), b);
        assert_eq!(beach.iter().count(), 2);

        beach.delete(a);
        assert!(beach.get(a).deleted);
        assert_eq!(beach.right(LEFT_END), b);
        assert_eq!(beach.left(b), LEFT_END);
        assert_eq!(beach.iter().count(), 1);
    }

    #[test]
    fn test_regions() {
        let (_, edges) = single_edge();
        let mut beach = BeachLine::new(2, 0.0, 10.0);
        let l = beach.create(0, Side::Left);
        let r = beach.create(0, Side::Right);
        assert_eq!(beach.left_region(l, &edges, 0), 0);
        assert_eq!(beach.right_region(l, &edges, 0), 1);
        assert_eq!(beach.left_region(r, &edges, 0), 1);
        assert_eq!(beach.right_region(r, &edges, 0), 0);
        assert_eq!(beach.right_region(LEFT_END, &edges, 7), 7);
    }

    #[test]
    fn test_locate_between_half_edges() {
        let (sites, edges) = single_edge();
        let mut beach = BeachLine::new(3, 0.0, 20.0);
        let l = beach.create(0, Side::Left);
        let r = beach.create(0, Side::Right);
        beach.insert_after(LEFT_END, l);
        beach.insert_after(l, r);

        // A point far to the left falls before the first bisector.
        assert_eq!(beach.locate(Point::new(-5.0, 10.0), &edges, &sites), LEFT_END);
        // Right of x = 5: between the two halves.
        assert_eq!(beach.locate(Point::new(20.0, 10.0), &edges, &sites), l);
    }

    #[test]
    fn test_deleted_hash_entry_is_skipped() {
        let (sites, edges) = single_edge();
        let mut beach = BeachLine::new(12, 0.0, 10.0);
        let l = beach.create(0, Side::Left);
        let r = beach.create(0, Side::Right);
        beach.insert_after(LEFT_END, l);
        beach.insert_after(l, r);

        let p = Point::new(6.0, 10.0);
        assert_eq!(beach.locate(p, &edges, &sites), l);
        beach.delete(l);
        assert_eq!(beach.locate(p, &edges, &sites), LEFT_END);
    }
}

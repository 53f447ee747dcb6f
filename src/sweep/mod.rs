//! Fortune's sweep over a fixed set of sites.
//!
//! A [`BuildContext`] owns everything a single sweep needs: the site arena, the edges
//! under construction, the beach line and the circle event queue. It is created for one
//! build and consumed into a [`Diagram`].

pub mod beach_line;

use crate::bounds::BoundingBox;
use crate::config::VoronoiConfig;
use crate::diagram::{Cell, Diagram, Edge};
use crate::geometry::{CellKey, Line, Point, Segment};
use crate::queue::{BucketQueue, EventKey, EventQueue, HalfEdgeId, OrderedQueue, QueueKind};
use crate::SiteId;
use beach_line::BeachLine;
use std::cmp::Ordering;
use tracing::warn;

/// Which side of its bisector a half-edge stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// An input site or a circle event vertex.
#[derive(Clone, Debug)]
pub struct SweepSite {
    pub point: Point,
    /// Owner id for input sites, `None` for vertices.
    pub id: Option<SiteId>,
    /// Sweep order for input sites, vertex index once a vertex is emitted.
    pub num: Option<usize>,
    /// Number of live references from edges and the event queue.
    pub refs: i32,
}

/// A bisector under construction. Indices refer to the site arena.
#[derive(Clone, Debug)]
pub struct SweepEdge {
    pub line: Line,
    pub region: [usize; 2],
    pub endpoint: [Option<usize>; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepState {
    Running,
    Done,
}

/// Transient state of one sweep.
pub struct BuildContext<Q: EventQueue> {
    sites: Vec<SweepSite>,
    site_count: usize,
    next_site: usize,
    edges: Vec<SweepEdge>,
    beach: BeachLine,
    queue: Q,
    diagram: Diagram,
    parallel_epsilon: f64,
    state: SweepState,
}

/// The site the sweep starts from, standing in for the region below every sentinel.
const BOTTOM: usize = 0;

impl<Q: EventQueue> BuildContext<Q> {
    /// Prepares a sweep over `sites`, which must be non-empty, sorted in sweep order
    /// and free of duplicate coordinates.
    pub fn new(sites: &[(SiteId, Point)], queue: Q, config: &VoronoiConfig) -> Self {
        assert!(!sites.is_empty(), "a sweep needs at least one site");
        debug_assert!(sites
            .windows(2)
            .all(|w| w[0].1.sweep_cmp(&w[1].1) == Ordering::Less));

        let (min, max) = extents(sites);
        let mut diagram = Diagram {
            bounds: Some(BoundingBox::padded_from_extents(min, max, config.padding)),
            ..Default::default()
        };
        for &(id, point) in sites {
            diagram.cells.insert(
                CellKey::new(point),
                Cell {
                    site: id,
                    point,
                    edges: Vec::new(),
                },
            );
        }

        BuildContext {
            sites: sites
                .iter()
                .enumerate()
                .map(|(num, &(id, point))| SweepSite {
                    point,
                    id: Some(id),
                    num: Some(num),
                    refs: 0,
                })
                .collect(),
            site_count: sites.len(),
            // The first site is the bottom region, not an event.
            next_site: 1,
            edges: Vec::new(),
            beach: BeachLine::new(sites.len(), min[0], max[0]),
            queue,
            diagram,
            parallel_epsilon: config.parallel_epsilon,
            state: SweepState::Running,
        }
    }

    /// Runs the sweep to completion.
    pub fn run(mut self) -> Diagram {
        while self.step() == SweepState::Running {}
        self.finish()
    }

    /// Processes the next event, or finalises the open edges when none remain.
    pub fn step(&mut self) -> SweepState {
        if self.state == SweepState::Done {
            return SweepState::Done;
        }

        let min_key = self.queue.min_key();
        let site_first = self.next_site < self.site_count
            && match min_key {
                None => true,
                Some(key) => self.sites[self.next_site].point.sweep_cmp(&key.point()) == Ordering::Less,
            };

        if site_first {
            let site = self.next_site;
            self.next_site += 1;
            self.site_event(site);
        } else if !self.queue.is_empty() {
            self.circle_event();
        } else {
            self.finalize();
            self.state = SweepState::Done;
        }
        self.state
    }

    fn site_event(&mut self, site: usize) {
        let p = self.sites[site].point;
        let lbnd = self.beach.locate(p, &self.edges, &self.sites);
        let rbnd = self.beach.right(lbnd);
        let bot = self.beach.right_region(lbnd, &self.edges, BOTTOM);

        let e = self.bisect(bot, site);

        let bisector = self.beach.create(e, Side::Left);
        self.beach.insert_after(lbnd, bisector);
        if let Some(v) = self.intersect(lbnd, bisector) {
            self.queue_delete(lbnd);
            self.queue_insert(lbnd, v, v.distance(&p));
        }

        let lbnd = bisector;
        let bisector = self.beach.create(e, Side::Right);
        self.beach.insert_after(lbnd, bisector);
        if let Some(v) = self.intersect(bisector, rbnd) {
            self.queue_insert(bisector, v, v.distance(&p));
        }
    }

    fn circle_event(&mut self) {
        let Some((lbnd, _)) = self.queue.extract_min() else {
            return;
        };
        let llbnd = self.beach.left(lbnd);
        let rbnd = self.beach.right(lbnd);
        let rrbnd = self.beach.right(rbnd);
        let mut bot = self.beach.left_region(lbnd, &self.edges, BOTTOM);
        let mut top = self.beach.right_region(rbnd, &self.edges, BOTTOM);

        let Some(v) = self.beach.get_mut(lbnd).vertex.take() else {
            panic!("circle event on half-edge {lbnd} without a vertex");
        };
        self.make_vertex(v);

        let (l, r) = (self.beach.get(lbnd), self.beach.get(rbnd));
        let (l_edge, l_side) = (half_edge_edge(l.edge), l.side);
        let (r_edge, r_side) = (half_edge_edge(r.edge), r.side);
        self.endpoint(l_edge, l_side, v);
        self.endpoint(r_edge, r_side, v);

        self.beach.delete(lbnd);
        self.queue_delete(rbnd);
        self.beach.delete(rbnd);

        let mut side = Side::Left;
        if self.sites[bot].point.y > self.sites[top].point.y {
            std::mem::swap(&mut bot, &mut top);
            side = Side::Right;
        }

        let e = self.bisect(bot, top);
        let bisector = self.beach.create(e, side);
        self.beach.insert_after(llbnd, bisector);
        self.endpoint(e, side.opposite(), v);
        self.sites[v].refs -= 1;

        let bot_point = self.sites[bot].point;
        if let Some(p) = self.intersect(llbnd, bisector) {
            self.queue_delete(llbnd);
            self.queue_insert(llbnd, p, p.distance(&bot_point));
        }
        if let Some(p) = self.intersect(bisector, rrbnd) {
            self.queue_insert(bisector, p, p.distance(&bot_point));
        }
    }

    /// Creates the bisector of two regions and records it on both cells.
    fn bisect(&mut self, s1: usize, s2: usize) -> usize {
        let line = Line::bisector(self.sites[s1].point, self.sites[s2].point);
        self.sites[s1].refs += 1;
        self.sites[s2].refs += 1;

        let index = self.edges.len();
        self.edges.push(SweepEdge {
            line,
            region: [s1, s2],
            endpoint: [None, None],
        });

        let ids = [self.site_id(s1), self.site_id(s2)];
        self.diagram.edges.push(Edge {
            line,
            sites: ids,
            vertices: [None, None],
            segment: None,
        });
        for s in [s1, s2] {
            let key = CellKey::new(self.sites[s].point);
            match self.diagram.cells.get_mut(&key) {
                Some(cell) => cell.edges.push(index),
                None => panic!("bisector region {s} has no cell"),
            }
        }
        index
    }

    /// Intersection of the bisectors of two neighbouring half-edges, if it lies
    /// on the side where both half-edges can still meet.
    fn intersect(&self, el1: HalfEdgeId, el2: HalfEdgeId) -> Option<Point> {
        let (h1, h2) = (self.beach.get(el1), self.beach.get(el2));
        let (e1, e2) = (&self.edges[h1.edge?], &self.edges[h2.edge?]);
        if e1.region[1] == e2.region[1] {
            return None;
        }

        let p = e1.line.intersection(&e2.line, self.parallel_epsilon)?;

        let top1 = self.sites[e1.region[1]].point;
        let top2 = self.sites[e2.region[1]].point;
        let (he, e) = if top1.sweep_cmp(&top2) == Ordering::Less {
            (h1, e1)
        } else {
            (h2, e2)
        };

        let right_of_site = p.x >= self.sites[e.region[1]].point.x;
        if (right_of_site && he.side == Side::Left) || (!right_of_site && he.side == Side::Right) {
            return None;
        }
        Some(p)
    }

    /// Sets one end of edge `e` to vertex `s`, emitting the edge once both ends are known.
    fn endpoint(&mut self, e: usize, side: Side, s: usize) {
        self.edges[e].endpoint[side.index()] = Some(s);
        self.sites[s].refs += 1;

        if self.edges[e].endpoint[side.opposite().index()].is_none() {
            return;
        }

        self.out_ep(e);
        let [left, right] = self.edges[e].region;
        self.sites[left].refs -= 1;
        self.sites[right].refs -= 1;
    }

    /// Writes the vertex indices and clipped segment of edge `e` to the diagram.
    fn out_ep(&mut self, e: usize) {
        let edge = &self.edges[e];
        let vertex_num = |end: Option<usize>| end.and_then(|s| self.sites[s].num);
        let vertices = [vertex_num(edge.endpoint[0]), vertex_num(edge.endpoint[1])];
        let ends = edge.endpoint.map(|end| end.map(|s| self.sites[s].point));

        let segment = self
            .diagram
            .bounds
            .as_ref()
            .and_then(|bbox| Segment::clip(&edge.line, ends, bbox));

        let out = &mut self.diagram.edges[e];
        out.vertices = vertices;
        out.segment = segment;
    }

    fn make_vertex(&mut self, v: usize) {
        let point = self.sites[v].point;
        debug_assert!(point.is_finite(), "non-finite vertex {point}");
        self.sites[v].num = Some(self.diagram.vertices.len());
        self.diagram.vertices.push(point);
    }

    fn queue_insert(&mut self, he: HalfEdgeId, p: Point, offset: f64) {
        let v = self.sites.len();
        self.sites.push(SweepSite {
            point: p,
            id: None,
            num: None,
            refs: 1,
        });

        let key = EventKey::new(p, offset);
        let h = self.beach.get_mut(he);
        h.vertex = Some(v);
        h.ystar = key.y;
        self.queue.insert(he, key);
    }

    fn queue_delete(&mut self, he: HalfEdgeId) {
        let h = self.beach.get_mut(he);
        let Some(v) = h.vertex.take() else {
            return;
        };
        let key = EventKey {
            y: h.ystar,
            x: self.sites[v].point.x,
        };
        let removed = self.queue.delete(he, key);
        assert!(removed, "half-edge {he} had a vertex but no queued event");
        self.sites[v].refs -= 1;
    }

    /// Emits every edge still on the beach line; these keep their open ends.
    fn finalize(&mut self) {
        let open: Vec<usize> = self.beach.iter().filter_map(|h| h.edge).collect();
        for e in open {
            self.out_ep(e);
        }
    }

    fn site_id(&self, s: usize) -> SiteId {
        match self.sites[s].id {
            Some(id) => id,
            None => panic!("site {s} is a vertex, not a region"),
        }
    }

    /// Consumes the context into its diagram.
    pub fn finish(self) -> Diagram {
        debug_assert_eq!(self.state, SweepState::Done);
        self.diagram
    }

    #[cfg(test)]
    fn run_keep(&mut self) {
        while self.step() == SweepState::Running {}
    }
}

fn half_edge_edge(edge: Option<usize>) -> usize {
    match edge {
        Some(e) => e,
        None => panic!("circle event next to a beach line sentinel"),
    }
}

fn extents(sites: &[(SiteId, Point)]) -> ([f64; 2], [f64; 2]) {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for (_, p) in sites {
        min[0] = min[0].min(p.x);
        min[1] = min[1].min(p.y);
        max[0] = max[0].max(p.x);
        max[1] = max[1].max(p.y);
    }
    (min, max)
}

/// Sorts `sites` into sweep order and drops coordinate duplicates, keeping the last
/// of each run. Sites given in ascending id order thus keep the largest id.
pub fn prepare_sites(sites: &[(SiteId, Point)]) -> Vec<(SiteId, Point)> {
    let mut sorted: Vec<(SiteId, Point)> = sites
        .iter()
        .map(|&(id, p)| (id, CellKey::new(p).point()))
        .collect();
    sorted.sort_by(|a, b| a.1.sweep_cmp(&b.1));

    let mut unique: Vec<(SiteId, Point)> = Vec::with_capacity(sorted.len());
    for (id, p) in sorted {
        match unique.last_mut() {
            Some(last) if last.1 == p => {
                warn!(kept = id, dropped = last.0, x = p.x, y = p.y, "sites share a coordinate");
                *last = (id, p);
            }
            _ => unique.push((id, p)),
        }
    }
    unique
}

/// Builds the Voronoi diagram of `sites`.
pub fn build(sites: &[(SiteId, Point)], config: &VoronoiConfig) -> Diagram {
    let sites = prepare_sites(sites);
    if sites.is_empty() {
        return Diagram::default();
    }

    match config.queue {
        QueueKind::Buckets => {
            let ymin = sites[0].1.y;
            let ymax = sites[sites.len() - 1].1.y;
            BuildContext::new(&sites, BucketQueue::new(sites.len(), ymin, ymax), config).run()
        }
        QueueKind::Ordered => BuildContext::new(&sites, OrderedQueue::new(), config).run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scenario_a() -> Vec<(SiteId, Point)> {
        vec![
            (1, Point::new(0.0, 0.0)),
            (2, Point::new(10.0, 0.0)),
            (3, Point::new(5.0, 10.0)),
        ]
    }

    fn random_sites(count: usize, seed: u64) -> Vec<(SiteId, Point)> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count as SiteId)
            .map(|id| (id, Point::new(rng.r#gen::<f64>() * 1000.0, rng.r#gen::<f64>() * 1000.0)))
            .collect()
    }

    fn context(sites: &[(SiteId, Point)], config: &VoronoiConfig) -> BuildContext<BucketQueue> {
        let sites = prepare_sites(sites);
        let ymin = sites[0].1.y;
        let ymax = sites[sites.len() - 1].1.y;
        BuildContext::new(&sites, BucketQueue::new(sites.len(), ymin, ymax), config)
    }

    #[test]
    fn test_scenario_a_geometry() {
        let diagram = build(&scenario_a(), &VoronoiConfig::default());
        assert_eq!(diagram.edges().len(), 3);
        assert_eq!(diagram.vertices().len(), 1);

        let v = diagram.vertices()[0];
        assert!((v.x - 5.0).abs() < 1e-9);
        assert!((v.y - 3.75).abs() < 1e-9);

        // The bisector of 1 and 2 is x = 5, ending at the vertex.
        let e = diagram
            .edges()
            .iter()
            .find(|e| e.sites == [1, 2])
            .expect("edge between 1 and 2");
        assert_eq!(e.line, Line::new(1.0, 0.0, 5.0));
        assert!(e.vertices.contains(&Some(0)));
        assert!(e.is_open());

        let seg = e.segment.expect("clipped segment");
        assert!((seg.p1.x - 5.0).abs() < 1e-9 && (seg.p1.y + 0.5).abs() < 1e-9);
        assert!((seg.p2.x - 5.0).abs() < 1e-9 && (seg.p2.y - 3.75).abs() < 1e-9);

        let cell = diagram.cell_at(Point::new(0.0, 0.0)).unwrap();
        let mut neighbors = diagram.neighbors_of(cell);
        neighbors.sort();
        assert_eq!(neighbors, vec![2, 3]);
    }

    #[test]
    fn test_reference_counts() {
        let config = VoronoiConfig::default();
        let mut ctx = context(&random_sites(200, 7), &config);
        ctx.run_keep();
        assert_eq!(ctx.state, SweepState::Done);
        assert!(ctx.queue.is_empty());

        for (i, site) in ctx.sites.iter().enumerate() {
            match (site.id, site.num) {
                (Some(_), _) => {
                    let open = ctx
                        .edges
                        .iter()
                        .filter(|e| e.region.contains(&i))
                        .filter(|e| e.endpoint.iter().any(Option::is_none))
                        .count();
                    assert_eq!(site.refs, open as i32, "input site {i}");
                }
                (None, Some(_)) => assert_eq!(site.refs, 3, "vertex {i}"),
                (None, None) => assert_eq!(site.refs, 0, "discarded candidate {i}"),
            }
        }
    }

    #[test]
    fn test_queues_build_identical_diagrams() {
        let sites = random_sites(500, 11);
        let buckets = build(&sites, &VoronoiConfig::default());
        let ordered = build(
            &sites,
            &VoronoiConfig {
                queue: QueueKind::Ordered,
                ..Default::default()
            },
        );
        assert_eq!(buckets, ordered);
    }

    #[test]
    fn test_degenerate_inputs() {
        let config = VoronoiConfig::default();
        assert_eq!(build(&[], &config), Diagram::default());

        let single = build(&[(4, Point::new(2.0, 2.0))], &config);
        assert_eq!(single.cell_count(), 1);
        assert!(single.edges().is_empty());

        // A row of sites: parallel bisectors, no vertices.
        let row: Vec<_> = (0..5).map(|i| (i, Point::new(i as f64 * 10.0, 0.0))).collect();
        let diagram = build(&row, &config);
        assert_eq!(diagram.edges().len(), 4);
        assert!(diagram.vertices().is_empty());
        assert_eq!(diagram.open_edge_count(), 4);

        // A column behaves the same.
        let column: Vec<_> = (0..5).map(|i| (i, Point::new(0.0, i as f64 * 10.0))).collect();
        let diagram = build(&column, &config);
        assert_eq!(diagram.edges().len(), 4);
        assert!(diagram.vertices().is_empty());
    }

    #[test]
    fn test_duplicates_keep_largest_id() {
        let sites = vec![
            (1, Point::new(0.0, 0.0)),
            (2, Point::new(10.0, 0.0)),
            (3, Point::new(0.0, -0.0)),
            (4, Point::new(5.0, 10.0)),
        ];
        let prepared = prepare_sites(&sites);
        assert_eq!(prepared.len(), 3);

        let diagram = build(&sites, &VoronoiConfig::default());
        assert_eq!(diagram.cell_at(Point::new(0.0, 0.0)).map(|c| c.site), Some(3));
        assert!(diagram.edges().iter().all(|e| !e.sites.contains(&1)));
    }
}

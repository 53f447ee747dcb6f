use crate::bounds::BoundingBox;
use crate::geometry::{CellKey, Line, Point, Segment};
use crate::SiteId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Voronoi edge: the bisector between two sites, bounded by up to two vertices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub line: Line,
    /// Left and right site of the bisector.
    pub sites: [SiteId; 2],
    /// Indices into [`Diagram::vertices`]; `None` marks an end running off to infinity.
    pub vertices: [Option<usize>; 2],
    /// The edge clipped to the diagram bounds, `None` when it lies entirely outside.
    pub segment: Option<Segment>,
}

impl Edge {
    pub fn is_open(&self) -> bool {
        self.vertices.iter().any(Option::is_none)
    }

    /// The site across the edge from `site`.
    pub fn other(&self, site: SiteId) -> SiteId {
        if self.sites[0] == site {
            self.sites[1]
        } else {
            self.sites[0]
        }
    }
}

/// The region of the plane closer to one site than to any other.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub site: SiteId,
    pub point: Point,
    /// Indices into [`Diagram::edges`].
    pub edges: Vec<usize>,
}

/// Output of one sweep: cells keyed by site coordinate, edges and vertices.
///
/// A diagram is immutable once built. Sites sharing a coordinate share one cell,
/// owned by the largest id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagram {
    pub(crate) cells: BTreeMap<CellKey, Cell>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) vertices: Vec<Point>,
    pub(crate) bounds: Option<BoundingBox>,
}

impl Diagram {
    pub fn cell_at(&self, p: Point) -> Option<&Cell> {
        self.cells.get(&CellKey::new(p))
    }

    /// Cells in sweep order of their sites.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.values()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The padded clip box, `None` for an empty diagram.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn edges_of<'a>(&'a self, cell: &'a Cell) -> impl Iterator<Item = &'a Edge> + 'a {
        cell.edges.iter().map(move |&e| &self.edges[e])
    }

    pub fn open_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_open()).count()
    }

    /// Sites sharing an edge with `cell`.
    pub fn neighbors_of(&self, cell: &Cell) -> Vec<SiteId> {
        self.edges_of(cell).map(|e| e.other(cell.site)).collect()
    }

    /// Whether `p` lies on the same side as the site of every bisector around `cell`.
    ///
    /// Points within `epsilon` of a bisector count as inside.
    pub fn cell_contains(&self, cell: &Cell, p: Point, epsilon: f64) -> bool {
        self.edges_of(cell).all(|edge| {
            let line = &edge.line;
            let site_side = line.a * cell.point.x + line.b * cell.point.y > line.c;
            let point_side = if line.eval(&p).abs() < epsilon {
                site_side
            } else {
                line.a * p.x + line.b * p.y > line.c
            };
            site_side == point_side
        })
    }

    /// Whether `cell` is unbounded, or reaches farther than `radius` from `center`.
    pub fn cell_is_boundary(&self, cell: &Cell, center: Point, radius: f64) -> bool {
        if cell.edges.is_empty() {
            return true;
        }
        self.edges_of(cell).any(|edge| {
            edge.vertices.iter().any(|v| match v {
                None => true,
                Some(v) => self.vertices[*v].distance(&center) > radius,
            })
        })
    }
}

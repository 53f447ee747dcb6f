use crate::diagram::Diagram;
use crate::geometry::Point;
use crate::sweep;
use crate::voronoi::{SiteId, Voronoi};
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Proximity and topology queries. Each of them rebuilds the diagram first if the
/// registry changed since the last build.
impl Voronoi {
    /// Whether `p` lies in the cell of `id`. Points within the boundary tolerance of an
    /// edge count as inside, so neighbouring cells may both claim them.
    pub fn contains(&mut self, id: SiteId, p: impl Into<Point>) -> bool {
        let p = p.into();
        let Some(site) = self.site_for_query(id) else {
            return false;
        };
        let epsilon = self.config.boundary_epsilon;
        match self.diagram.cell_at(site) {
            Some(cell) => self.diagram.cell_contains(cell, p, epsilon),
            None => false,
        }
    }

    /// Sites sharing an edge with `id`, or `None` if `id` is unknown.
    pub fn enclosing_neighbors(&mut self, id: SiteId) -> Option<Vec<SiteId>> {
        let site = self.site_for_query(id)?;
        neighbors_at(&self.diagram, site)
    }

    /// Whether `id` is an enclosing neighbor of `center_id`.
    pub fn is_enclosing(&mut self, id: SiteId, center_id: SiteId) -> bool {
        self.enclosing_neighbors(center_id)
            .is_some_and(|neighbors| neighbors.contains(&id))
    }

    /// Whether the cell of `id` is not fully enclosed by the circle at `center`.
    ///
    /// Only edge endpoints are checked: a cell with an open edge, no edges at all, or
    /// a vertex farther than `radius` from `center` is a boundary cell.
    pub fn is_boundary(&mut self, id: SiteId, center: impl Into<Point>, radius: f64) -> bool {
        let center = center.into();
        let Some(site) = self.site_for_query(id) else {
            return false;
        };
        match self.diagram.cell_at(site) {
            Some(cell) => self.diagram.cell_is_boundary(cell, center, radius),
            None => false,
        }
    }

    /// Whether the site `id` lies within `radius` of `center`.
    pub fn overlaps(&mut self, id: SiteId, center: impl Into<Point>, radius: f64) -> bool {
        let center = center.into();
        self.site_for_query(id)
            .is_some_and(|site| site.distance(&center) <= radius)
    }

    /// The site nearest to `p`. Ties go to the smallest id.
    pub fn closest_to(&mut self, p: impl Into<Point>) -> Option<SiteId> {
        let p = p.into();
        self.recompute();

        let mut closest: Option<(SiteId, f64)> = None;
        for (&id, site) in &self.sites {
            let d = site.distance(&p);
            match closest {
                Some((_, min)) if d >= min => {}
                _ => closest = Some((id, d)),
            }
        }
        closest.map(|(id, _)| id)
    }

    /// Enclosing neighbors up to `level` rings out.
    ///
    /// Ring `k` is found by removing every neighbor of the first `k - 1` rings and
    /// rebuilding. The rings are concatenated in order. The registry is left untouched.
    pub fn enclosing_neighbors_at_level(&mut self, id: SiteId, level: usize) -> Option<Vec<SiteId>> {
        let site = self.site_for_query(id)?;
        let mut found: Vec<SiteId> = Vec::new();

        for ring in 0..level {
            let rebuilt;
            let diagram = if found.is_empty() {
                &self.diagram
            } else {
                let excluded: BTreeSet<SiteId> = found.iter().copied().collect();
                let remaining: Vec<(SiteId, Point)> = self
                    .sites
                    .iter()
                    .filter(|(other, _)| !excluded.contains(*other))
                    .map(|(&other, &p)| (other, p))
                    .collect();
                rebuilt = sweep::build(&remaining, &self.config);
                &rebuilt
            };
            let next = neighbors_at(diagram, site).unwrap_or_default();

            debug!(id, ring, count = next.len(), "enclosing neighbor ring");
            found.extend(next);
        }
        Some(found)
    }

    /// Sites other than `id` within `radius` of it, in ascending id order.
    pub fn aoi_neighbors(&self, id: SiteId, radius: f64) -> Vec<SiteId> {
        let Some(site) = self.get(id) else {
            return Vec::new();
        };
        self.sites
            .iter()
            .filter(|&(&other, p)| other != id && p.distance(&site) <= radius)
            .map(|(&other, _)| other)
            .collect()
    }

    /// Enclosing neighbors of `id` followed by any other site within `radius` of it.
    pub fn neighbors(&mut self, id: SiteId, radius: f64) -> Vec<SiteId> {
        let Some(mut list) = self.enclosing_neighbors(id) else {
            return Vec::new();
        };
        for other in self.aoi_neighbors(id, radius) {
            if !list.contains(&other) {
                list.push(other);
            }
        }
        list
    }

    /// Sites within `radius` of `center` whose cells reach past the circle, judged in
    /// a diagram of those sites alone. Sorted by id.
    pub fn boundary_neighbors(&self, center: impl Into<Point>, radius: f64) -> Vec<SiteId> {
        let center = center.into();
        let inside: Vec<(SiteId, Point)> = self
            .sites
            .iter()
            .filter(|(_, p)| p.distance(&center) <= radius)
            .map(|(&id, &p)| (id, p))
            .collect();

        let diagram = sweep::build(&inside, &self.config);
        let mut ids: Vec<SiteId> = diagram
            .cells
            .par_iter()
            .filter(|(_, cell)| diagram.cell_is_boundary(cell, center, radius))
            .map(|(_, cell)| cell.site)
            .collect();
        ids.sort_unstable();
        ids
    }
}

fn neighbors_at(diagram: &Diagram, site: Point) -> Option<Vec<SiteId>> {
    diagram.cell_at(site).map(|cell| diagram.neighbors_of(cell))
}

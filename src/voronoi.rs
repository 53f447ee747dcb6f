use crate::bounds::BoundingBox;
use crate::config::VoronoiConfig;
use crate::diagram::{Cell, Diagram, Edge};
use crate::error::Result;
use crate::geometry::Point;
use crate::sweep;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Caller assigned identifier of a site.
pub type SiteId = u32;

/// Upper bound on jitter rounds for one colliding site.
const MAX_JITTER_ATTEMPTS: usize = 1000;
/// Distance kept from the configured bounds when jittering.
const JITTER_MARGIN: f64 = 0.5;

/// A set of sites and the Voronoi diagram over them.
///
/// Mutations only touch the site registry and mark the diagram stale. The diagram is
/// rebuilt from scratch by the next query that needs it.
pub struct Voronoi {
    pub(crate) sites: BTreeMap<SiteId, Point>,
    pub(crate) config: VoronoiConfig,
    pub(crate) diagram: Diagram,
    pub(crate) dirty: bool,
    rng: StdRng,
}

impl Default for Voronoi {
    fn default() -> Self {
        Self::new()
    }
}

impl Voronoi {
    pub fn new() -> Self {
        let config = VoronoiConfig::default();
        Self {
            sites: BTreeMap::new(),
            rng: StdRng::seed_from_u64(config.seed),
            config,
            diagram: Diagram::default(),
            dirty: false,
        }
    }

    pub fn with_config(config: VoronoiConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sites: BTreeMap::new(),
            rng: StdRng::seed_from_u64(config.seed),
            config,
            diagram: Diagram::default(),
            dirty: false,
        })
    }

    pub fn config(&self) -> &VoronoiConfig {
        &self.config
    }

    /// Registers a new site. Returns `false` and changes nothing when `id` is taken,
    /// or the position is not finite or falls outside the configured bounds.
    pub fn insert(&mut self, id: SiteId, p: impl Into<Point>) -> bool {
        let p = p.into();
        if self.sites.contains_key(&id) {
            warn!(id, "site id already registered");
            return false;
        }
        if !self.accepts(p) {
            warn!(id, x = p.x, y = p.y, "site position rejected");
            return false;
        }

        let p = self.resolve_collision(id, p);
        self.sites.insert(id, p);
        self.dirty = true;
        true
    }

    /// Removes a site. Returns `false` when `id` is unknown.
    pub fn remove(&mut self, id: SiteId) -> bool {
        if self.sites.remove(&id).is_none() {
            debug!(id, "remove of unknown site");
            return false;
        }
        self.dirty = true;
        true
    }

    /// Moves a site, inserting it when `id` is unknown.
    pub fn update(&mut self, id: SiteId, p: impl Into<Point>) -> bool {
        let p = p.into();
        if !self.sites.contains_key(&id) {
            return self.insert(id, p);
        }
        if !p.is_finite() {
            warn!(id, x = p.x, y = p.y, "site position rejected");
            return false;
        }

        let p = self.resolve_collision(id, p);
        self.sites.insert(id, p);
        self.dirty = true;
        true
    }

    pub fn get(&self, id: SiteId) -> Option<Point> {
        self.sites.get(&id).copied()
    }

    pub fn size(&self) -> usize {
        self.sites.len()
    }

    pub fn all_sites(&self) -> &BTreeMap<SiteId, Point> {
        &self.sites
    }

    /// Whether the registry changed since the last rebuild.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear(&mut self) {
        self.sites.clear();
        self.dirty = true;
    }

    /// Rebuilds the diagram if any site changed since the last build.
    pub fn recompute(&mut self) {
        if !self.dirty {
            return;
        }
        let sites: Vec<(SiteId, Point)> = self.sites.iter().map(|(&id, &p)| (id, p)).collect();
        self.diagram = sweep::build(&sites, &self.config);
        self.dirty = false;

        debug!(
            sites = sites.len(),
            cells = self.diagram.cell_count(),
            edges = self.diagram.edges().len(),
            vertices = self.diagram.vertices().len(),
            "rebuilt voronoi diagram"
        );
    }

    /// The current diagram, rebuilt if needed.
    pub fn diagram(&mut self) -> &Diagram {
        self.recompute();
        &self.diagram
    }

    pub fn edges(&mut self) -> &[Edge] {
        self.diagram().edges()
    }

    pub fn vertices(&mut self) -> &[Point] {
        self.diagram().vertices()
    }

    /// The cell holding site `id`. Sites sharing a coordinate share a cell.
    pub fn cell(&mut self, id: SiteId) -> Option<&Cell> {
        let p = self.site_for_query(id)?;
        self.diagram.cell_at(p)
    }

    /// The padded clip box of the current diagram.
    pub fn bounding_box(&mut self) -> Option<BoundingBox> {
        self.diagram().bounds()
    }

    /// Rebuilds if needed and returns the position of `id`.
    pub(crate) fn site_for_query(&mut self, id: SiteId) -> Option<Point> {
        self.recompute();
        let p = self.sites.get(&id).copied();
        if p.is_none() {
            debug!(id, "query for unknown site");
        }
        p
    }

    fn accepts(&self, p: Point) -> bool {
        if !p.is_finite() {
            return false;
        }
        match &self.config.bounds {
            Some(bounds) => bounds.contains(&p),
            None => true,
        }
    }

    fn is_taken(&self, id: SiteId, p: Point) -> bool {
        self.sites.iter().any(|(&other, &q)| other != id && q == p)
    }

    /// Nudges `p` off a coordinate held by another site, when jitter is enabled.
    fn resolve_collision(&mut self, id: SiteId, mut p: Point) -> Point {
        if !self.is_taken(id, p) {
            return p;
        }
        if !self.config.jitter_duplicates {
            warn!(id, x = p.x, y = p.y, "site shares its coordinate with another site");
            return p;
        }

        for _ in 0..MAX_JITTER_ATTEMPTS {
            p.x += self.rng.r#gen::<f64>() - 0.1;
            p.y += self.rng.r#gen::<f64>() - 0.1;
            if let Some(bounds) = &self.config.bounds {
                p = bounds.clamp_inside(p, JITTER_MARGIN);
            }
            if !self.is_taken(id, p) {
                debug!(id, x = p.x, y = p.y, "moved colliding site");
                return p;
            }
        }

        warn!(id, "could not move site off a shared coordinate");
        p
    }
}

impl fmt::Display for Voronoi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, p) in &self.sites {
            write!(f, "[{id}] {p} ")?;
        }
        Ok(())
    }
}

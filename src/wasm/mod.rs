use crate::config::VoronoiConfig;
use crate::voronoi::{SiteId, Voronoi};
use wasm_bindgen::prelude::*;

pub mod utils;

use utils::{flatten_points, parse_js_point};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initThreads)]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// JavaScript handle on a [`Voronoi`]. Points are passed as `[x, y]` arrays or `{x, y}` objects.
#[wasm_bindgen(js_name = Voronoi)]
pub struct VoronoiWASM {
    inner: Voronoi,
}

impl Default for VoronoiWASM {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_class = Voronoi)]
impl VoronoiWASM {
    #[wasm_bindgen(constructor)]
    pub fn new() -> VoronoiWASM {
        VoronoiWASM { inner: Voronoi::new() }
    }

    /// Creates a diagram from a JSON configuration.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<VoronoiWASM, JsValue> {
        VoronoiConfig::from_json(json)
            .and_then(Voronoi::with_config)
            .map(|inner| VoronoiWASM { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn insert(&mut self, id: SiteId, point: JsValue) -> bool {
        parse_js_point(&point).is_some_and(|p| self.inner.insert(id, p))
    }

    pub fn remove(&mut self, id: SiteId) -> bool {
        self.inner.remove(id)
    }

    pub fn update(&mut self, id: SiteId, point: JsValue) -> bool {
        parse_js_point(&point).is_some_and(|p| self.inner.update(id, p))
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn get(&self, id: SiteId) -> Option<Vec<f64>> {
        self.inner.get(id).map(|p| vec![p.x, p.y])
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    pub fn contains(&mut self, id: SiteId, point: JsValue) -> bool {
        parse_js_point(&point).is_some_and(|p| self.inner.contains(id, p))
    }

    #[wasm_bindgen(js_name = getEnclosingNeighbors)]
    pub fn enclosing_neighbors(&mut self, id: SiteId) -> Option<Vec<SiteId>> {
        self.inner.enclosing_neighbors(id)
    }

    #[wasm_bindgen(js_name = getEnclosingNeighborsAtLevel)]
    pub fn enclosing_neighbors_at_level(&mut self, id: SiteId, level: usize) -> Option<Vec<SiteId>> {
        self.inner.enclosing_neighbors_at_level(id, level)
    }

    #[wasm_bindgen(js_name = isEnclosing)]
    pub fn is_enclosing(&mut self, id: SiteId, center_id: SiteId) -> bool {
        self.inner.is_enclosing(id, center_id)
    }

    #[wasm_bindgen(js_name = isBoundary)]
    pub fn is_boundary(&mut self, id: SiteId, center: JsValue, radius: f64) -> bool {
        parse_js_point(&center).is_some_and(|c| self.inner.is_boundary(id, c, radius))
    }

    pub fn overlaps(&mut self, id: SiteId, center: JsValue, radius: f64) -> bool {
        parse_js_point(&center).is_some_and(|c| self.inner.overlaps(id, c, radius))
    }

    #[wasm_bindgen(js_name = closestTo)]
    pub fn closest_to(&mut self, point: JsValue) -> Option<SiteId> {
        parse_js_point(&point).and_then(|p| self.inner.closest_to(p))
    }

    #[wasm_bindgen(js_name = getAoiNeighbors)]
    pub fn aoi_neighbors(&self, id: SiteId, radius: f64) -> Vec<SiteId> {
        self.inner.aoi_neighbors(id, radius)
    }

    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn neighbors(&mut self, id: SiteId, radius: f64) -> Vec<SiteId> {
        self.inner.neighbors(id, radius)
    }

    #[wasm_bindgen(js_name = getBoundaryNeighbors)]
    pub fn boundary_neighbors(&self, center: JsValue, radius: f64) -> Vec<SiteId> {
        match parse_js_point(&center) {
            Some(c) => self.inner.boundary_neighbors(c, radius),
            None => Vec::new(),
        }
    }

    /// Registered sites as `[id, x, y, ...]`.
    #[wasm_bindgen(getter)]
    pub fn sites(&self) -> Vec<f64> {
        self.inner
            .all_sites()
            .iter()
            .flat_map(|(&id, p)| [id as f64, p.x, p.y])
            .collect()
    }

    /// Clipped edges as `[x1, y1, x2, y2, ...]`. Edges outside the clip box are skipped.
    #[wasm_bindgen(getter)]
    pub fn edges(&mut self) -> Vec<f64> {
        self.inner
            .edges()
            .iter()
            .filter_map(|e| e.segment)
            .flat_map(|s| [s.p1.x, s.p1.y, s.p2.x, s.p2.y])
            .collect()
    }

    /// Bisecting site ids of every edge as `[left, right, ...]`, aligned with the edge list.
    #[wasm_bindgen(getter)]
    pub fn edge_sites(&mut self) -> Vec<SiteId> {
        self.inner
            .edges()
            .iter()
            .filter(|e| e.segment.is_some())
            .flat_map(|e| e.sites)
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn vertices(&mut self) -> Vec<f64> {
        flatten_points(self.inner.vertices())
    }

    /// Clip box as `[min_x, min_y, max_x, max_y]`.
    #[wasm_bindgen(js_name = boundingBox)]
    pub fn bounding_box(&mut self) -> Option<Vec<f64>> {
        self.inner
            .bounding_box()
            .map(|b| vec![b.min[0], b.min[1], b.max[0], b.max[1]])
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_string_js(&self) -> String {
        self.inner.to_string()
    }
}

use crate::geometry::Point;
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;

/// Reads a point given either as an `[x, y]` array or as an `{x, y}` object.
pub fn parse_js_point(val: &JsValue) -> Option<Point> {
    if let Some(arr) = val.dyn_ref::<Array>() {
        if arr.length() < 2 {
            return None;
        }
        return Some(Point::new(arr.get(0).as_f64()?, arr.get(1).as_f64()?));
    }
    if val.is_object() {
        let x = Reflect::get(val, &"x".into()).ok()?.as_f64()?;
        let y = Reflect::get(val, &"y".into()).ok()?.as_f64()?;
        return Some(Point::new(x, y));
    }
    None
}

/// Flattens points into `[x0, y0, x1, y1, ...]`.
pub fn flatten_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Vec<f64> {
    points.into_iter().flat_map(|p| [p.x, p.y]).collect()
}

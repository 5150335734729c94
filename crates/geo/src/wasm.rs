//! WASM bindings for the geo crate.
//!
//! These bindings let the storefront pages call the locator from
//! JavaScript/TypeScript instead of re-declaring the distance formula per page.

use crate::json::{nearest_supplier_json, rank_suppliers_json};
use crate::{haversine_distance, Coordinate, GeoError, SupplierId};
use wasm_bindgen::prelude::*;

/// Calculate distance between two coordinates.
///
/// # Arguments
/// * `lat1` - Latitude of first point
/// * `lon1` - Longitude of first point
/// * `lat2` - Latitude of second point
/// * `lon2` - Longitude of second point
///
/// # Returns
/// Distance in kilometers
#[wasm_bindgen]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let from = Coordinate::new(lat1, lon1);
    let to = Coordinate::new(lat2, lon2);
    haversine_distance(&from, &to)
}

/// Find the supplier nearest to the user.
///
/// # Arguments
/// * `user_lat` - User's latitude
/// * `user_lon` - User's longitude
/// * `suppliers_json` - JSON array of suppliers (`id`, `name`, `city`, `product`, `lat`, `lon`)
/// * `supplier_ids` - Restrict the search to these ids (empty for all)
///
/// # Returns
/// JSON string `{"supplier": {...}, "distance_km": n, "label": "~n km"}`, or `null`
#[wasm_bindgen]
pub fn nearest_supplier(
    user_lat: f64,
    user_lon: f64,
    suppliers_json: &str,
    supplier_ids: Vec<u32>,
) -> Result<String, JsValue> {
    let ids: Vec<SupplierId> = supplier_ids.into_iter().map(SupplierId).collect();

    nearest_supplier_json(&Coordinate::new(user_lat, user_lon), suppliers_json, &ids).map_err(to_js_error)
}

/// Rank suppliers by distance, keeping those within a radius.
///
/// # Arguments
/// * `user_lat` - User's latitude
/// * `user_lon` - User's longitude
/// * `suppliers_json` - JSON array of suppliers
/// * `radius_km` - Maximum distance in kilometers (use `Infinity` for all)
///
/// # Returns
/// JSON string of `{"id", "distance_km"}` entries, closest first
#[wasm_bindgen]
pub fn rank_suppliers(
    user_lat: f64,
    user_lon: f64,
    suppliers_json: &str,
    radius_km: f64,
) -> Result<String, JsValue> {
    rank_suppliers_json(&Coordinate::new(user_lat, user_lon), suppliers_json, radius_km).map_err(to_js_error)
}

fn to_js_error(err: GeoError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

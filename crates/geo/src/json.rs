//! JSON bridge for the storefront pages.
//!
//! The pages hold suppliers as JSON arrays; these helpers take that shape in
//! and hand JSON back, so the browser bindings stay thin.

use crate::{find_nearest_among, rank_within_radius, Coordinate, Result, Supplier, SupplierId};

/// Nearest supplier to `reference` as `{"supplier", "distance_km", "label"}`,
/// or the JSON literal `null` when no candidate matched.
///
/// An empty `ids` slice searches every supplier.
pub fn nearest_supplier_json(reference: &Coordinate, suppliers_json: &str, ids: &[SupplierId]) -> Result<String> {
    let suppliers = Supplier::list_from_json(suppliers_json)?;

    let result = match find_nearest_among(reference, &suppliers, ids) {
        Some(nearest) => serde_json::json!({
            "supplier": nearest.supplier,
            "distance_km": nearest.distance_km,
            "label": nearest.distance_label(),
        }),
        None => serde_json::Value::Null,
    };

    Ok(result.to_string())
}

/// Suppliers within `radius_km` as a JSON array of `{"id", "distance_km"}`,
/// closest first.
pub fn rank_suppliers_json(reference: &Coordinate, suppliers_json: &str, radius_km: f64) -> Result<String> {
    let suppliers = Supplier::list_from_json(suppliers_json)?;
    let ranked = rank_within_radius(reference, &suppliers, radius_km);
    Ok(serde_json::to_string(&ranked)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoErrorCode;
    use serde_json::Value;

    const SUPPLIERS: &str = r#"[
        {"id": 1, "name": "Polinorte", "city": "Araguaína-TO", "product": "Blocos", "lat": -7.19238, "lon": -48.2044},
        {"id": 3, "name": "Ecolar", "city": "Palmas-TO", "product": "Tijolos", "lat": -10.31715, "lon": -48.3014},
        {"id": 5, "name": "Cotae", "city": "Palmas-TO", "product": "Tijolos", "lat": -10.1844, "lon": -48.3336}
    ]"#;

    const PALMAS: Coordinate = Coordinate::new(-10.1844, -48.3336);

    #[test]
    fn test_nearest_json_shape() {
        let json: Value = serde_json::from_str(&nearest_supplier_json(&PALMAS, SUPPLIERS, &[]).unwrap()).unwrap();

        assert_eq!(json["supplier"]["id"], 5);
        assert_eq!(json["supplier"]["latitude"], -10.1844);
        assert_eq!(json["distance_km"], 0.0);
        assert_eq!(json["label"], "~0 km");
    }

    #[test]
    fn test_nearest_json_subset() {
        let out = nearest_supplier_json(&PALMAS, SUPPLIERS, &[SupplierId(1), SupplierId(3)]).unwrap();
        let json: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["supplier"]["id"], 3);
        assert!(json["label"].as_str().unwrap().starts_with('~'));
    }

    #[test]
    fn test_nearest_json_null_when_nothing_matches() {
        assert_eq!(nearest_supplier_json(&PALMAS, "[]", &[]).unwrap(), "null");
        assert_eq!(nearest_supplier_json(&PALMAS, SUPPLIERS, &[SupplierId(99)]).unwrap(), "null");
    }

    #[test]
    fn test_rank_json() {
        let json: Value = serde_json::from_str(&rank_suppliers_json(&PALMAS, SUPPLIERS, 100.0).unwrap()).unwrap();
        let rows = json.as_array().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], 5);
        assert_eq!(rows[1]["id"], 3);
        assert!(rows[1]["distance_km"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_malformed_input() {
        let err = nearest_supplier_json(&PALMAS, "{not json", &[]).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::JsonParsing);

        let err = rank_suppliers_json(&PALMAS, r#"[{"id": 1}]"#, 10.0).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::JsonParsing);
    }
}

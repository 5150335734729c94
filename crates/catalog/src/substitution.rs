//! Sustainable substitutes for conventional building materials.
//!
//! A shopper lists the materials of a bill of quantities; each one is matched
//! against the substitution table by name and kept only if the substitute's
//! supplier is within the chosen distance.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Compatibility score given to materials with no table entry.
pub const FALLBACK_COMPATIBILITY: u8 = 80;

/// CO₂ reduction percentage assumed for materials with no table entry.
pub const FALLBACK_CO2_REDUCTION: u8 = 20;

/// An entry of the substitution table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    /// Lowercase match key, e.g. `cimento cp2`
    pub key: String,
    pub original: String,
    pub substitute: String,
    /// Compatibility with the original material, 0-100
    pub compatibility: u8,
    pub price: String,
    /// CO₂ reduction in percent
    pub co2_reduction: u8,
    /// Distance to the substitute's supplier
    pub distance_km: f64,
}

impl Substitution {
    /// Lowercases the key and checks ranges.
    pub(crate) fn normalized(mut self) -> Result<Self> {
        self.key = self.key.trim().to_lowercase();

        let reason = if self.key.is_empty() {
            Some("key must not be empty".to_string())
        } else if self.compatibility > 100 {
            Some(format!("compatibility {} is above 100", self.compatibility))
        } else if !(self.distance_km.is_finite() && self.distance_km >= 0.0) {
            Some(format!("distance {} km is not a non-negative number", self.distance_km))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CatalogError::InvalidSubstitution { key: self.key, reason }),
            None => Ok(self),
        }
    }

    fn matches(&self, material_name: &str) -> bool {
        material_name.contains(&self.key) || self.key.contains(material_name)
    }
}

/// A material the shopper needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequest {
    pub name: String,
    pub quantity: u32,
    pub unit: String,
}

impl MaterialRequest {
    pub fn new(name: impl Into<String>, quantity: u32, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// Parses `name[:quantity[:unit]]`, e.g. `Cimento CP2:10:sc`.
///
/// Quantity defaults to 1 and unit to `un`.
impl FromStr for MaterialRequest {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err("material name must not be empty".to_string());
        }

        let quantity = match parts.next().map(str::trim) {
            Some(q) if !q.is_empty() => q
                .parse::<u32>()
                .map_err(|e| format!("invalid quantity '{}': {}", q, e))?,
            _ => 1,
        };

        let unit = parts
            .next()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or("un");

        Ok(Self::new(name, quantity, unit))
    }
}

/// How a recommendation was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Found in the substitution table
    Catalog,
    /// Generic sustainable alternative, priced on quote
    Fallback,
}

/// A suggested substitute for one requested material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub original: String,
    pub substitute: String,
    pub compatibility: u8,
    /// `None` means priced on quote
    pub price: Option<String>,
    pub co2_reduction: u8,
    /// `None` when no supplier distance is known
    pub distance_km: Option<f64>,
    pub quantity: u32,
    pub unit: String,
}

/// Recommend substitutes for `materials`.
///
/// For each material (blank names are skipped) the first table entry whose key
/// is contained in the lowercase name, or that contains it, is the match. A
/// matched material is recommended only if the entry lies within
/// `max_distance_km`; it does not fall through to later entries. A material
/// with no match gets a generic fallback.
pub fn recommend(
    table: &[Substitution],
    materials: &[MaterialRequest],
    max_distance_km: f64,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(materials.len());

    for material in materials {
        let name = material.name.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }

        match table.iter().find(|entry| entry.matches(&name)) {
            Some(entry) if entry.distance_km <= max_distance_km => {
                recommendations.push(Recommendation {
                    kind: RecommendationKind::Catalog,
                    original: entry.original.clone(),
                    substitute: entry.substitute.clone(),
                    compatibility: entry.compatibility,
                    price: Some(entry.price.clone()),
                    co2_reduction: entry.co2_reduction,
                    distance_km: Some(entry.distance_km),
                    quantity: material.quantity,
                    unit: material.unit.clone(),
                });
            }
            Some(entry) => {
                tracing::debug!(
                    material = %material.name,
                    substitute = %entry.substitute,
                    distance_km = entry.distance_km,
                    max_distance_km,
                    "Substitute is outside the search radius"
                );
            }
            None => {
                let original = material.name.trim().to_string();
                recommendations.push(Recommendation {
                    kind: RecommendationKind::Fallback,
                    substitute: format!("{} Sustentável", original),
                    original,
                    compatibility: FALLBACK_COMPATIBILITY,
                    price: None,
                    co2_reduction: FALLBACK_CO2_REDUCTION,
                    distance_km: None,
                    quantity: material.quantity,
                    unit: material.unit.clone(),
                });
            }
        }
    }

    recommendations
}

/// Aggregate figures over a set of recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendationSummary {
    pub count: usize,
    /// Sum of CO₂ reduction percentages
    pub total_co2_reduction: u32,
    /// Mean compatibility, rounded; 0 when empty
    pub average_compatibility: u8,
}

impl RecommendationSummary {
    pub fn from_recommendations(recommendations: &[Recommendation]) -> Self {
        let count = recommendations.len();
        let total_co2_reduction = recommendations.iter().map(|r| u32::from(r.co2_reduction)).sum();

        let average_compatibility = if count == 0 {
            0
        } else {
            let sum: u32 = recommendations.iter().map(|r| u32::from(r.compatibility)).sum();
            (f64::from(sum) / count as f64).round() as u8
        };

        Self {
            count,
            total_co2_reduction,
            average_compatibility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    fn table() -> Vec<Substitution> {
        Catalog::bundled().unwrap().substitutions().to_vec()
    }

    #[test]
    fn test_exact_key_match() {
        let recs = recommend(&table(), &[MaterialRequest::new("Cimento CP2", 10, "sc")], 50.0);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Catalog);
        assert_eq!(recs[0].substitute, "Adobe Ecológico");
        assert_eq!(recs[0].quantity, 10);
        assert_eq!(recs[0].unit, "sc");
        assert_eq!(recs[0].distance_km, Some(8.0));
    }

    #[test]
    fn test_name_contains_key() {
        let recs = recommend(&table(), &[MaterialRequest::new("Areia média lavada", 3, "m³")], 50.0);
        assert_eq!(recs[0].substitute, "Areia Reciclada");
    }

    #[test]
    fn test_key_contains_name() {
        // "telh" is contained in the key "telha"
        let recs = recommend(&table(), &[MaterialRequest::new("telh", 1, "un")], 50.0);
        assert_eq!(recs[0].substitute, "Telha Ecológica Térmica");
    }

    #[test]
    fn test_out_of_radius_is_dropped_without_fallback() {
        // Brita 1 substitute is 10 km away
        let recs = recommend(&table(), &[MaterialRequest::new("Brita 1", 5, "m³")], 9.0);
        assert!(recs.is_empty());

        let recs = recommend(&table(), &[MaterialRequest::new("Brita 1", 5, "m³")], 10.0);
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_unknown_material_falls_back() {
        let recs = recommend(&table(), &[MaterialRequest::new("Vergalhão CA-50", 20, "barra")], 5.0);
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.kind, RecommendationKind::Fallback);
        assert_eq!(rec.substitute, "Vergalhão CA-50 Sustentável");
        assert_eq!(rec.compatibility, FALLBACK_COMPATIBILITY);
        assert_eq!(rec.co2_reduction, FALLBACK_CO2_REDUCTION);
        assert!(rec.price.is_none());
        assert!(rec.distance_km.is_none());
    }

    #[test]
    fn test_blank_names_are_skipped() {
        let recs = recommend(&table(), &[MaterialRequest::new("   ", 1, "un")], 50.0);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_summary() {
        let materials = [
            MaterialRequest::new("Cimento CP2", 1, "sc"),
            MaterialRequest::new("Tijolos", 1000, "un"),
            MaterialRequest::new("Vergalhão", 1, "barra"),
        ];
        let recs = recommend(&table(), &materials, 50.0);
        let summary = RecommendationSummary::from_recommendations(&recs);

        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_co2_reduction, 35 + 32 + 20);
        // (95 + 96 + 80) / 3 = 90.33
        assert_eq!(summary.average_compatibility, 90);
        assert_eq!(RecommendationSummary::from_recommendations(&[]).average_compatibility, 0);
    }

    #[test]
    fn test_parse_material_request() {
        let req: MaterialRequest = "Cimento CP2:10:sc".parse().unwrap();
        assert_eq!(req, MaterialRequest::new("Cimento CP2", 10, "sc"));

        let req: MaterialRequest = "Areia".parse().unwrap();
        assert_eq!(req, MaterialRequest::new("Areia", 1, "un"));

        assert!("Areia:many".parse::<MaterialRequest>().is_err());
        assert!(":3".parse::<MaterialRequest>().is_err());
    }

    #[test]
    fn test_normalized_rejects_bad_entries() {
        let entry = Substitution {
            key: "  Reboco ".to_string(),
            original: "Reboco".to_string(),
            substitute: "Reboco Sustentável".to_string(),
            compatibility: 92,
            price: "R$ 55,00".to_string(),
            co2_reduction: 22,
            distance_km: 12.0,
        };
        assert_eq!(entry.clone().normalized().unwrap().key, "reboco");

        let too_compatible = Substitution { compatibility: 101, ..entry.clone() };
        assert!(too_compatible.normalized().is_err());

        let negative = Substitution { distance_km: -1.0, ..entry };
        assert!(negative.normalized().is_err());
    }
}

//! Supplier records as seen by the locator.

use crate::{Coordinate, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, unique supplier identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(pub u32);

impl fmt::Display for SupplierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for SupplierId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A supplier of sustainable construction materials.
///
/// The location is flattened on the wire, so `{"id": 1, ..., "lat": -7.1, "lon": -48.2}`
/// deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    /// City label, e.g. `Palmas-TO`
    pub city: String,
    /// Product or category description
    pub product: String,
    /// Directory category, e.g. `Materiais Reciclados`; may be empty
    #[serde(default)]
    pub category: String,
    #[serde(flatten)]
    pub location: Coordinate,
}

impl Supplier {
    pub fn new(
        id: SupplierId,
        name: impl Into<String>,
        city: impl Into<String>,
        product: impl Into<String>,
        location: Coordinate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            product: product.into(),
            category: String::new(),
            location,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Parse a JSON array of suppliers, as the storefront pages hold them.
    ///
    /// Coordinates are not range-checked here.
    pub fn list_from_json(json: &str) -> Result<Vec<Supplier>> {
        Ok(serde_json::from_str(json)?)
    }
}

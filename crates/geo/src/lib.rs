//! Nearest-supplier matching for the GreenBuild storefront.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Nearest-supplier lookup over an in-memory candidate set
//! - Distance ranking and radius filtering with optional parallelism
//! - JSON helpers for supplier lists held by the storefront pages
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use greenbuild_geo::{find_nearest, Coordinate, Supplier, SupplierId};
//!
//! let suppliers = vec![
//!     Supplier::new(SupplierId(1), "Polinorte", "Araguaína-TO", "Blocos", Coordinate::new(-7.19238, -48.2044)),
//!     Supplier::new(SupplierId(3), "Ecolar", "Palmas-TO", "Tijolos", Coordinate::new(-10.31715, -48.3014)),
//! ];
//!
//! let user = Coordinate::new(-10.1844, -48.3336); // Palmas
//! let nearest = find_nearest(&user, &suppliers).unwrap();
//! assert_eq!(nearest.supplier.id, SupplierId(3));
//! assert!(nearest.distance_km < 20.0);
//! ```

mod error;
mod haversine;
pub mod json;
mod locator;
mod supplier;
pub mod batch;

#[cfg(feature = "wasm")]
mod wasm;

pub use batch::{rank_by_distance, rank_within_radius, SupplierDistance};
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{haversine_distance, EARTH_RADIUS_KM};
pub use locator::{find_nearest, find_nearest_among, try_find_nearest, NearestMatch};
pub use supplier::{Supplier, SupplierId};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    #[serde(alias = "lon", alias = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate without range checks.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Example
    /// ```
    /// use greenbuild_geo::Coordinate;
    ///
    /// assert!(Coordinate::try_new(-10.1844, -48.3336).is_ok());
    /// assert!(Coordinate::try_new(f64::NAN, 0.0).is_err());
    /// assert!(Coordinate::try_new(0.0, 200.0).is_err());
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        coord.validate()?;
        Ok(coord)
    }

    /// Returns true if the coordinate has valid values.
    ///
    /// NaN fails every range comparison, so non-finite input is invalid too.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Returns an error describing why the coordinate is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "({}, {}) is outside latitude [-90, 90] / longitude [-180, 180]",
                self.latitude, self.longitude
            )))
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. The constant and the
//! operation order match the distances the storefront already displays.

use crate::Coordinate;
use std::f64::consts::PI;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Degrees to radians as `value * PI / 180`.
///
/// Not `f64::to_radians`, which multiplies by a precomputed `PI / 180` and can
/// differ in the last bit.
#[inline]
fn to_rad(value: f64) -> f64 {
    value * PI / 180.0
}

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// Inputs are not validated; a NaN component yields a NaN distance.
///
/// # Arguments
/// * `from` - Starting coordinate
/// * `to` - Ending coordinate
///
/// # Example
/// ```
/// use greenbuild_geo::{haversine_distance, Coordinate};
///
/// let araguaina = Coordinate::new(-7.19238, -48.2044);
/// let palmas = Coordinate::new(-10.1844, -48.3336);
///
/// let distance = haversine_distance(&araguaina, &palmas);
/// assert!((distance - 333.0).abs() < 5.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    // Differences are taken in degrees, then converted
    let d_lat = to_rad(to.latitude - from.latitude);
    let d_lon = to_rad(to.longitude - from.longitude);
    let lat1 = to_rad(from.latitude);
    let lat2 = to_rad(to.latitude);

    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();
    let a = half_lat * half_lat + half_lon * half_lon * lat1.cos() * lat2.cos();

    // Rounding can push `a` just past 1 for near-antipodal points; clamp keeps NaN as NaN
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

//! Distance ranking with optional parallelism.
//!
//! The supplier directory sorts by distance and the materials page limits
//! suppliers to a radius; both need every candidate's distance rather than
//! only the minimum.

use crate::{haversine_distance, Coordinate, Supplier, SupplierId};
use serde::{Deserialize, Serialize};

/// Distance from the reference point to a single supplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplierDistance {
    /// The supplier ID
    pub id: SupplierId,
    /// Calculated distance in kilometers
    pub distance_km: f64,
}

/// Calculate the distance from `reference` to every candidate, closest first.
///
/// Equal distances keep their input order. Distances are computed in parallel
/// when the `parallel` feature is enabled; the sort itself is always stable and
/// sequential, so the result is deterministic. NaN distances sort last.
///
/// # Example
/// ```
/// use greenbuild_geo::{rank_by_distance, Coordinate, Supplier, SupplierId};
///
/// let suppliers = vec![
///     Supplier::new(SupplierId(1), "Polinorte", "Araguaína-TO", "Blocos", Coordinate::new(-7.19238, -48.2044)),
///     Supplier::new(SupplierId(5), "Cotae", "Palmas-TO", "Tijolos", Coordinate::new(-10.1844, -48.3336)),
/// ];
///
/// let ranked = rank_by_distance(&Coordinate::new(-10.2, -48.3), &suppliers);
/// assert_eq!(ranked[0].id, SupplierId(5));
/// assert_eq!(ranked.len(), 2);
/// ```
pub fn rank_by_distance(reference: &Coordinate, candidates: &[Supplier]) -> Vec<SupplierDistance> {
    let mut results = calculate_distances(reference, candidates);

    // NaN distances go to the end
    results.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or_else(|| a.distance_km.is_nan().cmp(&b.distance_km.is_nan()))
    });

    results
}

/// Rank candidates and keep those within `radius_km` of `reference`.
pub fn rank_within_radius(
    reference: &Coordinate,
    candidates: &[Supplier],
    radius_km: f64,
) -> Vec<SupplierDistance> {
    let mut results = rank_by_distance(reference, candidates);

    results.retain(|r| r.distance_km <= radius_km);

    results
}

fn calculate_distances(reference: &Coordinate, candidates: &[Supplier]) -> Vec<SupplierDistance> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        candidates
            .par_iter()
            .map(|supplier| calculate_single_distance(reference, supplier))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        candidates
            .iter()
            .map(|supplier| calculate_single_distance(reference, supplier))
            .collect()
    }
}

#[inline]
fn calculate_single_distance(reference: &Coordinate, supplier: &Supplier) -> SupplierDistance {
    SupplierDistance {
        id: supplier.id,
        distance_km: haversine_distance(reference, &supplier.location),
    }
}

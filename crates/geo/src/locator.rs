//! Nearest-supplier lookup.
//!
//! A linear scan with a running minimum. Candidate sets are tens of entries,
//! so no spatial index is involved.

use crate::{haversine_distance, Coordinate, Result, Supplier, SupplierId};
use serde::Serialize;

/// The closest supplier to a reference point and its distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearestMatch<'a> {
    pub supplier: &'a Supplier,
    /// Great-circle distance in kilometers, never negative
    pub distance_km: f64,
}

impl<'a> NearestMatch<'a> {
    /// Keeps the match only if it lies within `max_km` of the reference.
    ///
    /// This is a post-filter on an already computed result.
    #[inline]
    pub fn within_radius(self, max_km: f64) -> Option<Self> {
        (self.distance_km <= max_km).then_some(self)
    }

    /// Display label such as `~12 km`, rounded to whole kilometers
    /// half away from zero.
    pub fn distance_label(&self) -> String {
        format!("~{:.0} km", self.distance_km.round())
    }
}

/// Finds the candidate closest to `reference`.
///
/// Returns `None` when `candidates` is empty. When several candidates share the
/// minimal distance the first one in iteration order wins. A candidate whose
/// distance is NaN is never selected; if no candidate produces a comparable
/// distance the result is `None`.
///
/// `reference` is not validated, see [`try_find_nearest`] for the checked variant.
///
/// # Example
/// ```
/// use greenbuild_geo::{find_nearest, Coordinate, Supplier, SupplierId};
///
/// let here = Coordinate::new(-7.19238, -48.2044);
/// let suppliers = [
///     Supplier::new(SupplierId(1), "Polinorte", "Araguaína-TO", "Blocos", here),
///     Supplier::new(SupplierId(3), "Ecolar", "Palmas-TO", "Tijolos", Coordinate::new(-10.31715, -48.3014)),
/// ];
///
/// let nearest = find_nearest(&here, &suppliers).unwrap();
/// assert_eq!(nearest.supplier.id, SupplierId(1));
/// assert_eq!(nearest.distance_label(), "~0 km");
///
/// assert!(find_nearest(&here, &suppliers[..0]).is_none());
/// ```
pub fn find_nearest<'a, I>(reference: &Coordinate, candidates: I) -> Option<NearestMatch<'a>>
where
    I: IntoIterator<Item = &'a Supplier>,
{
    let mut best: Option<NearestMatch<'a>> = None;
    let mut scanned = 0usize;

    for supplier in candidates {
        scanned += 1;
        let distance_km = haversine_distance(reference, &supplier.location);
        if distance_km.is_nan() {
            continue;
        }

        if best.map_or(true, |current| distance_km < current.distance_km) {
            best = Some(NearestMatch { supplier, distance_km });
        }
    }

    tracing::debug!(
        scanned,
        nearest = ?best.map(|m| m.supplier.id),
        "Nearest supplier scan finished"
    );

    best
}

/// Finds the nearest supplier among those whose id is in `ids`.
///
/// Candidates keep the order of `suppliers`, not of `ids`. An empty `ids` slice
/// means every supplier is a candidate. Ids that match no supplier are ignored.
pub fn find_nearest_among<'a>(
    reference: &Coordinate,
    suppliers: &'a [Supplier],
    ids: &[SupplierId],
) -> Option<NearestMatch<'a>> {
    if ids.is_empty() {
        return find_nearest(reference, suppliers);
    }

    find_nearest(reference, suppliers.iter().filter(|s| ids.contains(&s.id)))
}

/// Like [`find_nearest`], but rejects an invalid `reference` up front.
pub fn try_find_nearest<'a, I>(reference: &Coordinate, candidates: I) -> Result<Option<NearestMatch<'a>>>
where
    I: IntoIterator<Item = &'a Supplier>,
{
    reference.validate()?;
    Ok(find_nearest(reference, candidates))
}

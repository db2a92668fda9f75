#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Distance and nearest-item primitives.
//!
//! Provides the haversine great-circle distance used by both the hazard
//! locator and the station resolver, a linear nearest-item scan with a
//! single tie-breaking policy, and centroid reduction for area geometries.
//! Dataset sizes are small, so there is no spatial index: every scan visits
//! every item.

use geo::{Centroid, MultiPolygon, Polygon};
use hazard_risk_geography_models::GeoPoint;

/// Mean Earth radius used by [`haversine_km`], in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points on a spherical Earth, in
/// kilometers.
///
/// Callers are expected to pass validated coordinates.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push `h` a hair past 1.0 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// An item selected by [`nearest_to`] together with its distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest<T> {
    /// Distance from the query origin in kilometers.
    pub distance_km: f64,
    /// The selected item.
    pub item: T,
}

/// Finds the item closest to `origin`.
///
/// `locate` maps each item to the point used for distance purposes; items
/// for which it returns `None` are skipped. Ties keep the first item
/// encountered, so the result is deterministic for a given input order.
///
/// Returns `None` if `items` is empty or every item was skipped.
pub fn nearest_to<T, I, F>(items: I, origin: GeoPoint, mut locate: F) -> Option<Nearest<T>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Option<GeoPoint>,
{
    let mut best: Option<Nearest<T>> = None;
    let mut skipped = 0usize;

    for item in items {
        let Some(point) = locate(&item) else {
            skipped += 1;
            continue;
        };

        let distance_km = haversine_km(origin, point);

        // Strictly closer only: an equal distance keeps the earlier item.
        if best
            .as_ref()
            .is_none_or(|current| distance_km < current.distance_km)
        {
            best = Some(Nearest { distance_km, item });
        }
    }

    if skipped > 0 {
        log::debug!("nearest_to: skipped {skipped} item(s) without a usable location");
    }

    best
}

/// Area-weighted centroid of a polygon.
///
/// Returns `None` for empty polygons or centroids outside the WGS84 range.
#[must_use]
pub fn polygon_centroid(polygon: &Polygon<f64>) -> Option<GeoPoint> {
    polygon.centroid().and_then(from_geo_point)
}

/// Area-weighted centroid of a multi-polygon.
///
/// Returns `None` for empty multi-polygons or centroids outside the WGS84
/// range.
#[must_use]
pub fn multi_polygon_centroid(multi_polygon: &MultiPolygon<f64>) -> Option<GeoPoint> {
    multi_polygon.centroid().and_then(from_geo_point)
}

/// Converts a `geo` point (`x` = longitude, `y` = latitude) into a
/// validated [`GeoPoint`].
#[must_use]
pub fn from_geo_point(point: geo::Point<f64>) -> Option<GeoPoint> {
    GeoPoint::new(point.y(), point.x()).ok()
}

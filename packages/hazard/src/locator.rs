//! Nearest-hazard search.
//!
//! Every feature is reduced to one representative point: a point geometry
//! is used as-is, a polygon or multi-polygon is reduced to its area-weighted
//! centroid. Features without a representative point are skipped.

use hazard_risk_geography_models::GeoPoint;
use hazard_risk_hazard_models::{HazardCollection, HazardFeature, HazardGeometry};
use hazard_risk_spatial::{from_geo_point, multi_polygon_centroid, nearest_to, polygon_centroid};

/// The hazard closest to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestHazard<'a> {
    /// Great-circle distance from the query point to the hazard's
    /// representative point, in kilometers.
    pub distance_km: f64,
    /// The selected feature.
    pub feature: &'a HazardFeature,
}

/// Finds the hazard nearest to `point` with a linear scan.
///
/// Ties keep the feature that appears first in the collection. Returns
/// `None` if the collection is empty or no feature has a usable geometry.
#[must_use]
pub fn find_nearest(hazards: &HazardCollection, point: GeoPoint) -> Option<NearestHazard<'_>> {
    let nearest = nearest_to(&hazards.features, point, |feature| {
        feature.geometry.as_ref().and_then(representative_point)
    })?;

    log::debug!(
        "Nearest hazard to ({}, {}) is {:?} at {:.1} km",
        point.lat,
        point.lng,
        nearest.item.properties.name,
        nearest.distance_km
    );

    Some(NearestHazard {
        distance_km: nearest.distance_km,
        feature: nearest.item,
    })
}

/// The point used to measure distance to a hazard geometry.
#[must_use]
pub fn representative_point(geometry: &HazardGeometry) -> Option<GeoPoint> {
    match geometry {
        HazardGeometry::Point(point) => from_geo_point(*point),
        HazardGeometry::Polygon(polygon) => polygon_centroid(polygon),
        HazardGeometry::MultiPolygon(multi_polygon) => multi_polygon_centroid(multi_polygon),
    }
}

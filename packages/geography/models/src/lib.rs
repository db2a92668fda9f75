#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic value types.
//!
//! These are plain WGS84 values created at query time and passed by copy
//! between the hazard locator, the station resolver, and the providers.
//! Nothing here performs I/O.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A WGS84 latitude/longitude pair.
///
/// Construct through [`GeoPoint::new`] to get the range check; the fields
/// stay public for pattern matching and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in degrees, `-90..=90`.
    pub lat: f64,
    /// Longitude in degrees, `-180..=180`.
    pub lng: f64,
}

/// Error returned when a coordinate is outside the WGS84 range or not finite.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid coordinate ({lat}, {lng}): latitude must be within [-90, 90] and longitude within [-180, 180]")]
pub struct InvalidCoordinateError {
    /// The rejected latitude.
    pub lat: f64,
    /// The rejected longitude.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point after validating both coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] if either value is non-finite or
    /// outside its range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinateError> {
        if lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng)
        {
            Ok(Self { lat, lng })
        } else {
            Err(InvalidCoordinateError { lat, lng })
        }
    }

    /// Creates a point from a GeoJSON-ordered `[lng, lat]` position.
    ///
    /// Returns `None` if the position has fewer than two values or the
    /// values are out of range.
    #[must_use]
    pub fn from_lng_lat(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] => Self::new(*lat, *lng).ok(),
            _ => None,
        }
    }
}

/// A rectangular latitude/longitude region used to restrict spatial queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Western edge.
    pub min_lng: f64,
    /// Southern edge.
    pub min_lat: f64,
    /// Eastern edge.
    pub max_lng: f64,
    /// Northern edge.
    pub max_lat: f64,
}

impl BoundingBox {
    /// Builds a box extending `half_width_deg` degrees from `center` in each
    /// direction.
    ///
    /// The half width is applied to latitude and longitude alike, so the box
    /// covers less east-west ground the further the center is from the
    /// equator. Edges are not clamped.
    #[must_use]
    pub fn around(center: GeoPoint, half_width_deg: f64) -> Self {
        Self {
            min_lng: center.lng - half_width_deg,
            min_lat: center.lat - half_width_deg,
            max_lng: center.lng + half_width_deg,
            max_lat: center.lat + half_width_deg,
        }
    }

    /// Renders the box as the OGC API `bbox` query value
    /// (`minLon,minLat,maxLon,maxLat`).
    #[must_use]
    pub fn to_query_value(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lng, self.min_lat, self.max_lng, self.max_lat
        )
    }
}

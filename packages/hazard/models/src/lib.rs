#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wildfire hazard feature types.
//!
//! A hazard dataset is a GeoJSON `FeatureCollection` whose features carry a
//! free-form property bag. These types hold the typed form of each feature,
//! with every property resolved (and defaulted) once at ingestion so that
//! scoring code never has to inspect the raw JSON.

use geo::{MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};

/// Name used when a feature carries neither a description nor an incident
/// name.
pub const UNNAMED_FIRE: &str = "Unnamed Fire";

/// Status used when a feature carries no status.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// The status value (compared case-insensitively) that marks an
/// extinguished fire.
pub const OUT_STATUS: &str = "out";

/// Geometry shapes the hazard locator understands.
#[derive(Debug, Clone, PartialEq)]
pub enum HazardGeometry {
    /// A fire reported as a single location.
    Point(Point<f64>),
    /// A fire perimeter.
    Polygon(Polygon<f64>),
    /// A fire perimeter made of several disjoint parts.
    MultiPolygon(MultiPolygon<f64>),
}

/// Typed properties of a hazard feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardProperties {
    /// Display name (geographic description, incident name, or
    /// [`UNNAMED_FIRE`]).
    pub name: String,
    /// Free-text status as published (e.g. `"Out of Control"`, `"Out"`).
    pub status: String,
    /// Current fire size in hectares. Never negative.
    pub size: f64,
    /// Agency fire number.
    pub fire_number: Option<String>,
    /// Fire season year.
    pub year: Option<i32>,
    /// Published cause.
    pub cause: Option<String>,
    /// Ignition date as published.
    pub ignition_date: Option<String>,
    /// Date the fire was declared out, as published.
    pub out_date: Option<String>,
    /// Link to the agency's detail page.
    pub detail_url: Option<String>,
}

impl HazardProperties {
    /// Whether the fire has been declared out.
    #[must_use]
    pub fn is_out(&self) -> bool {
        self.status.eq_ignore_ascii_case(OUT_STATUS)
    }
}

impl Default for HazardProperties {
    fn default() -> Self {
        Self {
            name: UNNAMED_FIRE.to_string(),
            status: UNKNOWN_STATUS.to_string(),
            size: 0.0,
            fire_number: None,
            year: None,
            cause: None,
            ignition_date: None,
            out_date: None,
            detail_url: None,
        }
    }
}

/// A single hazard record.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardFeature {
    /// Recognised geometry, or `None` when the source geometry was missing,
    /// malformed, or of a shape the locator does not handle.
    pub geometry: Option<HazardGeometry>,
    /// Resolved properties.
    pub properties: HazardProperties,
}

/// An in-memory hazard dataset, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HazardCollection {
    /// Features in the order they appeared in the source document.
    pub features: Vec<HazardFeature>,
}

impl HazardCollection {
    /// Wraps a list of features.
    #[must_use]
    pub const fn new(features: Vec<HazardFeature>) -> Self {
        Self { features }
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_status_is_case_insensitive() {
        for status in ["out", "Out", "OUT", "oUt"] {
            let props = HazardProperties {
                status: status.to_string(),
                ..HazardProperties::default()
            };
            assert!(props.is_out(), "{status:?} should be out");
        }
    }

    #[test]
    fn out_of_control_is_not_out() {
        let props = HazardProperties {
            status: "Out of Control".to_string(),
            ..HazardProperties::default()
        };
        assert!(!props.is_out());
        assert!(!HazardProperties::default().is_out());
    }
}

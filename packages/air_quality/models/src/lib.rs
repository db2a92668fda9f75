#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Air quality monitoring station and observation types.
//!
//! A [`StationRecord`] is what a provider lists; a [`Station`] is the record
//! the resolver picked, with its distance from the query point. Missing
//! readings are `None`, never errors.

use chrono::{DateTime, Utc};
use hazard_risk_geography_models::GeoPoint;
use serde::{Deserialize, Serialize};

/// Name used when a station record carries no English or French name.
pub const DEFAULT_STATION_NAME: &str = "AQHI station";

/// A station as listed by a provider, before selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    /// Provider identifier used to query observations.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Station location. Records without one cannot be ranked.
    pub location: Option<GeoPoint>,
}

/// The monitoring station selected for a query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Provider identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Great-circle distance from the query point, in kilometers.
    pub distance_km: f64,
}

/// The latest reading reported by a station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// AQHI value, if the station reported a numeric one.
    pub aqhi: Option<f64>,
    /// When the reading was taken.
    pub observed_at: Option<DateTime<Utc>>,
}

/// A selected station together with its latest observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedObservation {
    /// The nearest station with an identifier.
    pub station: Station,
    /// Its latest observation.
    pub observation: Observation,
}

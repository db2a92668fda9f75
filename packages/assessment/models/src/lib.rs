#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Risk level and assessment result types.
//!
//! [`RiskLevel`] is an ordinal scale shared by the wildfire and air quality
//! scorers. All comparisons and arithmetic go through [`RiskLevel::ordinal`];
//! the upper-case labels are for display only.

use chrono::{DateTime, Utc};
use hazard_risk_geography_models::GeoPoint;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Risk level, from 0 (unknown) to 4 (extreme).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Level 0: no usable data
    Unknown = 0,
    /// Level 1
    Low = 1,
    /// Level 2
    Moderate = 2,
    /// Level 3
    High = 3,
    /// Level 4: the top of the scale
    Extreme = 4,
}

impl RiskLevel {
    /// Returns the numeric value of this level.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Creates a level from a numeric value, saturating at
    /// [`RiskLevel::Extreme`].
    #[must_use]
    pub const fn from_ordinal(value: u8) -> Self {
        match value {
            0 => Self::Unknown,
            1 => Self::Low,
            2 => Self::Moderate,
            3 => Self::High,
            _ => Self::Extreme,
        }
    }
}

/// A risk level with a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRisk {
    /// Assigned risk level.
    pub level: RiskLevel,
    /// Why this level was assigned.
    pub reason: String,
}

impl ScoredRisk {
    /// Builds a risk from a level and its explanation.
    #[must_use]
    pub fn new(level: RiskLevel, reason: impl Into<String>) -> Self {
        Self {
            level,
            reason: reason.into(),
        }
    }
}

/// Air quality risk. `score` always equals `level.ordinal()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityRisk {
    /// Level from the AQHI band.
    pub level: RiskLevel,
    /// Ordinal of `level`.
    pub score: u8,
    /// AQHI value and band, or why it is unknown.
    pub reason: String,
}

impl AirQualityRisk {
    /// Builds a risk whose score is derived from `level`.
    #[must_use]
    pub fn new(level: RiskLevel, reason: impl Into<String>) -> Self {
        Self {
            level,
            score: level.ordinal(),
            reason: reason.into(),
        }
    }
}

/// The hazard nearest to the assessed location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestHazardSummary {
    /// Display name of the fire.
    pub name: String,
    /// Reported fire status (e.g., `"Out of Control"`).
    pub status: String,
    /// Great-circle distance, in kilometers.
    pub distance_km: f64,
    /// Fire size in hectares.
    pub size: f64,
    /// Agency incident number (e.g., `"G40123"`).
    pub fire_number: Option<String>,
    /// Fire season.
    pub year: Option<i32>,
    /// Reported cause (e.g., `"Lightning"`).
    pub cause: Option<String>,
    /// Ignition date as published.
    pub ignition_date: Option<String>,
    /// Date the fire was declared out, as published.
    pub out_date: Option<String>,
    /// Link to the agency's incident page.
    pub detail_url: Option<String>,
}

/// The air quality reading used for the assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityReading {
    /// AQHI value, if the station reported one.
    pub value: Option<f64>,
    /// Level from the AQHI band, `Unknown` without a value.
    pub level: RiskLevel,
    /// Name of the reporting station.
    pub station_name: String,
    /// Great-circle distance to the station, in kilometers.
    pub station_distance_km: f64,
    /// When the observation was taken, if reported.
    pub observed_at: Option<DateTime<Utc>>,
}

/// A combined wildfire and air quality risk assessment for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// The assessed location.
    pub location: GeoPoint,
    /// Display name of the location, when it came from a geocoder.
    pub place_name: Option<String>,
    /// `None` when no hazard in the dataset could be located.
    pub nearest_hazard: Option<NearestHazardSummary>,
    /// Risk from the nearest hazard.
    pub wildfire_risk: ScoredRisk,
    /// `None` when no station or observation was available.
    pub air_quality: Option<AirQualityReading>,
    /// Risk from the air quality reading.
    pub air_quality_risk: AirQualityRisk,
    /// The fused result.
    pub overall: ScoredRisk,
}

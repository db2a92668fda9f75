//! Station provider abstraction and implementations.

pub mod geomet;

use hazard_risk_air_quality_models::{Observation, StationRecord};
use hazard_risk_geography_models::BoundingBox;

use crate::AirQualityError;

/// A source of monitoring stations and their observations.
#[async_trait::async_trait]
pub trait StationProvider: Send + Sync {
    /// Lists stations, restricted to `bbox` when given, returning at most
    /// `limit` records.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError`] if the request fails or the provider
    /// responds with a non-success status. An empty list is not an error.
    async fn list_stations(
        &self,
        bbox: Option<BoundingBox>,
        limit: u32,
    ) -> Result<Vec<StationRecord>, AirQualityError>;

    /// Fetches the single latest observation for a station.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError`] if the request fails or the provider
    /// responds with a non-success status. A station with no observation
    /// yields `Ok(None)`.
    async fn latest_observation(
        &self,
        station_id: &str,
    ) -> Result<Option<Observation>, AirQualityError>;
}

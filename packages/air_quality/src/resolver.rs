//! Nearest-station resolution with a catalog-wide fallback.
//!
//! The search first asks the provider for stations inside a box around the
//! query point. Sparse regions can have no station in that box, so an empty
//! answer triggers exactly one unrestricted query capped at
//! [`SearchConfig::fallback_limit`] records. The nearest station is then
//! asked for its latest observation.

use hazard_risk_air_quality_models::{ResolvedObservation, Station, StationRecord};
use hazard_risk_geography_models::{BoundingBox, GeoPoint};
use hazard_risk_spatial::nearest_to;
use serde::Deserialize;

use crate::{AirQualityError, StationProvider};

/// Station search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Half width of the local search box, in degrees of latitude and
    /// longitude alike.
    pub bbox_half_width_deg: f64,
    /// Maximum records requested from the local box query.
    pub local_limit: u32,
    /// Maximum records requested from the unrestricted fallback query.
    pub fallback_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            bbox_half_width_deg: 1.0,
            local_limit: 200,
            fallback_limit: 500,
        }
    }
}

/// Finds the station nearest to `point` and fetches its latest observation.
///
/// Returns `Ok(None)` when no station is listed by either query, when no
/// listed station has a location, when the nearest station has no
/// identifier, or when it has no observation. Ties between equally distant
/// stations keep the first one listed.
///
/// # Errors
///
/// Returns the provider's [`AirQualityError`] unchanged if any of the
/// queries fails.
pub async fn resolve_nearest_observation(
    point: GeoPoint,
    provider: &dyn StationProvider,
    config: &SearchConfig,
) -> Result<Option<ResolvedObservation>, AirQualityError> {
    let bbox = BoundingBox::around(point, config.bbox_half_width_deg);
    let mut records = provider
        .list_stations(Some(bbox), config.local_limit)
        .await?;

    if records.is_empty() {
        log::info!(
            "No AQHI stations within {}° of ({}, {}); falling back to the full catalog",
            config.bbox_half_width_deg,
            point.lat,
            point.lng
        );
        records = provider.list_stations(None, config.fallback_limit).await?;
    }

    if records.is_empty() {
        log::info!("AQHI provider listed no stations");
        return Ok(None);
    }

    let Some(station) = nearest_station(records, point) else {
        log::info!("No listed AQHI station has a location");
        return Ok(None);
    };

    let Some(observation) = provider.latest_observation(&station.id).await? else {
        log::info!("AQHI station {} has no latest observation", station.id);
        return Ok(None);
    };

    Ok(Some(ResolvedObservation {
        station,
        observation,
    }))
}

/// Picks the nearest locatable record. Returns `None` if no record has a
/// location or if the nearest one has no identifier.
fn nearest_station(records: Vec<StationRecord>, point: GeoPoint) -> Option<Station> {
    let nearest = nearest_to(records, point, |record| record.location)?;

    let Some(id) = nearest.item.id else {
        log::info!(
            "Nearest AQHI station {:?} has no identifier",
            nearest.item.name
        );
        return None;
    };

    log::debug!(
        "Nearest AQHI station is {} ({}) at {:.1} km",
        nearest.item.name,
        id,
        nearest.distance_km
    );

    Some(Station {
        id,
        name: nearest.item.name,
        distance_km: nearest.distance_km,
    })
}

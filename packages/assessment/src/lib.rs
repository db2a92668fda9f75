#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wildfire and air quality risk assessment.
//!
//! For one location, finds the nearest wildfire in a hazard dataset and the
//! nearest AQHI station's latest reading, scores each independently, and
//! fuses the two into an overall [`RiskLevel`](hazard_risk_assessment_models::RiskLevel).
//!
//! Missing data never fails an assessment: no hazard scores LOW and no
//! reading scores UNKNOWN. Provider failures are returned unchanged.

pub mod air_quality;
pub mod fusion;
pub mod wildfire;

use hazard_risk_air_quality::resolver::{SearchConfig, resolve_nearest_observation};
use hazard_risk_air_quality::{AirQualityError, StationProvider};
use hazard_risk_assessment_models::{AirQualityReading, Assessment, NearestHazardSummary};
use hazard_risk_geocoder::{GeocodeError, Geocoder};
use hazard_risk_geography_models::GeoPoint;
use hazard_risk_hazard::locator::find_nearest;
use hazard_risk_hazard_models::HazardCollection;
use thiserror::Error;

/// Errors that can occur during an assessment.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// The location could not be geocoded.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// The air quality provider failed.
    #[error(transparent)]
    AirQuality(#[from] AirQualityError),
}

/// Assesses the risk at `point`.
///
/// The hazard search and the station lookup run concurrently.
///
/// # Errors
///
/// Returns [`AssessmentError::AirQuality`] if any station provider query
/// fails.
pub async fn assess(
    point: GeoPoint,
    place_name: Option<String>,
    hazards: &HazardCollection,
    provider: &dyn StationProvider,
    config: &SearchConfig,
) -> Result<Assessment, AssessmentError> {
    let locate = async { find_nearest(hazards, point) };
    let resolve = resolve_nearest_observation(point, provider, config);
    let (nearest, resolved) = futures::join!(locate, resolve);
    let resolved = resolved?;

    let wildfire_risk = nearest.map_or_else(wildfire::no_nearby_fires, |n| {
        wildfire::score_wildfire(
            n.distance_km,
            &n.feature.properties.status,
            n.feature.properties.size,
        )
    });

    let nearest_hazard = nearest.map(|n| {
        let props = &n.feature.properties;
        NearestHazardSummary {
            name: props.name.clone(),
            status: props.status.clone(),
            distance_km: n.distance_km,
            size: props.size,
            fire_number: props.fire_number.clone(),
            year: props.year,
            cause: props.cause.clone(),
            ignition_date: props.ignition_date.clone(),
            out_date: props.out_date.clone(),
            detail_url: props.detail_url.clone(),
        }
    });

    let air_quality_risk =
        air_quality::score_aqhi(resolved.as_ref().and_then(|r| r.observation.aqhi));

    let air_quality = resolved.map(|r| AirQualityReading {
        value: r.observation.aqhi,
        level: air_quality_risk.level,
        station_name: r.station.name,
        station_distance_km: r.station.distance_km,
        observed_at: r.observation.observed_at,
    });

    let overall = fusion::combine(&wildfire_risk, &air_quality_risk);

    log::info!(
        "Assessed ({}, {}): wildfire {}, air {}, overall {}",
        point.lat,
        point.lng,
        wildfire_risk.level,
        air_quality_risk.level,
        overall.level
    );

    Ok(Assessment {
        location: point,
        place_name,
        nearest_hazard,
        wildfire_risk,
        air_quality,
        air_quality_risk,
        overall,
    })
}

/// Geocodes `query` and assesses the risk at the result.
///
/// # Errors
///
/// Returns [`AssessmentError::Geocode`] if the query cannot be resolved
/// (including [`GeocodeError::NotFound`]), or
/// [`AssessmentError::AirQuality`] if a station provider query fails.
pub async fn check(
    query: &str,
    geocoder: &dyn Geocoder,
    hazards: &HazardCollection,
    provider: &dyn StationProvider,
    config: &SearchConfig,
) -> Result<Assessment, AssessmentError> {
    let location = geocoder.geocode(query).await?;
    assess(location.point, location.place_name, hazards, provider, config).await
}

#[cfg(test)]
mod tests {
    use geo::Point;
    use hazard_risk_air_quality_models::{Observation, StationRecord};
    use hazard_risk_assessment_models::RiskLevel;
    use hazard_risk_geocoder::GeocodedLocation;
    use hazard_risk_geography_models::BoundingBox;
    use hazard_risk_hazard_models::{HazardFeature, HazardGeometry, HazardProperties};

    use super::*;

    /// Station provider with one station and a fixed reading.
    struct FixedProvider {
        stations: Vec<StationRecord>,
        aqhi: Option<f64>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl StationProvider for FixedProvider {
        async fn list_stations(
            &self,
            _bbox: Option<BoundingBox>,
            _limit: u32,
        ) -> Result<Vec<StationRecord>, AirQualityError> {
            if self.fail {
                return Err(AirQualityError::Status {
                    context: "AQHI station fetch".to_string(),
                    status: 500,
                });
            }
            Ok(self.stations.clone())
        }

        async fn latest_observation(
            &self,
            _station_id: &str,
        ) -> Result<Option<Observation>, AirQualityError> {
            Ok(Some(Observation {
                aqhi: self.aqhi,
                observed_at: None,
            }))
        }
    }

    struct FixedGeocoder(Option<GeocodedLocation>);

    #[async_trait::async_trait]
    impl Geocoder for FixedGeocoder {
        async fn geocode(&self, query: &str) -> Result<GeocodedLocation, GeocodeError> {
            self.0.clone().ok_or_else(|| GeocodeError::NotFound {
                query: query.to_string(),
            })
        }
    }

    fn home() -> GeoPoint {
        GeoPoint::new(49.0, -123.0).unwrap()
    }

    fn fire_at(lat: f64, lng: f64, status: &str, size: f64) -> HazardFeature {
        HazardFeature {
            geometry: Some(HazardGeometry::Point(Point::new(lng, lat))),
            properties: HazardProperties {
                name: "Test Fire".to_string(),
                status: status.to_string(),
                size,
                ..HazardProperties::default()
            },
        }
    }

    fn station_near_home(aqhi: Option<f64>) -> FixedProvider {
        FixedProvider {
            stations: vec![StationRecord {
                id: Some("BC001".to_string()),
                name: "Downtown".to_string(),
                location: Some(GeoPoint::new(49.05, -123.0).unwrap()),
            }],
            aqhi,
            fail: false,
        }
    }

    #[tokio::test]
    async fn nearby_fire_and_smoke_escalate_to_extreme() {
        // ~11 km north, 2000 ha, burning.
        let hazards = HazardCollection::new(vec![
            fire_at(50.5, -123.0, "Out of Control", 90_000.0),
            fire_at(49.1, -123.0, "Out of Control", 2000.0),
        ]);

        let assessment = assess(
            home(),
            None,
            &hazards,
            &station_near_home(Some(7.0)),
            &SearchConfig::default(),
        )
        .await
        .unwrap();

        let nearest = assessment.nearest_hazard.as_ref().unwrap();
        assert!((nearest.distance_km - 11.119).abs() < 0.01);
        assert!((nearest.size - 2000.0).abs() < f64::EPSILON);
        assert_eq!(assessment.wildfire_risk.level, RiskLevel::High);
        assert_eq!(assessment.wildfire_risk.reason, "Active fire nearby");
        assert_eq!(assessment.air_quality_risk.reason, "AQHI 7 (High)");
        assert_eq!(assessment.overall.level, RiskLevel::Extreme);
        assert_eq!(assessment.overall.reason, "Wildfire: HIGH, Air: HIGH");

        let reading = assessment.air_quality.as_ref().unwrap();
        assert_eq!(reading.station_name, "Downtown");
        assert_eq!(reading.value, Some(7.0));
        assert_eq!(reading.level, RiskLevel::High);
    }

    #[tokio::test]
    async fn no_data_is_low_and_unknown() {
        let provider = FixedProvider {
            stations: vec![],
            aqhi: None,
            fail: false,
        };

        let assessment = assess(
            home(),
            None,
            &HazardCollection::default(),
            &provider,
            &SearchConfig::default(),
        )
        .await
        .unwrap();

        assert!(assessment.nearest_hazard.is_none());
        assert!(assessment.air_quality.is_none());
        assert_eq!(assessment.wildfire_risk.reason, "No nearby fires found");
        assert_eq!(assessment.air_quality_risk.level, RiskLevel::Unknown);
        assert_eq!(assessment.overall.level, RiskLevel::Low);
        assert_eq!(assessment.overall.reason, "Wildfire: LOW, Air: UNKNOWN");
    }

    #[tokio::test]
    async fn station_without_reading_is_unknown_but_reported() {
        let hazards = HazardCollection::new(vec![fire_at(49.0, -123.0, "OUT", 9000.0)]);

        let assessment = assess(
            home(),
            None,
            &hazards,
            &station_near_home(None),
            &SearchConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(assessment.wildfire_risk.reason, "Fire is out");
        let reading = assessment.air_quality.unwrap();
        assert_eq!(reading.value, None);
        assert_eq!(reading.level, RiskLevel::Unknown);
        assert_eq!(assessment.overall.level, RiskLevel::Low);
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = FixedProvider {
            stations: vec![],
            aqhi: None,
            fail: true,
        };

        let result = assess(
            home(),
            None,
            &HazardCollection::default(),
            &provider,
            &SearchConfig::default(),
        )
        .await;

        assert!(matches!(
            result,
            Err(AssessmentError::AirQuality(AirQualityError::Status {
                status: 500,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn check_carries_place_name() {
        let geocoder = FixedGeocoder(Some(GeocodedLocation {
            point: home(),
            place_name: Some("V6B 1A1, Vancouver, British Columbia, Canada".to_string()),
        }));

        let assessment = check(
            "v6b 1a1",
            &geocoder,
            &HazardCollection::default(),
            &station_near_home(Some(2.0)),
            &SearchConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(assessment.location, home());
        assert_eq!(
            assessment.place_name.as_deref(),
            Some("V6B 1A1, Vancouver, British Columbia, Canada")
        );
        assert_eq!(assessment.air_quality_risk.reason, "AQHI 2 (Low)");
    }

    #[tokio::test]
    async fn check_propagates_not_found() {
        let result = check(
            "ZZZ",
            &FixedGeocoder(None),
            &HazardCollection::default(),
            &station_near_home(Some(2.0)),
            &SearchConfig::default(),
        )
        .await;

        assert!(matches!(
            result,
            Err(AssessmentError::Geocode(GeocodeError::NotFound { query })) if query == "ZZZ"
        ));
    }

    #[tokio::test]
    async fn assessment_renders_as_json() {
        let mut fire = fire_at(49.1, -123.0, "Out of Control", 2000.0);
        fire.properties.fire_number = Some("V10234".to_string());
        fire.properties.year = Some(2024);
        fire.properties.cause = Some("Person".to_string());
        fire.properties.ignition_date = Some("2024-08-02".to_string());
        let hazards = HazardCollection::new(vec![fire]);
        let assessment = assess(
            home(),
            None,
            &hazards,
            &station_near_home(Some(7.0)),
            &SearchConfig::default(),
        )
        .await
        .unwrap();

        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["overall"]["level"], "EXTREME");
        assert_eq!(json["airQuality"]["stationName"], "Downtown");
        assert_eq!(json["nearestHazard"]["name"], "Test Fire");
        assert_eq!(json["nearestHazard"]["fireNumber"], "V10234");
        assert_eq!(json["nearestHazard"]["year"], 2024);
        assert_eq!(json["nearestHazard"]["cause"], "Person");
        assert_eq!(json["nearestHazard"]["ignitionDate"], "2024-08-02");
        assert!(json["nearestHazard"]["outDate"].is_null());
    }
}

//! MSC GeoMet AQHI client.
//!
//! Environment and Climate Change Canada publishes AQHI stations and
//! real-time observations as OGC API - Features collections. No API key is
//! required.
//!
//! - Stations: `GET /collections/aqhi-stations/items?f=json&bbox=…&limit=N`
//! - Latest observation:
//!   `GET /collections/aqhi-observations-realtime/items?f=json&latest=true&location_id=ID&limit=1`
//!
//! See <https://api.weather.gc.ca/>

use chrono::{DateTime, Utc};
use hazard_risk_air_quality_models::{DEFAULT_STATION_NAME, Observation, StationRecord};
use hazard_risk_geography_models::{BoundingBox, GeoPoint};
use serde_json::Value;

use super::StationProvider;
use crate::AirQualityError;
use crate::service_registry::{AirQualityService, ProviderConfig};

/// Environment variable that overrides the configured GeoMet base URL.
pub const BASE_URL_ENV: &str = "HAZARD_RISK_GEOMET_URL";

/// MSC GeoMet OGC API provider.
pub struct GeometProvider {
    client: reqwest::Client,
    base_url: String,
    station_collection: String,
    observation_collection: String,
}

impl GeometProvider {
    /// Creates a provider for the given base URL and collection names.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        station_collection: impl Into<String>,
        observation_collection: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            station_collection: station_collection.into(),
            observation_collection: observation_collection.into(),
        }
    }

    /// Creates a provider from a registry entry, honouring [`BASE_URL_ENV`].
    #[must_use]
    pub fn from_service(client: reqwest::Client, service: &AirQualityService) -> Self {
        let ProviderConfig::Geomet {
            base_url,
            station_collection,
            observation_collection,
        } = &service.provider;

        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| base_url.clone());

        Self::new(
            client,
            base_url,
            station_collection.clone(),
            observation_collection.clone(),
        )
    }

    fn items_url(&self, collection: &str) -> String {
        format!("{}/collections/{collection}/items", self.base_url)
    }
}

#[async_trait::async_trait]
impl StationProvider for GeometProvider {
    async fn list_stations(
        &self,
        bbox: Option<BoundingBox>,
        limit: u32,
    ) -> Result<Vec<StationRecord>, AirQualityError> {
        let mut query = vec![("f", "json".to_string()), ("limit", limit.to_string())];
        if let Some(bbox) = bbox {
            query.push(("bbox", bbox.to_query_value()));
        }

        let resp = self
            .client
            .get(self.items_url(&self.station_collection))
            .query(&query)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AirQualityError::Status {
                context: "AQHI station fetch".to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body: Value = resp.json().await?;
        Ok(parse_stations(&body))
    }

    async fn latest_observation(
        &self,
        station_id: &str,
    ) -> Result<Option<Observation>, AirQualityError> {
        let resp = self
            .client
            .get(self.items_url(&self.observation_collection))
            .query(&[
                ("f", "json"),
                ("latest", "true"),
                ("location_id", station_id),
                ("limit", "1"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AirQualityError::Status {
                context: "AQHI observation fetch".to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body: Value = resp.json().await?;
        Ok(parse_latest_observation(&body))
    }
}

/// Parses a station `FeatureCollection`. A missing `features` array is an
/// empty result.
fn parse_stations(body: &Value) -> Vec<StationRecord> {
    body["features"]
        .as_array()
        .map(|features| features.iter().map(parse_station).collect())
        .unwrap_or_default()
}

fn parse_station(feature: &Value) -> StationRecord {
    let props = &feature["properties"];

    let id = id_value(&props["location_id"]).or_else(|| id_value(&feature["id"]));

    let name = non_empty_str(&props["location_name_en"])
        .or_else(|| non_empty_str(&props["location_name_fr"]))
        .unwrap_or(DEFAULT_STATION_NAME)
        .to_string();

    // GeoJSON coordinates are [lon, lat].
    let location = feature["geometry"]["coordinates"]
        .as_array()
        .and_then(|coords| {
            let position = coords
                .iter()
                .map(Value::as_f64)
                .collect::<Option<Vec<f64>>>()?;
            GeoPoint::from_lng_lat(&position)
        });

    StationRecord { id, name, location }
}

/// Parses the first feature of an observation `FeatureCollection`.
fn parse_latest_observation(body: &Value) -> Option<Observation> {
    let first = body["features"].as_array()?.first()?;
    let props = &first["properties"];

    Some(Observation {
        aqhi: aqhi_value(&props["aqhi"]),
        observed_at: props["observation_datetime"]
            .as_str()
            .and_then(parse_timestamp),
    })
}

/// AQHI is published as a number, occasionally as a numeric string.
fn aqhi_value(value: &Value) -> Option<f64> {
    let aqhi: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    aqhi.filter(|v| v.is_finite())
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| log::debug!("Ignoring unparseable observation time {s:?}: {e}"))
        .ok()
}

fn id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

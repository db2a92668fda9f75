//! Mapbox Geocoding API client.
//!
//! Resolves Canadian postal codes with the `mapbox.places` forward
//! geocoding endpoint, restricted to `types=postcode`.
//!
//! See <https://docs.mapbox.com/api/search/geocoding-v5/>

use hazard_risk_geography_models::GeoPoint;

use crate::service_registry::{GeocodingService, ProviderConfig};
use crate::{GeocodeError, GeocodedLocation, Geocoder};

/// Environment variable that overrides the configured Mapbox base URL.
pub const BASE_URL_ENV: &str = "HAZARD_RISK_MAPBOX_URL";

/// Mapbox forward geocoder.
pub struct MapboxGeocoder {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
    country: String,
    types: String,
    proximity: Option<String>,
}

impl MapboxGeocoder {
    /// Creates a geocoder from a registry entry, reading the access token
    /// from the environment variable the entry names.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Config`] if the token variable is unset or
    /// empty.
    pub fn from_service(
        client: reqwest::Client,
        service: &GeocodingService,
    ) -> Result<Self, GeocodeError> {
        let ProviderConfig::Mapbox {
            base_url,
            country,
            types,
            proximity,
            token_env,
        } = &service.provider;

        let access_token = std::env::var(token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| GeocodeError::Config {
                message: format!("{token_env} environment variable not set"),
            })?;

        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| base_url.clone());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
            country: country.clone(),
            types: types.clone(),
            proximity: proximity.clone(),
        })
    }

    /// Builds the request URL for a normalized query.
    fn search_url(&self, query: &str) -> Result<reqwest::Url, GeocodeError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| GeocodeError::Config {
            message: format!("Invalid Mapbox base URL {}: {e}", self.base_url),
        })?;

        url.path_segments_mut()
            .map_err(|()| GeocodeError::Config {
                message: format!("Mapbox base URL {} cannot have a path", self.base_url),
            })?
            .push(&format!("{query}.json"));

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("country", &self.country);
            pairs.append_pair("types", &self.types);
            if let Some(proximity) = &self.proximity {
                pairs.append_pair("proximity", proximity);
            }
            pairs.append_pair("access_token", &self.access_token);
        }

        Ok(url)
    }
}

#[async_trait::async_trait]
impl Geocoder for MapboxGeocoder {
    async fn geocode(&self, query: &str) -> Result<GeocodedLocation, GeocodeError> {
        let normalized = normalize_postal_code(query);
        let url = self.search_url(&normalized)?;

        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(GeocodeError::Status {
                status: resp.status().as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        let location =
            parse_response(&body)?.ok_or_else(|| GeocodeError::NotFound { query: normalized })?;

        log::debug!(
            "Geocoded {query:?} to ({}, {})",
            location.point.lat,
            location.point.lng
        );

        Ok(location)
    }
}

/// Trims and upper-cases a postal code (`"v2n 4z9 "` → `"V2N 4Z9"`).
#[must_use]
pub fn normalize_postal_code(query: &str) -> String {
    query.trim().to_uppercase()
}

/// Parses a Mapbox `FeatureCollection` response, taking the first feature.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeocodedLocation>, GeocodeError> {
    let features = body["features"]
        .as_array()
        .ok_or_else(|| GeocodeError::Parse {
            message: "Mapbox response has no features array".to_string(),
        })?;

    let Some(first) = features.first() else {
        return Ok(None);
    };

    // `center` is [lng, lat].
    let center = first["center"]
        .as_array()
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing center in Mapbox response".to_string(),
        })?;

    let coord = |i: usize, name: &str| {
        center
            .get(i)
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| GeocodeError::Parse {
                message: format!("Missing {name} in Mapbox response"),
            })
    };
    let lng = coord(0, "longitude")?;
    let lat = coord(1, "latitude")?;

    Ok(Some(GeocodedLocation {
        point: GeoPoint::new(lat, lng)?,
        place_name: first["place_name"].as_str().map(String::from),
    }))
}

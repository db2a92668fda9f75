//! Compile-time registry of geocoding service configurations.
//!
//! Each geocoding provider is defined in a TOML file under `services/`.
//! The registry embeds these at compile time and exposes them via
//! [`all_services`], [`enabled_services`], and [`default_service`].

use serde::Deserialize;

/// A geocoding service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingService {
    /// Unique identifier (e.g., `"mapbox"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this service may be selected.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Mapbox forward geocoding.
    Mapbox {
        /// API base URL up to the endpoint name (e.g.,
        /// `"https://api.mapbox.com/geocoding/v5/mapbox.places"`).
        base_url: String,
        /// ISO country filter.
        country: String,
        /// Feature types to match (e.g., `"postcode"`).
        types: String,
        /// `lng,lat` bias for ambiguous matches.
        proximity: Option<String>,
        /// Environment variable holding the access token.
        token_env: String,
    },
}

const fn default_true() -> bool {
    true
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[("mapbox", include_str!("../services/mapbox.toml"))];

/// Returns all geocoding service configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<GeocodingService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse geocoding service '{name}': {e}"))
        })
        .collect()
}

/// Returns only enabled services, in registry order.
#[must_use]
pub fn enabled_services() -> Vec<GeocodingService> {
    all_services().into_iter().filter(|s| s.enabled).collect()
}

/// Returns the first enabled service, if any.
#[must_use]
pub fn default_service() -> Option<GeocodingService> {
    enabled_services().into_iter().next()
}

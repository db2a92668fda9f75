//! Compile-time registry of air quality provider configurations.
//!
//! Each provider is defined in a TOML file under `services/`. The registry
//! embeds these at compile time and exposes them via [`all_services`] and
//! [`default_service`].

use serde::Deserialize;

use crate::resolver::SearchConfig;

/// An air quality provider configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityService {
    /// Unique identifier (e.g., `"geomet"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this provider may be selected.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
    /// Station search parameters used with this provider.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// MSC GeoMet OGC API.
    Geomet {
        /// API base URL (e.g., `"https://api.weather.gc.ca"`).
        base_url: String,
        /// Station collection name.
        station_collection: String,
        /// Real-time observation collection name.
        observation_collection: String,
    },
}

const fn default_true() -> bool {
    true
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[("geomet", include_str!("../services/geomet.toml"))];

/// Returns all air quality provider configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<AirQualityService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse air quality service '{name}': {e}"))
        })
        .collect()
}

/// Returns the first enabled provider, if any.
#[must_use]
pub fn default_service() -> Option<AirQualityService> {
    all_services().into_iter().find(|s| s.enabled)
}

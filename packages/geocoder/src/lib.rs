#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoding service for hazard risk checks.
//!
//! Converts free-text locations (Canadian postal codes) to coordinates
//! through a [`Geocoder`]. Providers are configured via TOML files in
//! `services/`:
//!
//! 1. **Mapbox Geocoding** ([`mapbox`]): postal-code search restricted to
//!    Canada and biased towards Vancouver. Requires an access token in the
//!    environment variable named by the service's `token_env`.
//!
//! A query that the provider answers without a match is
//! [`GeocodeError::NotFound`]; anything else that goes wrong is a service
//! error. Neither is retried here.

pub mod mapbox;
pub mod service_registry;

use hazard_risk_geography_models::{GeoPoint, InvalidCoordinateError};
use thiserror::Error;

/// A geocoding result.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    /// Resolved coordinates.
    pub point: GeoPoint,
    /// The provider's display name for the match.
    pub place_name: Option<String>,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The provider answered but found no match.
    #[error("Location not found: {query}")]
    NotFound {
        /// The query as submitted.
        query: String,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Geocoding failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// The provider returned coordinates outside the valid range.
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinateError),

    /// The provider is not usable as configured.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },
}

/// Trait for geocoding providers.
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves a free-text query to a single location.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NotFound`] if nothing matched, or another
    /// [`GeocodeError`] if the request or response parsing fails.
    async fn geocode(&self, query: &str) -> Result<GeocodedLocation, GeocodeError>;
}

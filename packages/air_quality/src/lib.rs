#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Nearest air quality station resolution.
//!
//! Finds the AQHI monitoring station closest to a point and fetches its
//! latest observation. Station data comes from a [`StationProvider`]:
//!
//! 1. **MSC GeoMet** ([`providers::geomet`]): Environment and Climate
//!    Change Canada's OGC API, no API key required.
//!
//! Providers are configured via TOML files in `services/` and loaded from
//! the [`service_registry`]. The [`resolver`] only talks to the trait, so
//! it can be exercised without network access.
//!
//! "No station nearby" and "no observation" are `Ok(None)`; transport
//! failures and non-success responses are [`AirQualityError`]s.

pub mod providers;
pub mod resolver;
pub mod service_registry;

pub use providers::StationProvider;

use thiserror::Error;

/// Errors from station and observation queries.
#[derive(Debug, Error)]
pub enum AirQualityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("{context} failed with status {status}")]
    Status {
        /// Which request failed (e.g. "AQHI station fetch").
        context: String,
        /// HTTP status code.
        status: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

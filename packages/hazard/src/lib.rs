#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wildfire hazard dataset handling.
//!
//! Loads a GeoJSON `FeatureCollection` of fire points and perimeters into a
//! [`HazardCollection`](hazard_risk_hazard_models::HazardCollection),
//! finds the hazard nearest to a query point, and summarises the dataset.
//! Individual bad records never fail a load or a search; they are logged and
//! left out.

pub mod ingest;
pub mod locator;
pub mod summary;

use thiserror::Error;

/// Errors that can occur while loading a hazard dataset.
#[derive(Debug, Error)]
pub enum HazardError {
    /// Reading the dataset file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success HTTP status.
    #[error("Hazard GeoJSON request failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The document is JSON but not a usable feature collection.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

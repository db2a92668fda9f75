#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for wildfire and air quality risk checks.
//!
//! With a subcommand, runs non-interactively. Without one, prompts for what
//! to do via [`interactive::run`].

mod interactive;
mod render;

use clap::{Parser, Subcommand};
use hazard_risk_air_quality::providers::geomet::GeometProvider;
use hazard_risk_air_quality::resolver::SearchConfig;
use hazard_risk_assessment_models::Assessment;
use hazard_risk_geocoder::mapbox::MapboxGeocoder;
use hazard_risk_geography_models::GeoPoint;
use hazard_risk_hazard::summary::{filter_by_year, summarize, years};
use hazard_risk_hazard_models::HazardCollection;

#[derive(Parser)]
#[command(name = "hazard_risk", about = "Wildfire and air quality risk checks")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess wildfire and air quality risk at a location
    Check {
        /// Canadian postal code to geocode (requires `MAPBOX_TOKEN`)
        #[arg(long, conflicts_with_all = ["lat", "lng"], required_unless_present = "lat")]
        postal_code: Option<String>,
        /// Latitude in decimal degrees
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude in decimal degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
        /// Hazard dataset: a GeoJSON file path or an http(s) URL
        #[arg(long)]
        hazards: String,
        /// Only consider fires from this fire season
        #[arg(long)]
        year: Option<i32>,
        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize a hazard dataset
    Summary {
        /// Hazard dataset: a GeoJSON file path or an http(s) URL
        #[arg(long)]
        hazards: String,
        /// Only count fires from this fire season
        #[arg(long)]
        year: Option<i32>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Where an assessment should be made.
enum Target {
    PostalCode(String),
    Point(GeoPoint),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run().await;
    };

    match command {
        Commands::Check {
            postal_code,
            lat,
            lng,
            hazards,
            year,
            json,
        } => {
            let target = match (postal_code, lat, lng) {
                (Some(code), _, _) => Target::PostalCode(code),
                (None, Some(lat), Some(lng)) => Target::Point(GeoPoint::new(lat, lng)?),
                _ => return Err("Provide --postal-code or both --lat and --lng".into()),
            };

            let client = reqwest::Client::new();
            let hazards = load_hazards(&client, &hazards, year).await?;
            let assessment = run_check(client, target, &hazards).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("{}", render::format_assessment(&assessment));
            }
        }
        Commands::Summary {
            hazards,
            year,
            json,
        } => {
            let client = reqwest::Client::new();
            let hazards = load_hazards(&client, &hazards, year).await?;
            let (summary, years) = (summarize(&hazards), years(&hazards));

            if json {
                let document = render::summary_json(&summary, &years);
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                println!("{}", render::format_summary(&summary, &years));
            }
        }
    }

    Ok(())
}

/// Loads a hazard dataset from a path or URL, optionally narrowed to one
/// fire season.
async fn load_hazards(
    client: &reqwest::Client,
    source: &str,
    year: Option<i32>,
) -> Result<HazardCollection, Box<dyn std::error::Error>> {
    let hazards = hazard_risk_hazard::ingest::load(client, source).await?;

    Ok(match year {
        Some(year) => {
            let filtered = filter_by_year(&hazards, year);
            log::info!("{} feature(s) from fire season {year}", filtered.len());
            filtered
        }
        None => hazards,
    })
}

/// Builds the configured providers and assesses `target`.
async fn run_check(
    client: reqwest::Client,
    target: Target,
    hazards: &HazardCollection,
) -> Result<Assessment, Box<dyn std::error::Error>> {
    let service = hazard_risk_air_quality::service_registry::default_service()
        .ok_or("No air quality provider is enabled")?;
    let search: SearchConfig = service.search;
    let provider = GeometProvider::from_service(client.clone(), &service);

    let assessment = match target {
        Target::PostalCode(code) => {
            let geocoding = hazard_risk_geocoder::service_registry::default_service()
                .ok_or("No geocoding service is enabled")?;
            let geocoder = MapboxGeocoder::from_service(client, &geocoding)?;
            hazard_risk_assessment::check(&code, &geocoder, hazards, &provider, &search).await?
        }
        Target::Point(point) => {
            hazard_risk_assessment::assess(point, None, hazards, &provider, &search).await?
        }
    };

    Ok(assessment)
}

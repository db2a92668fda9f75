//! Interactive mode.
//!
//! Prompts for a postal code or coordinates and a hazard dataset, then
//! prints the same report as `hazard_risk check`.

use dialoguer::{Input, Select};
use hazard_risk_geography_models::GeoPoint;
use hazard_risk_hazard::summary::{summarize, years};

use crate::{Target, load_hazards, render, run_check};

/// Dataset offered when the user accepts the default.
const DEFAULT_DATASET: &str = "bc-wildfires.geojson";

/// Top-level actions in the interactive menu.
enum Action {
    CheckPostalCode,
    CheckCoordinates,
    Summarize,
}

impl Action {
    const ALL: &[Self] = &[
        Self::CheckPostalCode,
        Self::CheckCoordinates,
        Self::Summarize,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::CheckPostalCode => "Check a postal code",
            Self::CheckCoordinates => "Check coordinates",
            Self::Summarize => "Summarize a wildfire dataset",
        }
    }
}

/// Runs the interactive menu.
///
/// # Errors
///
/// Returns an error if a prompt fails, the dataset cannot be loaded, or the
/// assessment fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Wildfire & Air Quality Risk");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    let action = &Action::ALL[idx];
    let target = match action {
        Action::CheckPostalCode => {
            let code: String = Input::new()
                .with_prompt("Postal code (e.g., V2N 4Z9)")
                .interact_text()?;
            Some(Target::PostalCode(code))
        }
        Action::CheckCoordinates => {
            let lat: f64 = Input::new().with_prompt("Latitude").interact_text()?;
            let lng: f64 = Input::new().with_prompt("Longitude").interact_text()?;
            Some(Target::Point(GeoPoint::new(lat, lng)?))
        }
        Action::Summarize => None,
    };

    let source: String = Input::new()
        .with_prompt("Wildfire dataset (path or URL)")
        .default(DEFAULT_DATASET.to_string())
        .interact_text()?;

    let client = reqwest::Client::new();
    let hazards = load_hazards(&client, &source, None).await?;

    if let Some(target) = target {
        let assessment = run_check(client, target, &hazards).await?;
        println!();
        println!("{}", render::format_assessment(&assessment));
        return Ok(());
    }

    let seasons = years(&hazards);
    let hazards = if seasons.is_empty() {
        hazards
    } else {
        let mut choices = vec!["All seasons".to_string()];
        choices.extend(seasons.iter().map(ToString::to_string));
        let choice = Select::new()
            .with_prompt("Fire season")
            .items(&choices)
            .default(0)
            .interact()?;
        match choice.checked_sub(1).and_then(|i| seasons.get(i)) {
            Some(&year) => hazard_risk_hazard::summary::filter_by_year(&hazards, year),
            None => hazards,
        }
    };

    println!();
    println!("{}", render::format_summary(&summarize(&hazards), &seasons));

    Ok(())
}

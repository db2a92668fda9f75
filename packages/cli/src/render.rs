//! Plain-text rendering of assessments and dataset summaries.

use hazard_risk_assessment_models::Assessment;
use hazard_risk_hazard::summary::HazardSummary;

/// Formats an assessment as a short multi-line report.
#[must_use]
pub fn format_assessment(assessment: &Assessment) -> String {
    let mut lines = Vec::new();

    let coords = format!(
        "({:.4}, {:.4})",
        assessment.location.lat, assessment.location.lng
    );
    lines.push(match &assessment.place_name {
        Some(name) => format!("Location:         {name} {coords}"),
        None => format!("Location:         {coords}"),
    });

    lines.push(match &assessment.nearest_hazard {
        Some(hazard) => format!(
            "Nearest fire:     {} ({}), {:.1} km away, {} ha",
            hazard.name, hazard.status, hazard.distance_km, hazard.size
        ),
        None => "Nearest fire:     none".to_string(),
    });
    if let Some(hazard) = &assessment.nearest_hazard {
        let details: Vec<String> = [
            hazard.fire_number.clone(),
            hazard.year.map(|y| format!("{y} season")),
            hazard.cause.as_ref().map(|c| format!("cause {c}")),
            hazard.ignition_date.as_ref().map(|d| format!("ignited {d}")),
            hazard.out_date.as_ref().map(|d| format!("out {d}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !details.is_empty() {
            lines.push(format!("Fire details:     {}", details.join(", ")));
        }
    }
    if let Some(url) = assessment
        .nearest_hazard
        .as_ref()
        .and_then(|h| h.detail_url.as_deref())
    {
        lines.push(format!("                  {url}"));
    }
    lines.push(format!(
        "Wildfire risk:    {} ({})",
        assessment.wildfire_risk.level, assessment.wildfire_risk.reason
    ));

    lines.push(match &assessment.air_quality {
        Some(reading) => {
            let value = reading
                .value
                .map_or_else(|| "unavailable".to_string(), |v| v.to_string());
            let observed = reading
                .observed_at
                .map(|t| format!(", observed {}", t.format("%Y-%m-%d %H:%M UTC")))
                .unwrap_or_default();
            format!(
                "Air quality:      AQHI {value} at {} ({:.1} km away{observed})",
                reading.station_name, reading.station_distance_km
            )
        }
        None => "Air quality:      no station data".to_string(),
    });
    lines.push(format!(
        "Air quality risk: {} ({})",
        assessment.air_quality_risk.level, assessment.air_quality_risk.reason
    ));

    lines.push(format!(
        "Overall risk:     {} ({})",
        assessment.overall.level, assessment.overall.reason
    ));

    lines.join("\n")
}

/// Builds the `summary --json` document: headline numbers plus the fire
/// seasons present.
#[must_use]
pub fn summary_json(summary: &HazardSummary, years: &[i32]) -> serde_json::Value {
    serde_json::json!({ "summary": summary, "years": years })
}

/// Formats dataset headline numbers and the fire seasons present.
#[must_use]
pub fn format_summary(summary: &HazardSummary, years: &[i32]) -> String {
    let years = if years.is_empty() {
        "none".to_string()
    } else {
        years
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Fires:        {}\nActive:       {}\nTotal area:   {:.1} ha\nFire seasons: {years}",
        summary.total, summary.active, summary.total_size
    )
}

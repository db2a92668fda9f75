//! Dataset-level views: fire-season filtering and headline counts.

use std::collections::BTreeSet;

use hazard_risk_hazard_models::HazardCollection;
use serde::Serialize;

/// Headline numbers for a hazard dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardSummary {
    /// Number of features.
    pub total: usize,
    /// Number of features not declared out.
    pub active: usize,
    /// Sum of fire sizes, in hectares.
    pub total_size: f64,
}

/// Counts features and sums their sizes.
#[must_use]
pub fn summarize(hazards: &HazardCollection) -> HazardSummary {
    HazardSummary {
        total: hazards.len(),
        active: hazards
            .features
            .iter()
            .filter(|f| !f.properties.is_out())
            .count(),
        total_size: hazards.features.iter().map(|f| f.properties.size).sum(),
    }
}

/// Distinct fire years present in the dataset, most recent first.
#[must_use]
pub fn years(hazards: &HazardCollection) -> Vec<i32> {
    hazards
        .features
        .iter()
        .filter_map(|f| f.properties.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// Keeps only features from the given fire year, preserving order.
#[must_use]
pub fn filter_by_year(hazards: &HazardCollection, year: i32) -> HazardCollection {
    HazardCollection::new(
        hazards
            .features
            .iter()
            .filter(|f| f.properties.year == Some(year))
            .cloned()
            .collect(),
    )
}

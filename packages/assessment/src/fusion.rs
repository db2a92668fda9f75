//! Combines the wildfire and air quality scores into one overall risk.

use hazard_risk_assessment_models::{AirQualityRisk, RiskLevel, ScoredRisk};

/// Takes the higher of the two levels, escalating by one (capped at
/// [`RiskLevel::Extreme`]) when both are at least [`RiskLevel::High`].
#[must_use]
pub fn combine(wildfire: &ScoredRisk, air: &AirQualityRisk) -> ScoredRisk {
    let w = wildfire.level.ordinal();
    let a = air.score;
    let high = RiskLevel::High.ordinal();

    let mut combined = w.max(a);
    if w >= high && a >= high {
        combined = (combined + 1).min(RiskLevel::Extreme.ordinal());
    }

    ScoredRisk::new(
        RiskLevel::from_ordinal(combined),
        format!("Wildfire: {}, Air: {}", wildfire.level, air.level),
    )
}

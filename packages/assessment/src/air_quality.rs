//! AQHI risk scoring.

use hazard_risk_assessment_models::{AirQualityRisk, RiskLevel};

/// Reason given when no usable AQHI value is available.
pub const AQHI_UNAVAILABLE: &str = "AQHI unavailable";

/// Scores an AQHI reading. Missing and non-finite values are
/// [`RiskLevel::Unknown`].
///
/// Bands: up to 3 low, up to 6 moderate, up to 10 high, above 10 extreme.
/// The reason uses the official AQHI band names.
#[must_use]
pub fn score_aqhi(aqhi: Option<f64>) -> AirQualityRisk {
    let Some(value) = aqhi.filter(|v| v.is_finite()) else {
        return AirQualityRisk::new(RiskLevel::Unknown, AQHI_UNAVAILABLE);
    };

    let (level, label) = if value <= 3.0 {
        (RiskLevel::Low, "Low")
    } else if value <= 6.0 {
        (RiskLevel::Moderate, "Moderate")
    } else if value <= 10.0 {
        (RiskLevel::High, "High")
    } else {
        (RiskLevel::Extreme, "Very High")
    };

    AirQualityRisk::new(level, format!("AQHI {value} ({label})"))
}

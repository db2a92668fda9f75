//! Wildfire risk scoring.
//!
//! The score is decided by an ordered rule table: the first rule whose
//! predicate holds for the nearest fire's distance, status, and size wins.

use hazard_risk_assessment_models::{RiskLevel, ScoredRisk};
use hazard_risk_hazard_models::OUT_STATUS;

/// Reason given when the dataset has no locatable hazard.
pub const NO_NEARBY_FIRES: &str = "No nearby fires found";

/// Reason given when no other rule matched.
pub const DISTANT_OR_SMALL: &str = "More than 50 km away or small fire";

/// The facts a wildfire rule is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireFacts<'a> {
    /// Distance to the fire, in kilometers.
    pub distance_km: f64,
    /// Published status.
    pub status: &'a str,
    /// Fire size in hectares.
    pub size: f64,
}

/// One row of the wildfire rule table.
#[derive(Debug, Clone, Copy)]
pub struct WildfireRule {
    /// Short identifier, used in logs.
    pub name: &'static str,
    /// Whether the rule applies.
    pub applies: fn(&FireFacts<'_>) -> bool,
    pub level: RiskLevel,
    pub reason: &'static str,
}

/// Wildfire rules in evaluation order. The last rule always applies.
pub const WILDFIRE_RULES: &[WildfireRule] = &[
    WildfireRule {
        name: "out",
        applies: is_out,
        level: RiskLevel::Low,
        reason: "Fire is out",
    },
    WildfireRule {
        name: "very_close_very_large",
        applies: very_close_very_large,
        level: RiskLevel::Extreme,
        reason: "Very close, very large fire",
    },
    WildfireRule {
        name: "very_close_large",
        applies: very_close_large,
        level: RiskLevel::High,
        reason: "Very close, large fire",
    },
    WildfireRule {
        name: "large_within_25",
        applies: large_within_25,
        level: RiskLevel::High,
        reason: "Large fire within 25 km",
    },
    WildfireRule {
        name: "active_nearby",
        applies: active_nearby,
        level: RiskLevel::High,
        reason: "Active fire nearby",
    },
    WildfireRule {
        name: "large_within_50",
        applies: large_within_50,
        level: RiskLevel::Moderate,
        reason: "Large fire within 50 km",
    },
    WildfireRule {
        name: "within_25",
        applies: within_25,
        level: RiskLevel::Moderate,
        reason: "Fire within 25 km",
    },
    WildfireRule {
        name: "otherwise",
        applies: otherwise,
        level: RiskLevel::Low,
        reason: DISTANT_OR_SMALL,
    },
];

fn is_out(f: &FireFacts<'_>) -> bool {
    f.status.eq_ignore_ascii_case(OUT_STATUS)
}

fn very_close_very_large(f: &FireFacts<'_>) -> bool {
    f.distance_km <= 10.0 && f.size > 5000.0
}

fn very_close_large(f: &FireFacts<'_>) -> bool {
    f.distance_km <= 10.0 && f.size > 1000.0
}

fn large_within_25(f: &FireFacts<'_>) -> bool {
    f.distance_km <= 25.0 && f.size > 5000.0
}

fn active_nearby(f: &FireFacts<'_>) -> bool {
    f.distance_km <= 25.0 && f.size > 100.0
}

fn large_within_50(f: &FireFacts<'_>) -> bool {
    f.distance_km <= 50.0 && f.size > 5000.0
}

fn within_25(f: &FireFacts<'_>) -> bool {
    f.distance_km <= 25.0
}

const fn otherwise(_: &FireFacts<'_>) -> bool {
    true
}

/// Scores the nearest fire. `status` is compared to `"out"`
/// case-insensitively.
#[must_use]
pub fn score_wildfire(distance_km: f64, status: &str, size: f64) -> ScoredRisk {
    let facts = FireFacts {
        distance_km,
        status,
        size,
    };

    WILDFIRE_RULES
        .iter()
        .find(|rule| (rule.applies)(&facts))
        .map_or_else(
            || ScoredRisk::new(RiskLevel::Low, DISTANT_OR_SMALL),
            |rule| {
                log::debug!("Wildfire rule {} matched {facts:?}", rule.name);
                ScoredRisk::new(rule.level, rule.reason)
            },
        )
}

/// The wildfire risk when no hazard could be located.
#[must_use]
pub fn no_nearby_fires() -> ScoredRisk {
    ScoredRisk::new(RiskLevel::Low, NO_NEARBY_FIRES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static WildfireRule {
        WILDFIRE_RULES.iter().find(|r| r.name == name).unwrap()
    }

    fn facts(distance_km: f64, status: &'static str, size: f64) -> FireFacts<'static> {
        FireFacts {
            distance_km,
            status,
            size,
        }
    }

    fn assert_scores(distance_km: f64, status: &str, size: f64, level: RiskLevel, reason: &str) {
        assert_eq!(
            score_wildfire(distance_km, status, size),
            ScoredRisk::new(level, reason),
            "d={distance_km} status={status:?} size={size}"
        );
    }

    #[test]
    fn table_has_eight_rules_ending_in_catch_all() {
        assert_eq!(WILDFIRE_RULES.len(), 8);
        let last = WILDFIRE_RULES.last().unwrap();
        assert!((last.applies)(&facts(f64::MAX, "", 0.0)));
    }

    #[test]
    fn out_rule_ignores_case_but_not_whitespace() {
        let out = rule("out");
        assert!((out.applies)(&facts(1.0, "OUT", 9000.0)));
        assert!((out.applies)(&facts(1.0, "Out", 9000.0)));
        assert!(!(out.applies)(&facts(1.0, "Out of Control", 9000.0)));
        assert!(!(out.applies)(&facts(1.0, " out", 9000.0)));
    }

    #[test]
    fn out_beats_everything() {
        assert_scores(0.0, "out", 100_000.0, RiskLevel::Low, "Fire is out");
    }

    #[test]
    fn very_close_fires() {
        assert_scores(
            10.0,
            "Out of Control",
            5001.0,
            RiskLevel::Extreme,
            "Very close, very large fire",
        );
        assert_scores(
            5.0,
            "Being Held",
            5000.0,
            RiskLevel::High,
            "Very close, large fire",
        );
        assert_scores(
            5.0,
            "Being Held",
            1001.0,
            RiskLevel::High,
            "Very close, large fire",
        );
        assert_scores(
            5.0,
            "Being Held",
            1000.0,
            RiskLevel::High,
            "Active fire nearby",
        );
    }

    #[test]
    fn fires_within_25_km() {
        assert_scores(
            20.0,
            "Out of Control",
            6000.0,
            RiskLevel::High,
            "Large fire within 25 km",
        );
        assert_scores(
            25.0,
            "Out of Control",
            101.0,
            RiskLevel::High,
            "Active fire nearby",
        );
        assert_scores(
            25.0,
            "Out of Control",
            100.0,
            RiskLevel::Moderate,
            "Fire within 25 km",
        );
        assert_scores(
            3.0,
            "Under Control",
            0.0,
            RiskLevel::Moderate,
            "Fire within 25 km",
        );
    }

    #[test]
    fn fires_within_50_km() {
        assert_scores(
            50.0,
            "Out of Control",
            5000.1,
            RiskLevel::Moderate,
            "Large fire within 50 km",
        );
        assert_scores(
            30.0,
            "Out of Control",
            5000.0,
            RiskLevel::Low,
            DISTANT_OR_SMALL,
        );
        assert_scores(
            25.01,
            "Out of Control",
            4000.0,
            RiskLevel::Low,
            DISTANT_OR_SMALL,
        );
    }

    #[test]
    fn distant_fires_are_low() {
        assert_scores(
            50.01,
            "Out of Control",
            100_000.0,
            RiskLevel::Low,
            DISTANT_OR_SMALL,
        );
        assert_scores(400.0, "Unknown", 0.0, RiskLevel::Low, DISTANT_OR_SMALL);
    }

    #[test]
    fn closer_never_scores_lower() {
        let sizes = [0.0, 50.0, 101.0, 1001.0, 5001.0, 20_000.0];
        let distances = [0.0, 5.0, 10.0, 10.5, 24.0, 25.0, 30.0, 50.0, 60.0, 500.0];
        for size in sizes {
            for pair in distances.windows(2) {
                let near = score_wildfire(pair[0], "Out of Control", size).level;
                let far = score_wildfire(pair[1], "Out of Control", size).level;
                assert!(
                    near >= far,
                    "size {size}: {} km {near} < {} km {far}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn larger_never_scores_lower() {
        let sizes = [0.0, 100.0, 101.0, 1000.0, 1001.0, 5000.0, 5001.0, 50_000.0];
        for distance in [0.0, 10.0, 20.0, 25.0, 40.0, 50.0, 80.0] {
            for pair in sizes.windows(2) {
                let small = score_wildfire(distance, "Out of Control", pair[0]).level;
                let large = score_wildfire(distance, "Out of Control", pair[1]).level;
                assert!(
                    large >= small,
                    "{distance} km: {} ha {large} < {} ha {small}",
                    pair[1],
                    pair[0]
                );
            }
        }
    }

    #[test]
    fn no_fire_is_low() {
        assert_eq!(
            no_nearby_fires(),
            ScoredRisk::new(RiskLevel::Low, "No nearby fires found")
        );
    }
}

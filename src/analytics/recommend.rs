// Rule-based tactical recommendations.
//
// A small fixed-order rule engine over the scenario and the team/opponent
// comparison. Rules are independent, not mutually exclusive; the output is
// never empty.

use crate::analytics::round_to;
use crate::data::{ScenarioInputs, TeamProfile};

/// One qualitative suggestion with a numeric impact score (one decimal).
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: &'static str,
    pub rationale: String,
    pub impact: f64,
}

/// Impact of the fallback recommendation when no rule fires.
const MAINTAIN_IMPACT: f64 = 4.5;

/// Impact of the matchup-deficit rule.
const MATCHUP_DEFICIT_IMPACT: f64 = 6.8;

/// Evaluate the rules in fixed order, then sort by descending impact
/// (stable on ties).
pub fn generate_recommendations(
    team: &TeamProfile,
    scenario: &ScenarioInputs,
    opponent_net: f64,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if scenario.pace_delta > 2.0 {
        recommendations.push(Recommendation {
            title: "Push transition volume",
            rationale: format!(
                "A pace shift of {:+.1} rewards early offense and rim pressure",
                scenario.pace_delta
            ),
            impact: round_to(1.6 * scenario.pace_delta.abs() + 4.0, 1),
        });
    }
    if scenario.turnover_delta > 1.0 {
        recommendations.push(Recommendation {
            title: "Tighten ball security",
            rationale: format!(
                "Projected {:+.1} extra turnovers per game bleed possessions",
                scenario.turnover_delta
            ),
            impact: round_to(2.5 * scenario.turnover_delta + 2.0, 1),
        });
    }
    if scenario.shooting_delta < 0.0 {
        recommendations.push(Recommendation {
            title: "Stabilize the shot profile",
            rationale: format!(
                "A {:+.1}% shooting dip calls for higher-value looks",
                scenario.shooting_delta
            ),
            impact: round_to(2.1 * scenario.shooting_delta.abs() + 1.5, 1),
        });
    }
    if team.net_rating() < opponent_net {
        recommendations.push(Recommendation {
            title: "Counter the talent gap",
            rationale: format!(
                "Opponent holds a {:+.1} net-rating edge; scheme for extra possessions",
                opponent_net - team.net_rating()
            ),
            impact: MATCHUP_DEFICIT_IMPACT,
        });
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation {
            title: "Maintain current model",
            rationale: "No scenario lever or matchup deficit demands a change".into(),
            impact: MAINTAIN_IMPACT,
        });
    }

    recommendations.sort_by(|a, b| {
        b.impact
            .partial_cmp(&a.impact)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    recommendations
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

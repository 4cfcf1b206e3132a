// Closed-form win probability model for hypothetical scenarios.

use crate::data::{ScenarioInputs, TeamProfile};

/// Weight applied to the opponent's net rating in the adjusted probability.
const OPPONENT_PENALTY: f64 = 0.7;

/// Logistic squash: `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Clamp a raw percentage into the reportable [1, 99] band and round to a
/// whole number. Probabilities of 0% and 100% are never reported.
fn clamp_probability(raw: f64) -> f64 {
    raw.clamp(1.0, 99.0).round()
}

/// Win probability for a team under a scenario, ignoring the opponent.
///
/// `boost = 0.35*shooting - 0.4*turnover + 0.12*pace`;
/// `score = 0.18*(net_rating + boost) + 0.75*recent_form`;
/// result = `round(clamp(sigmoid(score)*100, 1, 99))`, an integer-valued
/// f64 in [1, 99].
pub fn win_probability(team: &TeamProfile, scenario: &ScenarioInputs) -> f64 {
    let boost = 0.35 * scenario.shooting_delta - 0.4 * scenario.turnover_delta
        + 0.12 * scenario.pace_delta;
    let score = 0.18 * (team.net_rating() + boost) + 0.75 * team.recent_form;
    clamp_probability(sigmoid(score) * 100.0)
}

/// Win probability with the opponent penalty applied: subtract
/// `0.7 * opponent_net` from the base probability and reclamp to [1, 99].
///
/// This is the one place the penalty lives. Every surface that shows a win
/// probability next to an opponent (simulation reports, sensitivity,
/// tournament entries) calls this rather than re-deriving the step.
pub fn opponent_adjusted_win_probability(
    team: &TeamProfile,
    scenario: &ScenarioInputs,
    opponent_net: f64,
) -> f64 {
    let base = win_probability(team, scenario);
    clamp_probability(base - OPPONENT_PENALTY * opponent_net)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Local sensitivity analysis over the scenario factors.
//
// First-order finite differences, not an analytic gradient: each factor is
// bumped by a fixed step and the opponent-adjusted projector is re-run with
// its exact formula (clamping included), so the deltas match what a caller
// would see by subtracting two displayed probabilities.

use crate::analytics::projection::opponent_adjusted_win_probability;
use crate::analytics::round_to;
use crate::data::{ScenarioInputs, TeamProfile};
use std::fmt;

/// Fixed perturbation step applied to one factor at a time.
pub const PERTURBATION_STEP: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioFactor {
    Pace,
    Shooting,
    Turnovers,
}

impl ScenarioFactor {
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioFactor::Pace => "Pace",
            ScenarioFactor::Shooting => "Shooting",
            ScenarioFactor::Turnovers => "Turnovers",
        }
    }
}

impl fmt::Display for ScenarioFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signed change in adjusted win probability from bumping one factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensitivityImpact {
    pub factor: ScenarioFactor,
    pub delta_win_probability: f64,
}

fn perturbed(scenario: &ScenarioInputs, factor: ScenarioFactor) -> ScenarioInputs {
    let mut s = *scenario;
    match factor {
        ScenarioFactor::Pace => s.pace_delta += PERTURBATION_STEP,
        ScenarioFactor::Shooting => s.shooting_delta += PERTURBATION_STEP,
        ScenarioFactor::Turnovers => s.turnover_delta += PERTURBATION_STEP,
    }
    s
}

/// Measure which scenario lever matters most: bump each factor by +2 in
/// isolation, re-evaluate the adjusted win probability, and report the
/// three deltas (two decimals) sorted by descending absolute magnitude.
pub fn analyze_sensitivity(
    team: &TeamProfile,
    scenario: &ScenarioInputs,
    opponent_net: f64,
) -> Vec<SensitivityImpact> {
    let baseline = opponent_adjusted_win_probability(team, scenario, opponent_net);

    let mut impacts: Vec<SensitivityImpact> = [
        ScenarioFactor::Pace,
        ScenarioFactor::Shooting,
        ScenarioFactor::Turnovers,
    ]
    .into_iter()
    .map(|factor| {
        let shifted =
            opponent_adjusted_win_probability(team, &perturbed(scenario, factor), opponent_net);
        SensitivityImpact {
            factor,
            delta_win_probability: round_to(shifted - baseline, 2),
        }
    })
    .collect();

    // Stable sort keeps the Pace/Shooting/Turnovers order on tied magnitudes.
    impacts.sort_by(|a, b| {
        b.delta_win_probability
            .abs()
            .partial_cmp(&a.delta_win_probability.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    impacts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

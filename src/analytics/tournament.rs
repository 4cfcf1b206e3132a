// Scenario tournament: compare strategy archetypes against one opponent.
//
// Pure orchestration over the other components; each archetype evaluation
// is independent, so callers are free to parallelize if they ever need to.

use crate::analytics::projection::opponent_adjusted_win_probability;
use crate::analytics::recommend::{generate_recommendations, Recommendation};
use crate::analytics::round_to;
use crate::analytics::sensitivity::{analyze_sensitivity, ScenarioFactor};
use crate::analytics::simulation::{run_simulation_with, MonteCarloSummary};
use crate::data::{ScenarioInputs, TeamProfile};
use rand::Rng;

/// A named tactical posture to evaluate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyArchetype {
    pub name: &'static str,
    pub scenario: ScenarioInputs,
}

/// The fixed slate of archetypes the tournament compares.
pub fn strategy_archetypes() -> Vec<StrategyArchetype> {
    vec![
        StrategyArchetype {
            name: "Balanced",
            scenario: ScenarioInputs::zero(),
        },
        StrategyArchetype {
            name: "Uptempo",
            scenario: ScenarioInputs {
                pace_delta: 4.0,
                shooting_delta: 0.5,
                turnover_delta: 1.5,
            },
        },
        StrategyArchetype {
            name: "Ball Security",
            scenario: ScenarioInputs {
                pace_delta: -1.0,
                shooting_delta: -0.5,
                turnover_delta: -2.5,
            },
        },
        StrategyArchetype {
            name: "Bombs Away",
            scenario: ScenarioInputs {
                pace_delta: 2.0,
                shooting_delta: 3.0,
                turnover_delta: 1.0,
            },
        },
    ]
}

/// One evaluated archetype.
#[derive(Debug, Clone)]
pub struct TournamentEntry {
    pub name: &'static str,
    pub scenario: ScenarioInputs,
    /// Opponent-adjusted win probability, [1, 99].
    pub win_probability: f64,
    pub simulation: MonteCarloSummary,
    /// The scenario lever with the largest absolute effect.
    pub top_factor: ScenarioFactor,
    pub recommendations: Vec<Recommendation>,
    /// `0.5*win_rate + 0.3*win_probability + 0.02*total_impact`, two
    /// decimals; the tournament's ranking key.
    pub composite: f64,
}

/// Evaluate every archetype and rank by composite score, descending.
pub fn run_tournament_with(
    rng: &mut impl Rng,
    team: &TeamProfile,
    opponent_net: f64,
    iterations: u32,
) -> Vec<TournamentEntry> {
    let mut entries: Vec<TournamentEntry> = strategy_archetypes()
        .into_iter()
        .map(|archetype| {
            let scenario = archetype.scenario;
            let win_probability =
                opponent_adjusted_win_probability(team, &scenario, opponent_net);
            let simulation =
                run_simulation_with(rng, team, &scenario, opponent_net, iterations);
            let impacts = analyze_sensitivity(team, &scenario, opponent_net);
            let recommendations = generate_recommendations(team, &scenario, opponent_net);
            let total_impact: f64 = recommendations.iter().map(|r| r.impact).sum();
            let composite = round_to(
                0.5 * simulation.win_rate + 0.3 * win_probability + 0.02 * total_impact,
                2,
            );
            TournamentEntry {
                name: archetype.name,
                scenario,
                win_probability,
                top_factor: impacts[0].factor,
                simulation,
                recommendations,
                composite,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.composite
            .partial_cmp(&a.composite)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

/// Tournament with a fresh thread-local generator.
pub fn run_tournament(
    team: &TeamProfile,
    opponent_net: f64,
    iterations: u32,
) -> Vec<TournamentEntry> {
    run_tournament_with(&mut rand::thread_rng(), team, opponent_net, iterations)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

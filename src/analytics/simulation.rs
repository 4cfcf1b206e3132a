// Monte Carlo margin simulation.
//
// Each run draws a fresh random sequence; nothing persists between calls.
// The generator is injected so tests can pass a seeded rng.

use crate::analytics::round_to;
use crate::data::{ScenarioInputs, TeamProfile};
use rand::Rng;

/// Supported iteration range; requested counts are clamped, never rejected.
pub const MIN_ITERATIONS: u32 = 200;
pub const MAX_ITERATIONS: u32 = 10_000;

/// Standard deviation of a single simulated margin around the base edge.
const MARGIN_SPREAD: f64 = 8.4;

/// Weight of the opponent's net rating in the base edge.
const OPPONENT_EDGE_WEIGHT: f64 = 0.75;

// ---------------------------------------------------------------------------
// Summary types
// ---------------------------------------------------------------------------

/// Labels for the six fixed margin bins, left-exclusive / right-inclusive
/// except the one-sided outer bins.
pub const BUCKET_LABELS: [&str; 6] = [
    "<= -10",
    "-10 to -5",
    "-5 to 0",
    "0 to +5",
    "+5 to +10",
    "> +10",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginBucket {
    pub label: &'static str,
    pub count: u32,
}

/// Summary statistics over one simulation run.
///
/// Floor and ceiling are order statistics of the sorted margins (indices
/// `floor(0.1*n)` and `floor(0.9*n)`), not interpolated percentiles.
#[derive(Debug, Clone)]
pub struct MonteCarloSummary {
    pub iterations: u32,
    /// Percentage of margins strictly greater than zero, one decimal.
    pub win_rate: f64,
    pub average_margin: f64,
    pub floor_margin: f64,
    pub ceiling_margin: f64,
    pub distribution: [MarginBucket; 6],
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// One standard-normal draw via the Box-Muller transform. A uniform draw of
/// exactly zero is rejected and redrawn so the log stays finite.
fn normal_sample(rng: &mut impl Rng) -> f64 {
    let mut u1: f64 = rng.gen();
    while u1 == 0.0 {
        u1 = rng.gen();
    }
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

fn bucket_index(margin: f64) -> usize {
    if margin <= -10.0 {
        0
    } else if margin <= -5.0 {
        1
    } else if margin <= 0.0 {
        2
    } else if margin <= 5.0 {
        3
    } else if margin <= 10.0 {
        4
    } else {
        5
    }
}

// ---------------------------------------------------------------------------
// Simulation entry points
// ---------------------------------------------------------------------------

/// Simulate point margins with a caller-supplied generator.
///
/// `base_edge = net_rating + (0.38*shooting - 0.44*turnover + 0.14*pace)
///             - 0.75*opponent_net`; each iteration adds a normal draw
/// scaled by 8.4. A win is a margin strictly greater than zero.
pub fn run_simulation_with(
    rng: &mut impl Rng,
    team: &TeamProfile,
    scenario: &ScenarioInputs,
    opponent_net: f64,
    iterations: u32,
) -> MonteCarloSummary {
    let iterations = iterations.clamp(MIN_ITERATIONS, MAX_ITERATIONS);
    let base_edge = team.net_rating()
        + (0.38 * scenario.shooting_delta - 0.44 * scenario.turnover_delta
            + 0.14 * scenario.pace_delta)
        - OPPONENT_EDGE_WEIGHT * opponent_net;

    let mut margins: Vec<f64> = Vec::with_capacity(iterations as usize);
    let mut wins: u32 = 0;
    let mut counts = [0u32; 6];

    for _ in 0..iterations {
        let margin = base_edge + MARGIN_SPREAD * normal_sample(rng);
        if margin > 0.0 {
            wins += 1;
        }
        counts[bucket_index(margin)] += 1;
        margins.push(margin);
    }

    margins.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = margins.len();
    let mean = margins.iter().sum::<f64>() / n as f64;
    let floor = margins[n / 10];
    let ceiling = margins[(9 * n) / 10];

    let mut distribution = [MarginBucket {
        label: BUCKET_LABELS[0],
        count: 0,
    }; 6];
    for (i, bucket) in distribution.iter_mut().enumerate() {
        bucket.label = BUCKET_LABELS[i];
        bucket.count = counts[i];
    }

    MonteCarloSummary {
        iterations,
        win_rate: round_to(100.0 * wins as f64 / iterations as f64, 1),
        average_margin: round_to(mean, 2),
        floor_margin: round_to(floor, 2),
        ceiling_margin: round_to(ceiling, 2),
        distribution,
    }
}

/// Simulate with a fresh thread-local generator (not reproducible).
pub fn run_simulation(
    team: &TeamProfile,
    scenario: &ScenarioInputs,
    opponent_net: f64,
    iterations: u32,
) -> MonteCarloSummary {
    run_simulation_with(&mut rand::thread_rng(), team, scenario, opponent_net, iterations)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

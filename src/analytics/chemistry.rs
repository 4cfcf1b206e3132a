// Lineup chemistry scoring.

use crate::analytics::round_to;
use crate::data::Player;

/// Chemistry read on a lineup, every component on a 0-100 scale.
///
/// `ball_movement = avg_assists * 12.5`, `spacing = avg_three_pct * 230`,
/// `switchability = avg(steals + blocks) * 30`, each clamped to [0, 100];
/// `overall = 0.35*bm + 0.3*sp + 0.35*sw`. All four reported at one
/// decimal. An empty lineup scores zero across the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineupChemistry {
    pub ball_movement: f64,
    pub spacing: f64,
    pub switchability: f64,
    pub overall: f64,
}

fn scale(value: f64, factor: f64) -> f64 {
    (value * factor).clamp(0.0, 100.0)
}

pub fn score_chemistry(lineup: &[Player]) -> LineupChemistry {
    if lineup.is_empty() {
        return LineupChemistry {
            ball_movement: 0.0,
            spacing: 0.0,
            switchability: 0.0,
            overall: 0.0,
        };
    }
    let n = lineup.len() as f64;
    let avg_assists = lineup.iter().map(|p| p.assists).sum::<f64>() / n;
    let avg_three_pct = lineup.iter().map(|p| p.three_pct).sum::<f64>() / n;
    let avg_wingspan_proxy = lineup.iter().map(|p| p.steals + p.blocks).sum::<f64>() / n;

    let ball_movement = scale(avg_assists, 12.5);
    let spacing = scale(avg_three_pct, 230.0);
    let switchability = scale(avg_wingspan_proxy, 30.0);
    let overall = 0.35 * ball_movement + 0.3 * spacing + 0.35 * switchability;

    LineupChemistry {
        ball_movement: round_to(ball_movement, 1),
        spacing: round_to(spacing, 1),
        switchability: round_to(switchability, 1),
        overall: round_to(overall, 1),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

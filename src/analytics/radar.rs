// Per-player radar metrics.

use crate::data::Player;

/// Six 0-100 axes for a radar chart, each a clamped linear map of box-score
/// rates rounded to the nearest integer:
///
/// - Scoring:     `points * 3.4`
/// - Shooting:    `fg_pct * 140 + three_pct * 60`
/// - Playmaking:  `assists * 11 - turnovers * 4`
/// - Rebounding:  `rebounds * 8.5`
/// - Defense:     `(steals + blocks) * 22`
/// - Motor:       `usage_pct * 2.2 + minutes * 0.9`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRadar {
    pub scoring: u32,
    pub shooting: u32,
    pub playmaking: u32,
    pub rebounding: u32,
    pub defense: u32,
    pub motor: u32,
}

fn axis(value: f64) -> u32 {
    value.clamp(0.0, 100.0).round() as u32
}

pub fn radar_stats(p: &Player) -> PlayerRadar {
    PlayerRadar {
        scoring: axis(p.points * 3.4),
        shooting: axis(p.fg_pct * 140.0 + p.three_pct * 60.0),
        playmaking: axis(p.assists * 11.0 - p.turnovers * 4.0),
        rebounding: axis(p.rebounds * 8.5),
        defense: axis((p.steals + p.blocks) * 22.0),
        motor: axis(p.usage_pct * 2.2 + p.minutes * 0.9),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Historical game anomaly detection.
//
// Z-scores over point differentials using population mean/stdev across the
// full game log. A zero standard deviation (flat log) is floored to 1 so the
// division is always defined.

use crate::analytics::round_to;
use crate::data::GameSample;
use chrono::NaiveDate;
use std::fmt;

/// Z-score magnitude at which a game counts as an outlier.
const OUTLIER_THRESHOLD: f64 = 1.2;

/// How many flagged games to report.
const TOP_ANOMALIES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierLabel {
    Positive,
    Negative,
    Normal,
}

impl OutlierLabel {
    pub fn display_str(&self) -> &'static str {
        match self {
            OutlierLabel::Positive => "Positive Outlier",
            OutlierLabel::Negative => "Negative Outlier",
            OutlierLabel::Normal => "Normal",
        }
    }
}

impl fmt::Display for OutlierLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

/// One scored game from the log.
#[derive(Debug, Clone, PartialEq)]
pub struct GameAnomaly {
    pub opponent: String,
    pub date: NaiveDate,
    pub point_differential: f64,
    /// Z-score of the differential against the full log, two decimals.
    pub z_score: f64,
    /// `100 * |z|`, one decimal.
    pub anomaly_score: f64,
    pub label: OutlierLabel,
}

fn label_for(z: f64) -> OutlierLabel {
    if z >= OUTLIER_THRESHOLD {
        OutlierLabel::Positive
    } else if z <= -OUTLIER_THRESHOLD {
        OutlierLabel::Negative
    } else {
        OutlierLabel::Normal
    }
}

/// Score every game's point differential against the log and return the
/// top four by descending anomaly score.
pub fn detect_anomalies(games: &[GameSample]) -> Vec<GameAnomaly> {
    if games.is_empty() {
        return Vec::new();
    }
    let n = games.len() as f64;
    let diffs: Vec<f64> = games.iter().map(|g| g.point_differential()).collect();
    let mean = diffs.iter().sum::<f64>() / n;
    let variance = diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    let mut stdev = variance.sqrt();
    if stdev == 0.0 {
        stdev = 1.0;
    }

    let mut anomalies: Vec<GameAnomaly> = games
        .iter()
        .zip(diffs.iter())
        .map(|(game, &diff)| {
            let z = (diff - mean) / stdev;
            GameAnomaly {
                opponent: game.opponent.clone(),
                date: game.date,
                point_differential: diff,
                z_score: round_to(z, 2),
                anomaly_score: round_to(100.0 * z.abs(), 1),
                label: label_for(z),
            }
        })
        .collect();

    anomalies.sort_by(|a, b| {
        b.anomaly_score
            .partial_cmp(&a.anomaly_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    anomalies.truncate(TOP_ANOMALIES);
    anomalies
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Opponent scouting: CSV row parsing and contender ranking.
//
// The CSV text arrives already read from wherever the caller found it; rows
// that fail numeric parsing or carry an empty name are dropped silently (an
// empty result is the "no valid rows" signal, surfaced by the caller).

use crate::analytics::round_to;
use serde::Deserialize;
use tracing::warn;

/// A validated opponent record: `name,offensiveRating,defensiveRating,pace`.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamCsvRow {
    pub name: String,
    pub off_rating: f64,
    pub def_rating: f64,
    pub pace: f64,
}

impl TeamCsvRow {
    pub fn net_rating(&self) -> f64 {
        self.off_rating - self.def_rating
    }
}

/// One ranked contender.
///
/// `contender_score = 3.2*net - 0.15*|pace - 100|`, two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct ContenderRanking {
    pub name: String,
    pub net_rating: f64,
    pub contender_score: f64,
}

#[derive(Debug, Deserialize)]
struct RawOpponentRow {
    name: String,
    #[serde(rename = "offensiveRating")]
    off_rating: String,
    #[serde(rename = "defensiveRating")]
    def_rating: String,
    pace: String,
}

/// Parse opponent CSV text: header plus comma-separated data rows, CR/LF or
/// LF line endings. Rows missing cells, failing a numeric parse, or with an
/// empty name are dropped with a warning.
pub fn parse_team_rows(text: &str) -> Vec<TeamCsvRow> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawOpponentRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed opponent row: {}", e);
                continue;
            }
        };
        let name = raw.name.trim().to_string();
        if name.is_empty() {
            warn!("skipping opponent row with empty name");
            continue;
        }
        let parsed = (
            raw.off_rating.trim().parse::<f64>(),
            raw.def_rating.trim().parse::<f64>(),
            raw.pace.trim().parse::<f64>(),
        );
        let (Ok(off_rating), Ok(def_rating), Ok(pace)) = parsed else {
            warn!("skipping opponent '{}': non-numeric rating cell", name);
            continue;
        };
        rows.push(TeamCsvRow {
            name,
            off_rating,
            def_rating,
            pace,
        });
    }
    rows
}

/// Rank opponents by contender score, descending.
pub fn rank_contenders(rows: &[TeamCsvRow]) -> Vec<ContenderRanking> {
    let mut rankings: Vec<ContenderRanking> = rows
        .iter()
        .map(|row| {
            let net = row.net_rating();
            let tempo_penalty = 0.15 * (row.pace - 100.0).abs();
            ContenderRanking {
                name: row.name.clone(),
                net_rating: net,
                contender_score: round_to(3.2 * net - tempo_penalty, 2),
            }
        })
        .collect();
    rankings.sort_by(|a, b| {
        b.contender_score
            .partial_cmp(&a.contender_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rankings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name,offensiveRating,defensiveRating,pace";

    #[test]
    fn parses_clean_rows() {
        let text = format!("{HEADER}\nRidgeline Stags,114.5,108.2,101.3\nBay Docks,109.8,111.0,96.4\n");
        let rows = parse_team_rows(&text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ridgeline Stags");
        assert!((rows[0].net_rating() - 6.3).abs() < 1e-9);
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let text = format!("{HEADER}\r\nRidgeline Stags,114.5,108.2,101.3\r\n");
        let rows = parse_team_rows(&text);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn drops_rows_with_bad_numerics_or_missing_cells() {
        let text = format!(
            "{HEADER}\n\
             Good Team,110,105,99\n\
             Bad Rating,abc,105,99\n\
             Short Row,110\n\
             ,110,105,99\n"
        );
        let rows = parse_team_rows(&text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Good Team");
    }

    #[test]
    fn empty_text_yields_no_rows() {
        assert!(parse_team_rows("").is_empty());
        assert!(parse_team_rows(HEADER).is_empty());
    }

    #[test]
    fn ranking_orders_by_contender_score() {
        // A: net 10, pace 100 -> 3.2*10 - 0 = 32.00
        // B: net 20, pace 105 -> 3.2*20 - 0.75 = 63.25
        let rows = vec![
            TeamCsvRow {
                name: "A".into(),
                off_rating: 110.0,
                def_rating: 100.0,
                pace: 100.0,
            },
            TeamCsvRow {
                name: "B".into(),
                off_rating: 120.0,
                def_rating: 100.0,
                pace: 105.0,
            },
        ];
        let rankings = rank_contenders(&rows);
        assert_eq!(rankings[0].name, "B");
        assert_eq!(rankings[0].contender_score, 63.25);
        assert_eq!(rankings[1].name, "A");
        assert_eq!(rankings[1].contender_score, 32.0);
    }

    #[test]
    fn tempo_penalty_is_symmetric() {
        let fast = TeamCsvRow {
            name: "Fast".into(),
            off_rating: 110.0,
            def_rating: 100.0,
            pace: 104.0,
        };
        let slow = TeamCsvRow {
            name: "Slow".into(),
            off_rating: 110.0,
            def_rating: 100.0,
            pace: 96.0,
        };
        let rankings = rank_contenders(&[fast, slow]);
        assert_eq!(rankings[0].contender_score, rankings[1].contender_score);
    }
}

// Seed data types and CSV loading.
//
// Reads the roster, team profile, and game log CSVs shipped under data/.
// The engine itself never defaults or repairs these records; malformed rows
// are dropped at load time with a warning.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Basketball positions used for lineup slot constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Guard,
    Forward,
    Center,
}

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles both single-letter ("G"/"F"/"C") and full-word forms.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "G" | "GUARD" => Some(Position::Guard),
            "F" | "FORWARD" => Some(Position::Forward),
            "C" | "CENTER" => Some(Position::Center),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Guard => "G",
            Position::Forward => "F",
            Position::Center => "C",
        }
    }
}

/// Per-game box-score rates for one player, plus contract data.
///
/// `fg_pct` and `three_pct` are fractions (0.472), `usage_pct` is a
/// percentage (24.5), matching the usual box-score export conventions.
/// Immutable reference data; the engine never mutates players.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub salary: u32,
    pub minutes: f64,
    pub points: f64,
    pub assists: f64,
    pub rebounds: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub fg_pct: f64,
    pub three_pct: f64,
    pub usage_pct: f64,
}

/// Season-level team strength profile.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamProfile {
    pub name: String,
    pub conference: String,
    pub off_rating: f64,
    pub def_rating: f64,
    pub pace: f64,
    /// Unitless momentum proxy, typically in [-1, 1] but not clamped.
    pub recent_form: f64,
}

impl TeamProfile {
    /// Offensive rating minus defensive rating; the team-strength proxy
    /// every projection formula starts from.
    pub fn net_rating(&self) -> f64 {
        self.off_rating - self.def_rating
    }
}

/// A hypothetical tactical shift: signed deltas against the team's current
/// pace, shooting, and turnover profile. Pure value type; the sensitivity
/// analyzer derives perturbed copies rather than mutating one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScenarioInputs {
    pub pace_delta: f64,
    pub shooting_delta: f64,
    pub turnover_delta: f64,
}

impl ScenarioInputs {
    /// The neutral scenario: no tactical shift at all.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// One historical game result, used by the anomaly scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSample {
    pub opponent: String,
    pub date: NaiveDate,
    pub points_for: u32,
    pub points_against: u32,
}

impl GameSample {
    pub fn point_differential(&self) -> f64 {
        self.points_for as f64 - self.points_against as f64
    }
}

/// All seed data loaded and ready for the analytics engine.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub players: Vec<Player>,
    pub teams: Vec<TeamProfile>,
    pub games: Vec<GameSample>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

/// Roster CSV row. Extra columns in the export are ignored by the reader.
#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    id: u32,
    name: String,
    pos: String,
    salary: u32,
    minutes: f64,
    points: f64,
    assists: f64,
    rebounds: f64,
    steals: f64,
    blocks: f64,
    turnovers: f64,
    fg_pct: f64,
    three_pct: f64,
    usage_pct: f64,
}

#[derive(Debug, Deserialize)]
struct RawTeamRow {
    name: String,
    conference: String,
    off_rating: f64,
    def_rating: f64,
    pace: f64,
    recent_form: f64,
}

#[derive(Debug, Deserialize)]
struct RawGameRow {
    opponent: String,
    date: NaiveDate,
    points_for: u32,
    points_against: u32,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns true if all given f64 values are finite (not NaN or Infinity).
fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawPlayerRow>() {
        match result {
            Ok(raw) => {
                let name = raw.name.trim().to_string();
                if name.is_empty() {
                    warn!("skipping player row with empty name (id {})", raw.id);
                    continue;
                }
                if !all_finite(&[raw.minutes, raw.fg_pct, raw.three_pct, raw.usage_pct]) {
                    warn!("skipping player '{}': non-finite rate value", name);
                    continue;
                }
                let Some(position) = Position::from_str_pos(&raw.pos) else {
                    warn!("skipping player '{}': unknown position '{}'", name, raw.pos);
                    continue;
                };
                if raw.salary == 0 {
                    warn!("skipping player '{}': zero salary", name);
                    continue;
                }
                players.push(Player {
                    id: raw.id,
                    name,
                    position,
                    salary: raw.salary,
                    minutes: raw.minutes,
                    points: raw.points,
                    assists: raw.assists,
                    rebounds: raw.rebounds,
                    steals: raw.steals,
                    blocks: raw.blocks,
                    turnovers: raw.turnovers,
                    fg_pct: raw.fg_pct,
                    three_pct: raw.three_pct,
                    usage_pct: raw.usage_pct,
                });
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }
    Ok(players)
}

fn load_teams_from_reader<R: Read>(rdr: R) -> Result<Vec<TeamProfile>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut teams = Vec::new();
    for result in reader.deserialize::<RawTeamRow>() {
        match result {
            Ok(raw) => {
                let name = raw.name.trim().to_string();
                if name.is_empty() {
                    warn!("skipping team row with empty name");
                    continue;
                }
                if !all_finite(&[raw.off_rating, raw.def_rating, raw.pace, raw.recent_form]) {
                    warn!("skipping team '{}': non-finite rating value", name);
                    continue;
                }
                teams.push(TeamProfile {
                    name,
                    conference: raw.conference.trim().to_string(),
                    off_rating: raw.off_rating,
                    def_rating: raw.def_rating,
                    pace: raw.pace,
                    recent_form: raw.recent_form,
                });
            }
            Err(e) => {
                warn!("skipping malformed team row: {}", e);
            }
        }
    }
    Ok(teams)
}

fn load_games_from_reader<R: Read>(rdr: R) -> Result<Vec<GameSample>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut games = Vec::new();
    for result in reader.deserialize::<RawGameRow>() {
        match result {
            Ok(raw) => {
                let opponent = raw.opponent.trim().to_string();
                if opponent.is_empty() {
                    warn!("skipping game row with empty opponent");
                    continue;
                }
                games.push(GameSample {
                    opponent,
                    date: raw.date,
                    points_for: raw.points_for,
                    points_against: raw.points_against,
                });
            }
            Err(e) => {
                warn!("skipping malformed game row: {}", e);
            }
        }
    }
    Ok(games)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<std::fs::File, DataError> {
    std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

pub fn load_players(path: &Path) -> Result<Vec<Player>, DataError> {
    load_players_from_reader(open(path)?).map_err(|e| DataError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

pub fn load_teams(path: &Path) -> Result<Vec<TeamProfile>, DataError> {
    load_teams_from_reader(open(path)?).map_err(|e| DataError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

pub fn load_games(path: &Path) -> Result<Vec<GameSample>, DataError> {
    load_games_from_reader(open(path)?).map_err(|e| DataError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load the complete seed data set from the paths configured in
/// `[data]`, resolved relative to `base_dir`.
pub fn load_seed_data(
    base_dir: &Path,
    paths: &crate::config::DataPaths,
) -> Result<SeedData, DataError> {
    Ok(SeedData {
        players: load_players(&base_dir.join(&paths.players))?,
        teams: load_teams(&base_dir.join(&paths.teams))?,
        games: load_games(&base_dir.join(&paths.games))?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_HEADER: &str =
        "id,name,pos,salary,minutes,points,assists,rebounds,steals,blocks,turnovers,fg_pct,three_pct,usage_pct";

    #[test]
    fn position_parsing_round_trip() {
        assert_eq!(Position::from_str_pos("G"), Some(Position::Guard));
        assert_eq!(Position::from_str_pos("forward"), Some(Position::Forward));
        assert_eq!(Position::from_str_pos(" C "), Some(Position::Center));
        assert_eq!(Position::from_str_pos("PF"), None);
        assert_eq!(Position::Guard.display_str(), "G");
    }

    #[test]
    fn player_loader_parses_clean_rows() {
        let csv = format!(
            "{PLAYER_HEADER}\n\
             1,Avery Holt,G,9200000,34.1,24.3,7.1,4.2,1.6,0.3,2.9,0.472,0.381,28.4\n\
             2,Theo Brandt,C,11000000,31.0,18.5,2.2,11.4,0.7,2.1,1.8,0.561,0.102,22.0\n"
        );
        let players = load_players_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Avery Holt");
        assert_eq!(players[0].position, Position::Guard);
        assert_eq!(players[1].salary, 11_000_000);
        assert!((players[1].rebounds - 11.4).abs() < 1e-12);
    }

    #[test]
    fn player_loader_drops_bad_rows() {
        let csv = format!(
            "{PLAYER_HEADER}\n\
             1,Good Guard,G,9200000,34.1,24.3,7.1,4.2,1.6,0.3,2.9,0.472,0.381,28.4\n\
             2,Bad Position,X,9000000,30.0,20.0,5.0,5.0,1.0,0.5,2.0,0.45,0.35,25.0\n\
             3,,G,9000000,30.0,20.0,5.0,5.0,1.0,0.5,2.0,0.45,0.35,25.0\n\
             4,Zero Salary,F,0,30.0,20.0,5.0,5.0,1.0,0.5,2.0,0.45,0.35,25.0\n\
             5,not-a-number,F,oops,30.0,20.0,5.0,5.0,1.0,0.5,2.0,0.45,0.35,25.0\n"
        );
        let players = load_players_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Good Guard");
    }

    #[test]
    fn team_loader_parses_and_computes_net_rating() {
        let csv = "name,conference,off_rating,def_rating,pace,recent_form\n\
                   Harbor City Sound,West,116.2,110.4,99.8,0.6\n";
        let teams = load_teams_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(teams.len(), 1);
        assert!((teams[0].net_rating() - 5.8).abs() < 1e-9);
    }

    #[test]
    fn game_loader_parses_dates_and_differentials() {
        let csv = "opponent,date,points_for,points_against\n\
                   Ridgeline Stags,2026-01-14,112,104\n\
                   Bay Docks,2026-01-16,98,121\n";
        let games = load_games_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(games.len(), 2);
        assert!((games[0].point_differential() - 8.0).abs() < 1e-12);
        assert!((games[1].point_differential() + 23.0).abs() < 1e-12);
        assert_eq!(games[0].date, NaiveDate::from_ymd_opt(2026, 1, 14).unwrap());
    }
}

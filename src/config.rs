// Configuration loading and parsing (config/courtside.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire courtside.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    lineup: LineupConfig,
    simulation: SimulationConfig,
    data: DataPaths,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub lineup: LineupConfig,
    pub simulation: SimulationConfig,
    pub data: DataPaths,
}

/// Salary cap and positional requirements for the lineup optimizer.
#[derive(Debug, Clone, Deserialize)]
pub struct LineupConfig {
    pub salary_cap: u32,
    pub slots: usize,
    pub guards: usize,
    pub forwards: usize,
    pub centers: usize,
    pub min_minutes: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Requested Monte Carlo iteration count. The simulator clamps this to
    /// its supported range at call time, so out-of-range values are not a
    /// config error.
    pub iterations: u32,
}

/// Seed data file locations, relative to the directory config was loaded from.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: String,
    pub teams: String,
    pub games: String,
    pub opponents: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load and validate the config from `<base_dir>/config/courtside.toml`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("courtside.toml");
    if !path.exists() {
        return Err(ConfigError::FileNotFound { path });
    }
    let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        lineup: file.lineup,
        simulation: file.simulation,
        data: file.data,
    };

    validate(&config)?;

    Ok(config)
}

/// Load the config from the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::ReadError {
        path: PathBuf::from("."),
        source: e,
    })?;
    load_config_from(&cwd)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let lineup = &config.lineup;
    if lineup.slots == 0 {
        return Err(ConfigError::ValidationError {
            field: "lineup.slots".into(),
            message: "slot count must be positive".into(),
        });
    }
    if lineup.guards + lineup.forwards + lineup.centers != lineup.slots {
        return Err(ConfigError::ValidationError {
            field: "lineup.guards/forwards/centers".into(),
            message: format!(
                "positional requirements must sum to {} slots, got {}",
                lineup.slots,
                lineup.guards + lineup.forwards + lineup.centers
            ),
        });
    }
    if lineup.salary_cap == 0 {
        return Err(ConfigError::ValidationError {
            field: "lineup.salary_cap".into(),
            message: "salary cap must be positive".into(),
        });
    }
    if lineup.min_minutes < 0.0 || !lineup.min_minutes.is_finite() {
        return Err(ConfigError::ValidationError {
            field: "lineup.min_minutes".into(),
            message: "minimum minutes must be a non-negative number".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_text: &str) -> Result<Config, ConfigError> {
        let file: ConfigFile = toml::from_str(toml_text).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("inline"),
            source: e,
        })?;
        let config = Config {
            lineup: file.lineup,
            simulation: file.simulation,
            data: file.data,
        };
        validate(&config)?;
        Ok(config)
    }

    const VALID: &str = r#"
        [lineup]
        salary_cap = 60000000
        slots = 5
        guards = 2
        forwards = 2
        centers = 1
        min_minutes = 12.0

        [simulation]
        iterations = 2000

        [data]
        players = "data/players.csv"
        teams = "data/teams.csv"
        games = "data/games.csv"
        opponents = "data/opponents.csv"
    "#;

    #[test]
    fn valid_config_parses() {
        let config = parse(VALID).unwrap();
        assert_eq!(config.lineup.salary_cap, 60_000_000);
        assert_eq!(config.lineup.slots, 5);
        assert_eq!(config.simulation.iterations, 2000);
        assert_eq!(config.data.opponents, "data/opponents.csv");
    }

    #[test]
    fn positional_counts_must_sum_to_slots() {
        let bad = VALID.replace("centers = 1", "centers = 2");
        let err = parse(&bad).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn zero_salary_cap_rejected() {
        let bad = VALID.replace("salary_cap = 60000000", "salary_cap = 0");
        let err = parse(&bad).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn negative_min_minutes_rejected() {
        let bad = VALID.replace("min_minutes = 12.0", "min_minutes = -1.0");
        let err = parse(&bad).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }
}

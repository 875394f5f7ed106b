// Player table loading.
//
// Reads a headered CSV with one row per player and the derived columns
// already computed (points per game, standardised points per cost, bonus
// points score, playing-time estimate). Extra columns are ignored.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::player::{PlayerRecord, PlayerTable, Position};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    full_name: String,
    position: String,
    now_cost: f64,
    points_per_game: f64,
    #[serde(alias = "points_per_cost_std")]
    points_per_pound_std: f64,
    #[serde(alias = "bonus_points")]
    bps: f64,
    #[serde(alias = "game_time_estimate")]
    game_guess: f64,
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut seen = HashSet::new();
    let mut players = Vec::new();
    for result in reader.deserialize::<RawPlayerRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
                continue;
            }
        };
        let name = raw.full_name.trim().to_string();
        let Some(position) = Position::from_str_pos(&raw.position) else {
            warn!("skipping player '{}': unknown position '{}'", name, raw.position);
            continue;
        };
        if !all_finite(&[
            raw.now_cost,
            raw.points_per_game,
            raw.points_per_pound_std,
            raw.bps,
            raw.game_guess,
        ]) {
            warn!("skipping player '{}': non-finite numeric value", name);
            continue;
        }
        if !seen.insert(name.clone()) {
            warn!("duplicate row for '{}', keeping the first", name);
            continue;
        }
        players.push(PlayerRecord {
            full_name: name,
            position,
            now_cost: raw.now_cost,
            points_per_game: raw.points_per_game,
            points_per_cost_std: raw.points_per_pound_std,
            bonus_points: raw.bps,
            game_time_estimate: raw.game_guess,
        });
    }
    Ok(players)
}

/// Build a player table from any CSV reader.
pub fn load_table_from_reader<R: Read>(rdr: R) -> Result<PlayerTable, ProjectionError> {
    let players = load_players_from_reader(rdr).map_err(|e| ProjectionError::Csv {
        path: "<reader>".into(),
        source: e,
    })?;
    into_table(players)
}

/// Load the player table from a CSV file.
pub fn load_table(path: &Path) -> Result<PlayerTable, ProjectionError> {
    let file = std::fs::File::open(path).map_err(|e| ProjectionError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_players_from_reader(file).map_err(|e| ProjectionError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    into_table(players)
}

fn into_table(players: Vec<PlayerRecord>) -> Result<PlayerTable, ProjectionError> {
    if players.is_empty() {
        return Err(ProjectionError::Validation(
            "player CSV produced zero valid rows".into(),
        ));
    }
    // Names were de-duplicated while reading.
    PlayerTable::new(players).map_err(|e| ProjectionError::Validation(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

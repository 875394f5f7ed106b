// Transfer suggestions: same-position replacements within budget.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::error::SelectionError;
use crate::player::{PlayerRecord, PlayerTable, Position};
use crate::selection::select::Metric;

/// Inputs for `suggest_transfers` beyond the player and table.
#[derive(Debug, Clone)]
pub struct TransferQuery<'a> {
    /// Owned squad (or current starters); these are not offered as targets,
    /// except the outgoing player.
    pub current_starters: &'a [String],
    /// Money in the bank on top of the outgoing player's price.
    pub extra_budget: f64,
    pub result_count: usize,
    /// Minimum playing-time estimate as a fraction of the pool maximum.
    pub min_play_fraction: f64,
}

/// One row of a suggestion table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferCandidate {
    pub full_name: String,
    pub position: Position,
    pub now_cost: f64,
    pub points_per_cost_std: f64,
    pub points_per_game: f64,
    pub game_time_estimate: f64,
    pub bonus_points: f64,
}

impl From<&PlayerRecord> for TransferCandidate {
    fn from(p: &PlayerRecord) -> Self {
        TransferCandidate {
            full_name: p.full_name.clone(),
            position: p.position,
            now_cost: p.now_cost,
            points_per_cost_std: p.points_per_cost_std,
            points_per_game: p.points_per_game,
            game_time_estimate: p.game_time_estimate,
            bonus_points: p.bonus_points,
        }
    }
}

/// Two rankings of the same candidate set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferOptions {
    /// Sorted by standardised points per cost, descending.
    pub efficient: Vec<TransferCandidate>,
    /// Sorted by points per game, descending.
    pub points: Vec<TransferCandidate>,
    pub move_budget: f64,
}

fn sort_desc(players: &mut [&PlayerRecord], metric: Metric) {
    players.sort_by(|a, b| {
        metric
            .value(b)
            .partial_cmp(&metric.value(a))
            .unwrap_or(Ordering::Equal)
    });
}

/// Top `count` of `candidates` by `metric`, plus the outgoing player, sorted
/// by `metric` descending.
fn ranked_view(
    candidates: &[&PlayerRecord],
    outgoing: &PlayerRecord,
    metric: Metric,
    count: usize,
) -> Vec<TransferCandidate> {
    let mut sorted = candidates.to_vec();
    sort_desc(&mut sorted, metric);
    sorted.truncate(count);
    if !sorted.iter().any(|p| p.full_name == outgoing.full_name) {
        sorted.push(outgoing);
        sort_desc(&mut sorted, metric);
    }
    sorted.into_iter().map(TransferCandidate::from).collect()
}

/// Rank same-position replacements for `player_name` that fit within the
/// player's price plus `extra_budget`.
pub fn suggest_transfers(
    player_name: &str,
    table: &PlayerTable,
    query: &TransferQuery<'_>,
) -> Result<TransferOptions, SelectionError> {
    let outgoing = table.require(player_name)?;
    let move_budget = outgoing.now_cost + query.extra_budget;

    // The outgoing player stays a valid target even when owned.
    let excluded: Vec<&str> = query
        .current_starters
        .iter()
        .map(String::as_str)
        .filter(|n| *n != player_name)
        .collect();

    let candidates: Vec<&PlayerRecord> = table
        .playing_pool(query.min_play_fraction)
        .into_iter()
        .filter(|p| !excluded.contains(&p.full_name.as_str()))
        .filter(|p| p.position == outgoing.position && p.now_cost <= move_budget)
        .collect();
    debug!(
        player = player_name,
        move_budget,
        candidates = candidates.len(),
        "transfer candidates filtered"
    );

    Ok(TransferOptions {
        efficient: ranked_view(
            &candidates,
            outgoing,
            Metric::PointsPerCost,
            query.result_count,
        ),
        points: ranked_view(
            &candidates,
            outgoing,
            Metric::PointsPerGame,
            query.result_count,
        ),
        move_budget,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::test_support::player;

    fn table() -> PlayerTable {
        use Position::*;
        let mut benchwarmer = player("Benchwarmer", Midfielder, 4.5, 9.0);
        benchwarmer.game_time_estimate = 0.1;
        PlayerTable::new(vec![
            player("X", Midfielder, 6.0, 4.0),
            player("Cheap", Midfielder, 4.5, 3.6),
            player("Value", Midfielder, 5.0, 5.0),
            player("Pricey", Midfielder, 6.5, 7.0),
            player("Owned", Midfielder, 5.5, 6.0),
            player("Equal", Midfielder, 6.0, 5.4),
            player("Defender", Defender, 4.5, 5.0),
            benchwarmer,
        ])
        .unwrap()
    }

    fn names(rows: &[TransferCandidate]) -> Vec<&str> {
        rows.iter().map(|r| r.full_name.as_str()).collect()
    }

    #[test]
    fn same_position_within_budget_excluding_owned() {
        let table = table();
        let owned = vec!["X".to_string(), "Owned".to_string()];
        let query = TransferQuery {
            current_starters: &owned,
            extra_budget: 0.0,
            result_count: 5,
            min_play_fraction: 0.25,
        };
        let options = suggest_transfers("X", &table, &query).unwrap();

        // ppc: Value 1.0, Equal 0.9, Cheap 0.8, X 0.667
        assert_eq!(names(&options.efficient), vec!["Value", "Equal", "Cheap", "X"]);
        // ppg: Equal 5.4, Value 5.0, X 4.0, Cheap 3.6
        assert_eq!(names(&options.points), vec!["Equal", "Value", "X", "Cheap"]);
        assert!((options.move_budget - 6.0).abs() < 1e-9);
        for row in options.efficient.iter().chain(options.points.iter()) {
            assert_eq!(row.position, Position::Midfielder);
            assert!(row.now_cost <= 6.0);
        }
    }

    #[test]
    fn extra_budget_widens_the_pool() {
        let table = table();
        let query = TransferQuery {
            current_starters: &[],
            extra_budget: 0.5,
            result_count: 1,
            min_play_fraction: 0.25,
        };
        let options = suggest_transfers("X", &table, &query).unwrap();
        assert_eq!(names(&options.points), vec!["Pricey", "X"]);
        assert_eq!(names(&options.efficient), vec!["Owned", "X"]);
    }

    #[test]
    fn truncation_keeps_outgoing_player() {
        let table = table();
        let query = TransferQuery {
            current_starters: &[],
            extra_budget: 0.0,
            result_count: 2,
            min_play_fraction: 0.25,
        };
        let options = suggest_transfers("X", &table, &query).unwrap();
        assert_eq!(names(&options.efficient), vec!["Owned", "Value", "X"]);
        assert_eq!(names(&options.points), vec!["Owned", "Equal", "X"]);
    }

    #[test]
    fn low_play_time_players_filtered() {
        let table = table();
        let query = TransferQuery {
            current_starters: &[],
            extra_budget: 0.0,
            result_count: 10,
            min_play_fraction: 0.25,
        };
        let options = suggest_transfers("X", &table, &query).unwrap();
        assert!(!names(&options.points).contains(&"Benchwarmer"));
    }

    #[test]
    fn unknown_player_is_rejected() {
        let table = table();
        let query = TransferQuery {
            current_starters: &[],
            extra_budget: 0.0,
            result_count: 5,
            min_play_fraction: 0.25,
        };
        let err = suggest_transfers("Ghost", &table, &query).unwrap_err();
        assert_eq!(
            err,
            SelectionError::InvalidPlayerReference {
                name: "Ghost".into()
            }
        );
    }
}

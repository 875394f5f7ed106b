// Starting lineup selection from an owned squad.
//
// Slots are filled in a fixed order: one goalkeeper, one forward, three
// midfielders, then the best remaining outfield players until eleven are
// picked. Each phase excludes everyone already chosen.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::SelectionError;
use crate::player::{PlayerRecord, PlayerTable, Position, OUTFIELD};
use crate::selection::captain::{pick_captain, pick_vice_captain};
use crate::selection::round1;
use crate::selection::select::{retain_max, Metric};

pub const LINEUP_SIZE: usize = 11;

/// Positional phases run before the free outfield fill.
const LINEUP_PHASES: [(&[Position], usize); 3] = [
    (&[Position::Goalkeeper], 1),
    (&[Position::Forward], 1),
    (&[Position::Midfielder], 3),
];

/// Result of `build_lineup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lineup {
    /// Starters in pick order.
    pub starters: Vec<String>,
    /// Squad members left out, in table order.
    pub bench: Vec<String>,
    pub summary: LineupSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupSummary {
    /// Lineup points plus the captain's extra share, to one decimal.
    pub projected_points: f64,
    pub captain: String,
    /// The captain's doubled points-per-game.
    pub captain_points: f64,
    pub vice_captain: String,
    pub bench_points: f64,
}

/// Pick `count` starters from `squad`, restricted to `positions` and skipping
/// anyone in `excluded`.
///
/// Candidates are taken by points-per-game. When more players share the top
/// mark than there are slots left, the dearer ones are kept; if that still
/// overflows the slots, a random subset of the needed size is drawn.
pub fn pick_starters<R: Rng + ?Sized>(
    squad: &[&PlayerRecord],
    excluded: &[String],
    positions: &[Position],
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, SelectionError> {
    let mut pool: Vec<&PlayerRecord> = squad
        .iter()
        .copied()
        .filter(|p| positions.contains(&p.position) && !excluded.contains(&p.full_name))
        .collect();

    if pool.len() < count {
        return Err(SelectionError::InsufficientSquadSize {
            needed: count,
            available: pool.len(),
        });
    }

    let mut starters = Vec::with_capacity(count);
    while starters.len() < count {
        let remaining = count - starters.len();
        let mut tied = retain_max(&pool, Metric::PointsPerGame);
        if tied.is_empty() {
            // Only unrankable (NaN) ratings left.
            return Err(SelectionError::InsufficientSquadSize {
                needed: count,
                available: starters.len(),
            });
        }
        if tied.len() > remaining {
            tied = retain_max(&tied, Metric::Cost);
        }
        if tied.len() > remaining {
            tied = tied.choose_multiple(rng, remaining).copied().collect();
        }
        pool.retain(|p| !tied.iter().any(|t| t.full_name == p.full_name));
        starters.extend(tied.iter().map(|p| p.full_name.clone()));
    }
    Ok(starters)
}

/// Choose eleven starters, a captain and a vice-captain from `squad`.
pub fn build_lineup<R: Rng + ?Sized>(
    squad: &[String],
    table: &PlayerTable,
    rng: &mut R,
) -> Result<Lineup, SelectionError> {
    let team = table.records_named(squad)?;
    if team.len() < LINEUP_SIZE {
        return Err(SelectionError::InsufficientSquadSize {
            needed: LINEUP_SIZE,
            available: team.len(),
        });
    }

    let mut starters: Vec<String> = Vec::with_capacity(LINEUP_SIZE);
    for (positions, count) in LINEUP_PHASES {
        let picked = pick_starters(&team, &starters, positions, count, rng)?;
        starters.extend(picked);
    }
    while starters.len() < LINEUP_SIZE {
        let picked = pick_starters(&team, &starters, &OUTFIELD, 1, rng).map_err(|_| {
            SelectionError::InsufficientSquadSize {
                needed: LINEUP_SIZE,
                available: starters.len(),
            }
        })?;
        starters.extend(picked);
    }
    debug!(?starters, "lineup filled");

    let (lineup, bench): (Vec<&PlayerRecord>, Vec<&PlayerRecord>) = team
        .iter()
        .copied()
        .partition(|p| starters.contains(&p.full_name));

    let team_points: f64 = lineup.iter().map(|p| p.points_per_game).sum();
    let bench_points: f64 = bench.iter().map(|p| p.points_per_game).sum();

    let captain = pick_captain(&lineup)?;
    let vice = pick_vice_captain(&lineup, &captain.name)?;

    Ok(Lineup {
        starters,
        bench: bench.iter().map(|p| p.full_name.clone()).collect(),
        summary: LineupSummary {
            projected_points: round1(team_points + captain.doubled_points / 2.0),
            captain: captain.name,
            captain_points: captain.doubled_points,
            vice_captain: vice.name,
            bench_points: round1(bench_points),
        },
    })
}

// Captain and vice-captain choice from a finished lineup.

use serde::Serialize;

use crate::error::SelectionError;
use crate::player::PlayerRecord;
use crate::selection::select::{best_candidates, CAPTAIN};

/// A captaincy pick with its doubled points-per-game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Captaincy {
    pub name: String,
    pub doubled_points: f64,
}

/// Highest points-per-game player in the lineup, dearer player on a tie,
/// then the first in lineup order.
pub fn pick_captain(lineup: &[&PlayerRecord]) -> Result<Captaincy, SelectionError> {
    let tied = best_candidates(lineup, &CAPTAIN)?;
    let captain = tied.first().ok_or(SelectionError::EmptyCandidateSet {
        ranking: CAPTAIN.name,
    })?;
    Ok(Captaincy {
        name: captain.full_name.clone(),
        doubled_points: 2.0 * captain.points_per_game,
    })
}

/// Same ranking as the captain, over the lineup without the captain.
pub fn pick_vice_captain(
    lineup: &[&PlayerRecord],
    captain: &str,
) -> Result<Captaincy, SelectionError> {
    let rest: Vec<&PlayerRecord> = lineup
        .iter()
        .copied()
        .filter(|p| p.full_name != captain)
        .collect();
    pick_captain(&rest)
}

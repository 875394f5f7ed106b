// Best-candidate selection with tie-break chains.
//
// Every pick in the toolkit narrows a candidate set to the records holding
// the maximum of a primary field, then of each tie-break field in turn, and
// finally resolves whatever tie remains with a named policy.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SelectionError;
use crate::player::PlayerRecord;

/// A numeric column a ranking can maximise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    PointsPerGame,
    PointsPerCost,
    BonusPoints,
    Cost,
}

impl Metric {
    pub fn value(&self, p: &PlayerRecord) -> f64 {
        match self {
            Metric::PointsPerGame => p.points_per_game,
            Metric::PointsPerCost => p.points_per_cost_std,
            Metric::BonusPoints => p.bonus_points,
            Metric::Cost => p.now_cost,
        }
    }
}

/// How to resolve a tie that survives the whole tie-break chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalTieBreak {
    /// Sample uniformly from the tied records.
    Random,
    /// Take the tied record that comes first in candidate order.
    First,
}

/// A fixed ranking: primary field, ordered tie-breaks, final policy.
#[derive(Debug, Clone, Copy)]
pub struct Ranking {
    pub name: &'static str,
    pub primary: Metric,
    pub tie_breaks: &'static [Metric],
    pub final_tie_break: FinalTieBreak,
}

/// Captain-candidate ranking used by the drafter's star pick.
pub const STAR: Ranking = Ranking {
    name: "star",
    primary: Metric::PointsPerGame,
    tie_breaks: &[Metric::BonusPoints, Metric::Cost],
    final_tie_break: FinalTieBreak::Random,
};

pub const EFFICIENT: Ranking = Ranking {
    name: "efficient",
    primary: Metric::PointsPerCost,
    tie_breaks: &[Metric::BonusPoints, Metric::Cost],
    final_tie_break: FinalTieBreak::Random,
};

pub const POINTS: Ranking = Ranking {
    name: "points",
    primary: Metric::PointsPerGame,
    tie_breaks: &[Metric::BonusPoints, Metric::Cost],
    final_tie_break: FinalTieBreak::Random,
};

pub const CAPTAIN: Ranking = Ranking {
    name: "captain",
    primary: Metric::PointsPerGame,
    tie_breaks: &[Metric::Cost],
    final_tie_break: FinalTieBreak::First,
};

/// Keep only the records holding the maximum of `metric`.
pub fn retain_max<'a>(candidates: &[&'a PlayerRecord], metric: Metric) -> Vec<&'a PlayerRecord> {
    let best = candidates
        .iter()
        .map(|p| metric.value(p))
        .fold(f64::NEG_INFINITY, f64::max);
    candidates
        .iter()
        .copied()
        .filter(|p| metric.value(p) == best)
        .collect()
}

/// Narrow `candidates` through the ranking's primary field and tie-break
/// chain, stopping as soon as a single record remains. For finite values the
/// returned set is never empty; it preserves candidate order.
pub fn best_candidates<'a>(
    candidates: &[&'a PlayerRecord],
    ranking: &Ranking,
) -> Result<Vec<&'a PlayerRecord>, SelectionError> {
    if candidates.is_empty() {
        return Err(SelectionError::EmptyCandidateSet {
            ranking: ranking.name,
        });
    }
    let mut tied = retain_max(candidates, ranking.primary);
    for &metric in ranking.tie_breaks {
        if tied.len() <= 1 {
            break;
        }
        tied = retain_max(&tied, metric);
    }
    Ok(tied)
}

/// Pick exactly one record under `ranking`.
pub fn select_best<'a, R: Rng + ?Sized>(
    candidates: &[&'a PlayerRecord],
    ranking: &Ranking,
    rng: &mut R,
) -> Result<&'a PlayerRecord, SelectionError> {
    let tied = best_candidates(candidates, ranking)?;
    let picked = match ranking.final_tie_break {
        FinalTieBreak::First => tied.first(),
        FinalTieBreak::Random => tied.choose(rng),
    };
    picked.copied().ok_or(SelectionError::EmptyCandidateSet {
        ranking: ranking.name,
    })
}

// Plus-star sweep: draft one squad per plus-star count and compare the
// projected lineup scores.

use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::SelectionError;
use crate::player::PlayerTable;
use crate::selection::drafter::{draft_squad, DraftParams, DraftedSquad, MAX_PLUS_STARS};
use crate::selection::lineup::{build_lineup, LineupSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlusStarVariant {
    pub plus_stars: usize,
    pub squad: DraftedSquad,
    pub lineup: LineupSummary,
}

/// Draft with every plus-star count from 0 to `max_plus_stars` (capped at
/// `MAX_PLUS_STARS`) and score each squad's best lineup.
///
/// Counts that cannot be drafted within budget are skipped. If none can be,
/// the last error is returned.
pub fn sweep_plus_stars<R: Rng + ?Sized>(
    table: &PlayerTable,
    base: &DraftParams,
    max_plus_stars: usize,
    rng: &mut R,
) -> Result<Vec<PlusStarVariant>, SelectionError> {
    let mut variants = Vec::new();
    let mut last_err = None;

    for plus_stars in 0..=max_plus_stars.min(MAX_PLUS_STARS) {
        let params = DraftParams {
            plus_stars,
            ..base.clone()
        };
        let outcome = match draft_squad(table, &params, rng) {
            Ok(squad) => build_lineup(&squad.players, table, rng).map(|lineup| (squad, lineup)),
            Err(e) => Err(e),
        };
        match outcome {
            Ok((squad, lineup)) => {
                info!(
                    plus_stars,
                    projected = lineup.summary.projected_points,
                    "sweep variant scored"
                );
                variants.push(PlusStarVariant {
                    plus_stars,
                    squad,
                    lineup: lineup.summary,
                });
            }
            Err(e) => {
                warn!(plus_stars, error = %e, "sweep variant skipped");
                last_err = Some(e);
            }
        }
    }

    match (variants.is_empty(), last_err) {
        (true, Some(e)) => Err(e),
        _ => Ok(variants),
    }
}

/// The variant with the highest projected score; the fewest plus stars wins
/// a tie.
pub fn best_variant(variants: &[PlusStarVariant]) -> Option<&PlusStarVariant> {
    variants.iter().fold(None, |best, v| match best {
        Some(b) if b.lineup.projected_points >= v.lineup.projected_points => Some(b),
        _ => Some(v),
    })
}

// Selection engine: best-pick primitive, lineup, captaincy, transfers,
// squad drafting.

pub mod captain;
pub mod drafter;
pub mod lineup;
pub mod select;
pub mod sweep;
pub mod transfers;

pub use captain::{pick_captain, pick_vice_captain, Captaincy};
pub use drafter::{draft_squad, DraftParams, DraftedSquad, FormationQuota};
pub use lineup::{build_lineup, pick_starters, Lineup, LineupSummary};
pub use select::{select_best, FinalTieBreak, Metric, Ranking};
pub use sweep::{best_variant, sweep_plus_stars, PlusStarVariant};
pub use transfers::{suggest_transfers, TransferCandidate, TransferOptions, TransferQuery};

/// Round to one decimal place.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

// Greedy squad drafting under budget and formation constraints.
//
// Budget handling:
//   The bench gets a fixed sub-budget; the rest funds the starters.
//   Every starter pick leaves `save_per_starter` behind for each starter slot
//   still open after it (plus stars included), and every bench pick leaves
//   `BENCH_SLOT_RESERVE` per bench slot still open, so an early pick can
//   never starve a mandatory later one.
//
// Pick order:
//   1. a star (cost above `STAR_MIN_COST`, best points per game), the
//      intended captain
//   2. a starting keeper, unless the star is one
//   3. cost-efficient outfield starters
//   4. a cheap backup keeper
//   5. three cost-efficient outfield bench players
//   6. "plus stars": whatever money is left goes on points per game

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::SelectionError;
use crate::player::{PlayerRecord, PlayerTable, Position, OUTFIELD};
use crate::selection::lineup::LINEUP_SIZE;
use crate::selection::round1;
use crate::selection::select::{select_best, Ranking, EFFICIENT, POINTS, STAR};

pub const SQUAD_SIZE: usize = 15;
pub const MAX_PLUS_STARS: usize = 9;
/// Only players strictly dearer than this are considered for the star pick.
pub const STAR_MIN_COST: f64 = 8.0;
/// Money held back for each bench outfield slot still to fill.
pub const BENCH_SLOT_RESERVE: f64 = 4.5;
const BENCH_OUTFIELD_SLOTS: usize = 3;
/// The backup keeper's ceiling is the dearest of this many cheapest keepers.
const BACKUP_KEEPER_SHORTLIST: usize = 5;

/// Drafting knobs. Costs use the same unit as `PlayerRecord::now_cost`.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftParams {
    pub save_per_starter: f64,
    pub plus_stars: usize,
    pub budget: f64,
    pub bench_budget: f64,
    /// Minimum playing-time estimate as a fraction of the pool maximum.
    pub min_play_fraction: f64,
}

impl Default for DraftParams {
    fn default() -> Self {
        DraftParams {
            save_per_starter: 5.0,
            plus_stars: 2,
            budget: 100.0,
            bench_budget: 19.0,
            min_play_fraction: 0.25,
        }
    }
}

impl DraftParams {
    /// Plus stars actually used: at most `MAX_PLUS_STARS`.
    pub fn clamped_plus_stars(&self) -> usize {
        self.plus_stars.min(MAX_PLUS_STARS)
    }
}

/// Remaining required players per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormationQuota {
    pub goalkeepers: usize,
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

impl FormationQuota {
    /// A full fifteen-man squad.
    pub const SQUAD: FormationQuota = FormationQuota {
        goalkeepers: 2,
        defenders: 5,
        midfielders: 5,
        forwards: 3,
    };

    pub fn remaining(&self, position: Position) -> usize {
        match position {
            Position::Goalkeeper => self.goalkeepers,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }

    /// Consume one slot for `position`.
    pub fn fill(&mut self, position: Position) -> Result<(), SelectionError> {
        let slot = match position {
            Position::Goalkeeper => &mut self.goalkeepers,
            Position::Defender => &mut self.defenders,
            Position::Midfielder => &mut self.midfielders,
            Position::Forward => &mut self.forwards,
        };
        *slot = slot
            .checked_sub(1)
            .ok_or(SelectionError::QuotaExhausted { position })?;
        Ok(())
    }

    pub fn total(&self) -> usize {
        self.goalkeepers + self.defenders + self.midfielders + self.forwards
    }
}

/// Result of `draft_squad`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftedSquad {
    /// Names in pick order.
    pub players: Vec<String>,
    /// Money left after the plus-star phase, to one decimal.
    pub remaining_budget: f64,
    /// Summed price of the fifteen players, to one decimal.
    pub total_cost: f64,
    pub plus_stars: usize,
}

/// Working state for one drafting run.
struct Drafter<'a> {
    pool: Vec<&'a PlayerRecord>,
    picked: Vec<&'a PlayerRecord>,
    quota: FormationQuota,
    eligible: Vec<Position>,
}

impl<'a> Drafter<'a> {
    fn new(pool: Vec<&'a PlayerRecord>) -> Self {
        Drafter {
            pool,
            picked: Vec::with_capacity(SQUAD_SIZE),
            quota: FormationQuota::SQUAD,
            eligible: OUTFIELD.to_vec(),
        }
    }

    fn is_picked(&self, player: &PlayerRecord) -> bool {
        self.picked.iter().any(|p| p.full_name == player.full_name)
    }

    /// Undrafted pool players at `positions` costing at most `ceiling`.
    fn candidates(&self, positions: &[Position], ceiling: f64) -> Vec<&'a PlayerRecord> {
        self.pool
            .iter()
            .copied()
            .filter(|p| positions.contains(&p.position))
            .filter(|p| p.now_cost <= ceiling && !self.is_picked(p))
            .collect()
    }

    /// Record a pick and return its cost.
    fn take(&mut self, player: &'a PlayerRecord, phase: &str) -> Result<f64, SelectionError> {
        self.quota.fill(player.position)?;
        self.picked.push(player);
        debug!(
            phase,
            player = %player.full_name,
            position = %player.position,
            cost = player.now_cost,
            "drafted"
        );
        Ok(player.now_cost)
    }

    fn pick<R: Rng + ?Sized>(
        &mut self,
        positions: &[Position],
        ceiling: f64,
        ranking: &Ranking,
        rng: &mut R,
        phase: &str,
    ) -> Result<f64, SelectionError> {
        let candidates = self.candidates(positions, ceiling);
        let player = select_best(&candidates, ranking, rng).inspect_err(|_| {
            warn!(phase, ceiling, ?positions, "no affordable candidate");
        })?;
        self.take(player, phase)
    }

    fn pick_eligible<R: Rng + ?Sized>(
        &mut self,
        ceiling: f64,
        ranking: &Ranking,
        rng: &mut R,
        phase: &str,
    ) -> Result<f64, SelectionError> {
        let quota = self.quota;
        self.eligible.retain(|&pos| quota.remaining(pos) > 0);
        let eligible = self.eligible.clone();
        self.pick(&eligible, ceiling, ranking, rng, phase)
    }

    /// When the midfield is full and one forward slot remains (or the other
    /// way round), take that position out of the starter phase so its last
    /// slot goes to the bench. Returns the held-back position.
    fn hold_back_last_slot(&mut self) -> Option<Position> {
        let held = match (self.quota.forwards, self.quota.midfielders) {
            (1, 0) => Position::Forward,
            (0, 1) => Position::Midfielder,
            _ => return None,
        };
        self.eligible.retain(|&pos| pos != held);
        Some(held)
    }
}

/// The star pick: best points-per-game among players dearer than
/// `STAR_MIN_COST`.
pub fn pick_star<'a, R: Rng + ?Sized>(
    pool: &[&'a PlayerRecord],
    rng: &mut R,
) -> Result<&'a PlayerRecord, SelectionError> {
    let stars: Vec<&PlayerRecord> = pool
        .iter()
        .copied()
        .filter(|p| p.now_cost > STAR_MIN_COST)
        .collect();
    select_best(&stars, &STAR, rng)
}

/// Draft a fifteen-man squad from `table`.
pub fn draft_squad<R: Rng + ?Sized>(
    table: &PlayerTable,
    params: &DraftParams,
    rng: &mut R,
) -> Result<DraftedSquad, SelectionError> {
    let plus_stars = params.clamped_plus_stars();
    if plus_stars != params.plus_stars {
        warn!(
            requested = params.plus_stars,
            used = plus_stars,
            "plus stars clamped"
        );
    }
    let save = params.save_per_starter;
    let mut starter_budget = params.budget - params.bench_budget;
    let mut bench_budget = params.bench_budget;

    let pool = table.playing_pool(params.min_play_fraction);
    if pool.len() < SQUAD_SIZE {
        return Err(SelectionError::InsufficientSquadSize {
            needed: SQUAD_SIZE,
            available: pool.len(),
        });
    }
    let mut d = Drafter::new(pool);

    // 1. Star
    let star = pick_star(&d.pool, rng)?;
    starter_budget -= d.take(star, "star")?;

    // 2. Starting keeper, reserving for the nine starters after it.
    if d.quota.goalkeepers == FormationQuota::SQUAD.goalkeepers {
        let ceiling = starter_budget - save * (LINEUP_SIZE - 2) as f64;
        starter_budget -= d.pick(
            &[Position::Goalkeeper],
            ceiling,
            &EFFICIENT,
            rng,
            "starting keeper",
        )?;
    }

    // 3. Outfield starters
    let starter_target = LINEUP_SIZE - plus_stars;
    let mut held_back: Option<Position> = None;
    while d.picked.len() < starter_target {
        let open_after = LINEUP_SIZE - 1 - d.picked.len();
        let ceiling = starter_budget - save * open_after as f64;
        starter_budget -= d.pick_eligible(ceiling, &EFFICIENT, rng, "starter")?;
        if d.picked.len() < starter_target - 1 {
            if let Some(pos) = d.hold_back_last_slot() {
                held_back = Some(pos);
            }
        }
    }
    if let Some(pos) = held_back {
        if !d.eligible.contains(&pos) {
            d.eligible.push(pos);
        }
    }
    info!(
        picked = d.picked.len(),
        starter_budget, "starter phase complete"
    );

    // 4. Backup keeper
    let mut keepers = d.candidates(&[Position::Goalkeeper], f64::INFINITY);
    keepers.sort_by(|a, b| a.now_cost.total_cmp(&b.now_cost));
    let backup_ceiling = keepers
        .iter()
        .take(BACKUP_KEEPER_SHORTLIST)
        .map(|p| p.now_cost)
        .fold(f64::NEG_INFINITY, f64::max);
    bench_budget -= d.pick(
        &[Position::Goalkeeper],
        backup_ceiling,
        &EFFICIENT,
        rng,
        "backup keeper",
    )?;

    // 5. Bench outfield
    for open_after in (0..BENCH_OUTFIELD_SLOTS).rev() {
        let ceiling = bench_budget - BENCH_SLOT_RESERVE * open_after as f64;
        bench_budget -= d.pick_eligible(ceiling, &EFFICIENT, rng, "bench")?;
    }
    info!(picked = d.picked.len(), bench_budget, "bench phase complete");

    // 6. Plus stars
    let mut remaining = starter_budget + bench_budget + backup_ceiling;
    for open_after in (0..plus_stars).rev() {
        let ceiling = remaining - save * open_after as f64;
        remaining -= d.pick_eligible(ceiling, &POINTS, rng, "plus star")?;
    }

    if d.picked.len() != SQUAD_SIZE || d.quota.total() != 0 {
        return Err(SelectionError::InsufficientSquadSize {
            needed: SQUAD_SIZE,
            available: d.picked.len(),
        });
    }

    let total_cost: f64 = d.picked.iter().map(|p| p.now_cost).sum();
    info!(total_cost, remaining, plus_stars, "squad drafted");
    Ok(DraftedSquad {
        players: d.picked.iter().map(|p| p.full_name.clone()).collect(),
        remaining_budget: round1(remaining),
        total_cost: round1(total_cost),
        plus_stars,
    })
}

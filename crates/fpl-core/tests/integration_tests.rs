// Integration tests for the selection toolkit.
//
// These load the fixture player table from CSV and run the public
// operations end to end: drafting a squad, picking its lineup and captain,
// and asking for transfer suggestions against it.

use std::collections::HashSet;
use std::path::PathBuf;

use fpl_core::projections::load_table;
use fpl_core::selection::{
    best_variant, build_lineup, draft_squad, suggest_transfers, sweep_plus_stars, DraftParams,
    TransferQuery,
};
use fpl_core::{PlayerTable, Position, SelectionError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixture_table() -> PlayerTable {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/players.csv");
    load_table(&path).expect("fixture CSV should load")
}

fn position_counts(table: &PlayerTable, names: &[String]) -> [usize; 4] {
    let mut counts = [0; 4];
    for name in names {
        let p = table.get(name).expect("drafted player should be in table");
        counts[(p.position.code() - 1) as usize] += 1;
    }
    counts
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn fixture_loads_and_skips_bad_rows() {
    let table = fixture_table();
    // 52 generated players, three named ones, one malformed row dropped.
    assert_eq!(table.len(), 55);
    assert!(table.get("Broken Row").is_none());
    assert_eq!(
        table.get("Star Midfielder").map(|p| p.position),
        Some(Position::Midfielder)
    );
}

// ===========================================================================
// Draft -> lineup -> transfers
// ===========================================================================

#[test]
fn draft_then_pick_lineup() {
    let table = fixture_table();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    let squad = draft_squad(&table, &DraftParams::default(), &mut rng).unwrap();
    assert_eq!(squad.players.len(), 15);
    let unique: HashSet<&String> = squad.players.iter().collect();
    assert_eq!(unique.len(), 15);
    assert_eq!(position_counts(&table, &squad.players), [2, 5, 5, 3]);
    assert_eq!(squad.players[0], "Star Midfielder");
    assert!(!squad.players.contains(&"Crocked Winger".to_string()));

    let lineup = build_lineup(&squad.players, &table, &mut rng).unwrap();
    assert_eq!(lineup.starters.len(), 11);
    assert_eq!(lineup.bench.len(), 4);
    assert!(lineup.bench.iter().all(|b| !lineup.starters.contains(b)));
    let starter_counts = position_counts(&table, &lineup.starters);
    assert_eq!(starter_counts[0], 1);
    assert!(starter_counts[2] >= 3);
    assert!(starter_counts[3] >= 1);

    // The star has the best points per game in the squad.
    assert_eq!(lineup.summary.captain, "Star Midfielder");
    assert!((lineup.summary.captain_points - 18.0).abs() < 1e-9);
    assert_ne!(lineup.summary.vice_captain, lineup.summary.captain);
    assert!(lineup.starters.contains(&lineup.summary.vice_captain));
}

#[test]
fn drafting_is_reproducible_with_a_seed() {
    let table = fixture_table();
    let params = DraftParams {
        plus_stars: 4,
        ..DraftParams::default()
    };
    let a = draft_squad(&table, &params, &mut ChaCha8Rng::seed_from_u64(77)).unwrap();
    let b = draft_squad(&table, &params, &mut ChaCha8Rng::seed_from_u64(77)).unwrap();
    assert_eq!(a.players, b.players);
    assert_eq!(a.remaining_budget, b.remaining_budget);
}

#[test]
fn transfers_for_an_owned_midfielder() {
    let table = fixture_table();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let squad = draft_squad(&table, &DraftParams::default(), &mut rng).unwrap();

    let outgoing = squad
        .players
        .iter()
        .filter_map(|n| table.get(n))
        .find(|p| p.position == Position::Midfielder && p.full_name != "Star Midfielder")
        .expect("squad has a non-star midfielder")
        .clone();

    let query = TransferQuery {
        current_starters: &squad.players,
        extra_budget: 0.0,
        result_count: 5,
        min_play_fraction: 0.25,
    };
    let options = suggest_transfers(&outgoing.full_name, &table, &query).unwrap();

    for view in [&options.efficient, &options.points] {
        assert!(view.iter().any(|r| r.full_name == outgoing.full_name));
        assert!(view.len() <= 6);
        for row in view.iter() {
            assert_eq!(row.position, Position::Midfielder);
            assert!(row.now_cost <= outgoing.now_cost);
            assert!(row.full_name == outgoing.full_name || !squad.players.contains(&row.full_name));
        }
    }
    assert!(options
        .efficient
        .windows(2)
        .all(|w| w[0].points_per_cost_std >= w[1].points_per_cost_std));
    assert!(options
        .points
        .windows(2)
        .all(|w| w[0].points_per_game >= w[1].points_per_game));
}

#[test]
fn transfers_for_unknown_player() {
    let table = fixture_table();
    let query = TransferQuery {
        current_starters: &[],
        extra_budget: 1.0,
        result_count: 5,
        min_play_fraction: 0.25,
    };
    let err = suggest_transfers("Nobody", &table, &query).unwrap_err();
    assert!(matches!(err, SelectionError::InvalidPlayerReference { .. }));
}

#[test]
fn sweep_picks_a_best_variant() {
    let table = fixture_table();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let variants = sweep_plus_stars(&table, &DraftParams::default(), 4, &mut rng).unwrap();
    assert_eq!(variants.len(), 5);

    let best = best_variant(&variants).unwrap();
    assert!(variants
        .iter()
        .all(|v| v.lineup.projected_points <= best.lineup.projected_points));
}

// Plain-text rendering of selection results.

use fpl_core::selection::{
    best_variant, DraftedSquad, Lineup, PlusStarVariant, TransferCandidate, TransferOptions,
};
use fpl_core::PlayerTable;

pub fn render_lineup(lineup: &Lineup) -> String {
    let s = &lineup.summary;
    let mut out = String::new();
    out.push_str(&format!("Starters: {}\n", lineup.starters.join(", ")));
    out.push_str(&format!("Bench: {}\n", lineup.bench.join(", ")));
    out.push_str(&format!(
        "This squad is projected to score {:.1} points. The captain should be {}, \
         who is expected to score {:.1} points. The vice captain should be {}. \
         The bench is expected to score {:.1} points.\n",
        s.projected_points, s.captain, s.captain_points, s.vice_captain, s.bench_points
    ));
    out
}

fn candidate_table(title: &str, rows: &[TransferCandidate]) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&format!(
        "{:<28} {:>4} {:>6} {:>9} {:>6} {:>6} {:>6}\n",
        "Name", "Pos", "Cost", "Pts/Cost", "PPG", "Play", "BPS"
    ));
    if rows.is_empty() {
        out.push_str("  (no candidates)\n");
    }
    for r in rows {
        out.push_str(&format!(
            "{:<28} {:>4} {:>6.1} {:>9.3} {:>6.2} {:>6.1} {:>6.0}\n",
            r.full_name,
            r.position.display_str(),
            r.now_cost,
            r.points_per_cost_std,
            r.points_per_game,
            r.game_time_estimate,
            r.bonus_points
        ));
    }
    out
}

pub fn render_transfers(player: &str, options: &TransferOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Replacements for {player} (budget {:.1})\n\n",
        options.move_budget
    ));
    out.push_str(&candidate_table("Most efficient:", &options.efficient));
    out.push('\n');
    out.push_str(&candidate_table("Most points:", &options.points));
    out
}

pub fn render_draft(squad: &DraftedSquad, table: &PlayerTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<28} {:>4} {:>6}\n", "Player", "Pos", "Cost"));
    for name in &squad.players {
        match table.get(name) {
            Some(p) => {
                out.push_str(&format!(
                    "{:<28} {:>4} {:>6.1}\n",
                    name,
                    p.position.display_str(),
                    p.now_cost
                ));
            }
            None => {
                out.push_str(&format!("{name:<28}\n"));
            }
        }
    }
    out.push_str(&format!(
        "\nSquad cost {:.1}, budget remaining {:.1} ({} plus stars)\n",
        squad.total_cost, squad.remaining_budget, squad.plus_stars
    ));
    out
}

pub fn render_sweep(variants: &[PlusStarVariant]) -> String {
    let best = best_variant(variants).map(|v| v.plus_stars);
    let mut out = String::new();
    out.push_str(&format!(
        "{:>10} {:>10} {:>8} {:>10}  Captain\n",
        "PlusStars", "Projected", "Bench", "Remaining"
    ));
    for v in variants {
        let marker = if Some(v.plus_stars) == best { "*" } else { " " };
        out.push_str(&format!(
            "{:>9}{} {:>10.1} {:>8.1} {:>10.1}  {}\n",
            v.plus_stars,
            marker,
            v.lineup.projected_points,
            v.lineup.bench_points,
            v.squad.remaining_budget,
            v.lineup.captain
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpl_core::selection::LineupSummary;
    use fpl_core::{PlayerRecord, Position};

    fn summary() -> LineupSummary {
        LineupSummary {
            projected_points: 62.5,
            captain: "Salah".into(),
            captain_points: 16.0,
            vice_captain: "Haaland".into(),
            bench_points: 10.7,
        }
    }

    #[test]
    fn lineup_text_names_captain_and_bench() {
        let lineup = Lineup {
            starters: vec!["Salah".into(), "Haaland".into()],
            bench: vec!["Backup".into()],
            summary: summary(),
        };
        let text = render_lineup(&lineup);
        assert!(text.contains("Bench: Backup"));
        assert!(text.contains("projected to score 62.5 points"));
        assert!(text.contains("captain should be Salah"));
        assert!(text.contains("vice captain should be Haaland"));
    }

    #[test]
    fn transfer_tables_list_both_views() {
        let row = TransferCandidate {
            full_name: "Saka".into(),
            position: Position::Midfielder,
            now_cost: 9.0,
            points_per_cost_std: 1.1,
            points_per_game: 6.0,
            game_time_estimate: 32.0,
            bonus_points: 500.0,
        };
        let options = TransferOptions {
            efficient: vec![row.clone()],
            points: vec![],
            move_budget: 9.5,
        };
        let text = render_transfers("Saka", &options);
        assert!(text.contains("Replacements for Saka (budget 9.5)"));
        assert!(text.contains("Most efficient:"));
        assert!(text.contains("MID"));
        assert!(text.contains("(no candidates)"));
    }

    #[test]
    fn draft_lists_every_player_on_its_own_line() {
        let table = PlayerTable::new(vec![PlayerRecord {
            full_name: "Raya".into(),
            position: Position::Goalkeeper,
            now_cost: 5.5,
            points_per_game: 4.2,
            points_per_cost_std: 0.76,
            bonus_points: 300.0,
            game_time_estimate: 34.0,
        }])
        .unwrap();
        let squad = DraftedSquad {
            players: vec!["Raya".into(), "Unlisted".into()],
            remaining_budget: 1.5,
            total_cost: 98.5,
            plus_stars: 2,
        };
        let text = render_draft(&squad, &table);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("Raya"));
        assert!(lines[1].contains("GK"));
        assert!(lines[1].ends_with("5.5"));
        assert_eq!(lines[2].trim_end(), "Unlisted");
        assert!(text.ends_with("Squad cost 98.5, budget remaining 1.5 (2 plus stars)\n"));
    }

    #[test]
    fn sweep_marks_best_variant() {
        let variant = |plus_stars, projected| PlusStarVariant {
            plus_stars,
            squad: DraftedSquad {
                players: vec![],
                remaining_budget: 0.5,
                total_cost: 99.5,
                plus_stars,
            },
            lineup: LineupSummary {
                projected_points: projected,
                ..summary()
            },
        };
        let text = render_sweep(&[variant(0, 60.0), variant(1, 64.0)]);
        let best_line = text.lines().find(|l| l.contains('*')).unwrap();
        assert!(best_line.trim_start().starts_with("1*"));
    }
}

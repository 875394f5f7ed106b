// Player records and the read-only player table.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SelectionError, TableError};

/// Squad positions, numbered the way the league's player feed numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

/// Outfield positions, in feed order.
pub const OUTFIELD: [Position; 3] = [Position::Defender, Position::Midfielder, Position::Forward];

impl Position {
    /// Parse a position from a numeric feed code (1-4).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Position::Goalkeeper),
            2 => Some(Position::Defender),
            3 => Some(Position::Midfielder),
            4 => Some(Position::Forward),
            _ => None,
        }
    }

    /// Parse a position string.
    ///
    /// Accepts the numeric codes ("1".."4") as well as the usual
    /// abbreviations: "GK"/"GKP", "DEF", "MID", "FWD"/"FW".
    pub fn from_str_pos(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code);
        }
        match s.to_uppercase().as_str() {
            "GK" | "GKP" => Some(Position::Goalkeeper),
            "DEF" => Some(Position::Defender),
            "MID" => Some(Position::Midfielder),
            "FWD" | "FW" => Some(Position::Forward),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Position::Goalkeeper => 1,
            Position::Defender => 2,
            Position::Midfielder => 3,
            Position::Forward => 4,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

/// One row of the player table. All numeric columns are pre-computed by
/// whoever supplies the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub full_name: String,
    pub position: Position,
    pub now_cost: f64,
    pub points_per_game: f64,
    /// Standardised points per unit of cost.
    pub points_per_cost_std: f64,
    /// Bonus points score ("bps").
    pub bonus_points: f64,
    /// Likelihood of playing time ("game_guess").
    pub game_time_estimate: f64,
}

impl PlayerRecord {
    /// Name of the first numeric field that is NaN or infinite, if any.
    fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("now_cost", self.now_cost),
            ("points_per_game", self.points_per_game),
            ("points_per_cost_std", self.points_per_cost_std),
            ("bonus_points", self.bonus_points),
            ("game_time_estimate", self.game_time_estimate),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(field, _)| field)
    }
}

/// An ordered, immutable snapshot of player records keyed by name.
#[derive(Debug, Clone, Default)]
pub struct PlayerTable {
    players: Vec<PlayerRecord>,
    index: HashMap<String, usize>,
}

impl PlayerTable {
    /// Build a table, rejecting repeated names and non-finite numbers.
    pub fn new(players: Vec<PlayerRecord>) -> Result<Self, TableError> {
        let mut index = HashMap::with_capacity(players.len());
        for (i, p) in players.iter().enumerate() {
            if let Some(field) = p.non_finite_field() {
                return Err(TableError::NonFiniteValue {
                    name: p.full_name.clone(),
                    field,
                });
            }
            if index.insert(p.full_name.clone(), i).is_some() {
                return Err(TableError::DuplicatePlayer {
                    name: p.full_name.clone(),
                });
            }
        }
        Ok(PlayerTable { players, index })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter()
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.index.get(name).map(|&i| &self.players[i])
    }

    /// Look a player up, failing with `InvalidPlayerReference` if absent.
    pub fn require(&self, name: &str) -> Result<&PlayerRecord, SelectionError> {
        self.get(name)
            .ok_or_else(|| SelectionError::InvalidPlayerReference {
                name: name.to_string(),
            })
    }

    /// Largest `game_time_estimate` in the table, or 0.0 when empty.
    pub fn max_game_time(&self) -> f64 {
        self.players
            .iter()
            .map(|p| p.game_time_estimate)
            .fold(0.0, f64::max)
    }

    /// Players whose playing-time estimate is at least `min_fraction` of the
    /// table maximum, in table order.
    pub fn playing_pool(&self, min_fraction: f64) -> Vec<&PlayerRecord> {
        let threshold = min_fraction * self.max_game_time();
        self.players
            .iter()
            .filter(|p| p.game_time_estimate >= threshold)
            .collect()
    }

    /// Resolve a list of names to records, in table order. Repeated names
    /// collapse to one record; unknown names are an error.
    pub fn records_named(&self, names: &[String]) -> Result<Vec<&PlayerRecord>, SelectionError> {
        let mut wanted: HashSet<&str> = HashSet::with_capacity(names.len());
        for name in names {
            self.require(name)?;
            wanted.insert(name.as_str());
        }
        Ok(self
            .players
            .iter()
            .filter(|p| wanted.contains(p.full_name.as_str()))
            .collect())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::player;
    use super::*;

    #[test]
    fn position_from_code_and_abbreviation() {
        assert_eq!(Position::from_str_pos("1"), Some(Position::Goalkeeper));
        assert_eq!(Position::from_str_pos(" 4 "), Some(Position::Forward));
        assert_eq!(Position::from_str_pos("gkp"), Some(Position::Goalkeeper));
        assert_eq!(Position::from_str_pos("Def"), Some(Position::Defender));
        assert_eq!(Position::from_str_pos("MID"), Some(Position::Midfielder));
        assert_eq!(Position::from_str_pos("5"), None);
        assert_eq!(Position::from_str_pos("CB"), None);
    }

    #[test]
    fn position_codes_match_feed() {
        for code in 1..=4u8 {
            assert_eq!(Position::from_code(code).map(|p| p.code()), Some(code));
        }
        assert!(!OUTFIELD.contains(&Position::Goalkeeper));
    }

    #[test]
    fn table_rejects_duplicate_names() {
        let err = PlayerTable::new(vec![
            player("Salah", Position::Midfielder, 13.0, 8.0),
            player("Salah", Position::Midfielder, 13.0, 8.0),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TableError::DuplicatePlayer {
                name: "Salah".into()
            }
        );
    }

    #[test]
    fn table_rejects_non_finite_numbers() {
        let mut keeper = player("Keeper", Position::Goalkeeper, 4.5, 3.0);
        keeper.points_per_game = f64::NAN;
        let err = PlayerTable::new(vec![keeper]).unwrap_err();
        assert_eq!(
            err,
            TableError::NonFiniteValue {
                name: "Keeper".into(),
                field: "points_per_game"
            }
        );

        let mut pricey = player("Pricey", Position::Forward, 8.0, 6.0);
        pricey.now_cost = f64::INFINITY;
        assert!(matches!(
            PlayerTable::new(vec![pricey]),
            Err(TableError::NonFiniteValue {
                field: "now_cost",
                ..
            })
        ));
    }

    #[test]
    fn playing_pool_uses_fraction_of_max() {
        let mut a = player("A", Position::Defender, 5.0, 4.0);
        let mut b = player("B", Position::Defender, 5.0, 4.0);
        let mut c = player("C", Position::Defender, 5.0, 4.0);
        a.game_time_estimate = 20.0;
        b.game_time_estimate = 5.0;
        c.game_time_estimate = 4.9;
        let table = PlayerTable::new(vec![a, b, c]).unwrap();

        let pool: Vec<&str> = table
            .playing_pool(0.25)
            .iter()
            .map(|p| p.full_name.as_str())
            .collect();
        assert_eq!(pool, vec!["A", "B"]);
    }

    #[test]
    fn records_named_keeps_table_order_and_rejects_unknown() {
        let table = PlayerTable::new(vec![
            player("A", Position::Defender, 5.0, 4.0),
            player("B", Position::Forward, 7.0, 5.0),
            player("C", Position::Goalkeeper, 4.5, 3.0),
        ])
        .unwrap();

        let picked = table
            .records_named(&["C".into(), "A".into(), "C".into()])
            .unwrap();
        let names: Vec<&str> = picked.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);

        let err = table.records_named(&["Z".into()]).unwrap_err();
        assert_eq!(
            err,
            SelectionError::InvalidPlayerReference { name: "Z".into() }
        );
    }
}

// Library root: squad selection toolkit for fantasy football.
//
// The player table is supplied by the caller (or loaded through
// `projections`); every selection operation is a pure function over it.

pub mod error;
pub mod player;
pub mod projections;
pub mod selection;

pub use error::{SelectionError, TableError};
pub use player::{PlayerRecord, PlayerTable, Position};

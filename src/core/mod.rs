//! Core domain types for the letter grid
//!
//! Tiles, modifiers and the board. Everything here is read-only once a board
//! has been loaded, so the search can share it freely across threads.

mod board;
mod tile;

pub use board::{BOARD_SIZE, Board, BoardError, FINAL_ROUND, FormatError, MatchState, TILE_COUNT};
pub use tile::{Modifier, Modifiers, Tile, letter_value};

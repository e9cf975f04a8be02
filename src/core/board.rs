//! The 5×5 letter grid and match economy
//!
//! A Board is built once per turn, either directly from tiles or from the
//! textual description produced by the capture layer, and is read-only for the
//! duration of a search.

use super::tile::{Modifier, Modifiers, Tile};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width and height of the grid
pub const BOARD_SIZE: usize = 5;

/// Number of tiles on a board
pub const TILE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Neighbor offsets in reading order (row above, same row, row below)
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Errors produced when building or querying a board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("coordinates ({x}, {y}) are outside the {BOARD_SIZE}x{BOARD_SIZE} board")]
    OutOfRange { x: usize, y: usize },

    #[error("malformed board description: {0}")]
    Format(#[from] FormatError),
}

/// Ways a board description can be malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expected gem balance and match round after the grid")]
    MissingEconomy,

    #[error("expected {TILE_COUNT} cells, found {0}")]
    TooFewCells(usize),

    #[error("expected {TILE_COUNT} cells, found more")]
    TooManyCells,

    #[error("unknown modifier '{marker}' after {cell} cells")]
    UnknownModifier { cell: usize, marker: char },

    #[error("tile at ({x}, {y}) has both double and triple letter modifiers")]
    ConflictingMultipliers { x: usize, y: usize },

    #[error("more than one tile at ({x}, {y})")]
    DuplicateTile { x: usize, y: usize },

    #[error("invalid gem balance '{0}'")]
    InvalidGems(String),

    #[error("invalid match round '{0}' (expected 1-{FINAL_ROUND})")]
    InvalidRound(String),
}

/// Final round of a match; gems are cashed out as points
pub const FINAL_ROUND: u8 = 5;

/// Economy state the scoring model reads: gem balance and match round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchState {
    gems: u32,
    round: u8,
}

impl MatchState {
    /// Create a match state
    ///
    /// # Errors
    /// Returns `FormatError::InvalidRound` if `round` is outside 1-5.
    pub fn new(gems: u32, round: u8) -> Result<Self, FormatError> {
        if !(1..=FINAL_ROUND).contains(&round) {
            return Err(FormatError::InvalidRound(round.to_string()));
        }
        Ok(Self { gems, round })
    }

    /// Current gem balance
    #[inline]
    #[must_use]
    pub const fn gems(self) -> u32 {
        self.gems
    }

    /// Current round (1-5)
    #[inline]
    #[must_use]
    pub const fn round(self) -> u8 {
        self.round
    }

    #[inline]
    #[must_use]
    pub const fn is_final_round(self) -> bool {
        self.round == FINAL_ROUND
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self { gems: 0, round: 1 }
    }
}

/// A 5×5 grid of tiles plus the match economy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [[Tile; BOARD_SIZE]; BOARD_SIZE],
    state: MatchState,
}

impl Board {
    /// Build a board from exactly 25 tiles placed by their own coordinates
    ///
    /// # Errors
    /// - `OutOfRange` if a tile lies outside the grid
    /// - `Format` if the tile count is wrong, two tiles share coordinates, or
    ///   a tile carries both letter multipliers
    pub fn new(tiles: &[Tile], state: MatchState) -> Result<Self, BoardError> {
        if tiles.len() < TILE_COUNT {
            return Err(FormatError::TooFewCells(tiles.len()).into());
        }
        if tiles.len() > TILE_COUNT {
            return Err(FormatError::TooManyCells.into());
        }

        for tile in tiles {
            let (x, y) = (tile.x(), tile.y());
            if x >= BOARD_SIZE || y >= BOARD_SIZE {
                return Err(BoardError::OutOfRange { x, y });
            }
            if tile.has(Modifier::DoubleLetter) && tile.has(Modifier::TripleLetter) {
                return Err(FormatError::ConflictingMultipliers { x, y }.into());
            }
        }

        let mut ordered = tiles.to_vec();
        ordered.sort_by_key(|tile| (tile.y(), tile.x()));
        if let Some(pair) = ordered
            .windows(2)
            .find(|pair| (pair[0].x(), pair[0].y()) == (pair[1].x(), pair[1].y()))
        {
            let (x, y) = (pair[1].x(), pair[1].y());
            return Err(FormatError::DuplicateTile { x, y }.into());
        }

        // 25 distinct in-range tiles in reading order
        let tiles = std::array::from_fn(|y| std::array::from_fn(|x| ordered[y * BOARD_SIZE + x]));

        Ok(Self { tiles, state })
    }

    /// Parse the textual board description
    ///
    /// The description is 25 cells (a letter followed by optional modifier
    /// markers `+ * $ ! #`) spread over any number of lines, followed by a
    /// line holding the gem balance and a line holding the match round.
    ///
    /// # Errors
    /// Returns `BoardError::Format` if the description does not have that shape.
    ///
    /// # Examples
    /// ```
    /// use spellcast_solver::core::Board;
    ///
    /// let board = Board::load_from_text(&[
    ///     "ABCDE", "FGHIJ", "K$LMNO", "PQRS!T", "UVW#XY", "3", "2",
    /// ])
    /// .unwrap();
    /// assert_eq!(board.state().gems(), 3);
    /// assert_eq!(board.tile_at(0, 2).unwrap().letter(), b'k');
    /// ```
    pub fn load_from_text<S: AsRef<str>>(lines: &[S]) -> Result<Self, BoardError> {
        let lines: Vec<&str> = lines
            .iter()
            .map(|line| line.as_ref().trim())
            .filter(|line| !line.is_empty())
            .collect();

        if lines.len() < 2 {
            return Err(FormatError::MissingEconomy.into());
        }
        let (grid_lines, economy) = lines.split_at(lines.len() - 2);

        let gems = economy[0]
            .parse::<u32>()
            .map_err(|_| FormatError::InvalidGems(economy[0].to_string()))?;
        let round = economy[1]
            .parse::<u8>()
            .map_err(|_| FormatError::InvalidRound(economy[1].to_string()))?;
        let state = MatchState::new(gems, round)?;

        let cells = parse_cells(grid_lines)?;
        let tiles: Vec<Tile> = cells
            .into_iter()
            .enumerate()
            .map(|(i, (letter, modifiers))| {
                Tile::new(letter, i % BOARD_SIZE, i / BOARD_SIZE, modifiers)
            })
            .collect();

        Self::new(&tiles, state)
    }

    /// Tile at column `x`, row `y`
    ///
    /// # Errors
    /// Returns `BoardError::OutOfRange` if either coordinate is outside 0-4.
    pub fn tile_at(&self, x: usize, y: usize) -> Result<&Tile, BoardError> {
        self.tiles
            .get(y)
            .and_then(|row| row.get(x))
            .ok_or(BoardError::OutOfRange { x, y })
    }

    /// Tiles within one step (including diagonals) of `(x, y)`, in reading order
    ///
    /// # Errors
    /// Returns `BoardError::OutOfRange` if `(x, y)` is not on the board.
    pub fn adjacent_tiles(&self, x: usize, y: usize) -> Result<SmallVec<[&Tile; 8]>, BoardError> {
        self.tile_at(x, y)?;
        Ok(self.neighbors(x, y).collect())
    }

    /// Neighbors of an on-board coordinate, in reading order
    pub(crate) fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = &Tile> {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            self.tiles.get(ny)?.get(nx)
        })
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }

    /// Gem balance and match round
    #[inline]
    #[must_use]
    pub const fn state(&self) -> MatchState {
        self.state
    }
}

/// Split grid lines into (letter, modifiers) cells
fn parse_cells(lines: &[&str]) -> Result<Vec<(u8, Modifiers)>, FormatError> {
    let mut cells: Vec<(u8, Modifiers)> = Vec::with_capacity(TILE_COUNT);

    for ch in lines.iter().flat_map(|line| line.chars()) {
        if ch.is_whitespace() {
            continue;
        }

        if ch.is_ascii_alphabetic() {
            if cells.len() == TILE_COUNT {
                return Err(FormatError::TooManyCells);
            }
            cells.push((ch.to_ascii_lowercase() as u8, Modifiers::NONE));
            continue;
        }

        let modifier = Modifier::from_marker(ch).ok_or(FormatError::UnknownModifier {
            cell: cells.len(),
            marker: ch,
        })?;
        match cells.last_mut() {
            Some((_, modifiers)) => modifiers.insert(modifier),
            None => {
                return Err(FormatError::UnknownModifier {
                    cell: 0,
                    marker: ch,
                });
            }
        }
    }

    if cells.len() < TILE_COUNT {
        return Err(FormatError::TooFewCells(cells.len()));
    }

    Ok(cells)
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        Self::load_from_text(&lines)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        writeln!(f, "{}", self.state.gems)?;
        write!(f, "{}", self.state.round)
    }
}

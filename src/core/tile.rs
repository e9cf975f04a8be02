//! Board cell representation
//!
//! A Tile is one grid cell: its letter, position and the modifiers that change
//! how it scores or whether it can be used at all.

use std::fmt;

/// Point value of each letter, indexed by `letter - b'a'`
const LETTER_VALUES: [u32; 26] = [
    1, 4, 5, 3, 1, 5, 3, 4, 1, 7, 6, 3, 4, 2, 1, 4, 8, 2, 2, 2, 4, 5, 5, 7, 4, 8,
];

/// Base point value of a letter (case-insensitive)
///
/// Returns 0 for anything that is not an ASCII letter.
///
/// # Examples
/// ```
/// use spellcast_solver::core::letter_value;
///
/// assert_eq!(letter_value(b'a'), 1);
/// assert_eq!(letter_value(b'Z'), 8);
/// assert_eq!(letter_value(b'?'), 0);
/// ```
#[inline]
#[must_use]
pub const fn letter_value(letter: u8) -> u32 {
    let lower = letter.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        LETTER_VALUES[(lower - b'a') as usize]
    } else {
        0
    }
}

/// A single tile modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    Gem,
    Frozen,
}

impl Modifier {
    /// Every modifier, in marker order
    pub const ALL: [Self; 5] = [
        Self::DoubleLetter,
        Self::TripleLetter,
        Self::DoubleWord,
        Self::Gem,
        Self::Frozen,
    ];

    /// Single-character suffix used in board text
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::DoubleLetter => '+',
            Self::TripleLetter => '*',
            Self::DoubleWord => '$',
            Self::Gem => '!',
            Self::Frozen => '#',
        }
    }

    /// Parse a board text marker
    #[must_use]
    pub const fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '+' => Some(Self::DoubleLetter),
            '*' => Some(Self::TripleLetter),
            '$' => Some(Self::DoubleWord),
            '!' => Some(Self::Gem),
            '#' => Some(Self::Frozen),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::DoubleLetter => 1,
            Self::TripleLetter => 1 << 1,
            Self::DoubleWord => 1 << 2,
            Self::Gem => 1 << 3,
            Self::Frozen => 1 << 4,
        }
    }
}

/// Set of modifiers stored as a bitmask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, modifier: Modifier) -> Self {
        Self(self.0 | modifier.bit())
    }

    #[inline]
    pub const fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Multiplier applied to the letter on this tile (1, 2 or 3)
    #[inline]
    #[must_use]
    pub const fn letter_multiplier(self) -> u32 {
        if self.contains(Modifier::TripleLetter) {
            3
        } else if self.contains(Modifier::DoubleLetter) {
            2
        } else {
            1
        }
    }

    /// Iterate over the modifiers present, in marker order
    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |&m| self.contains(m))
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

/// One cell of the 5×5 grid
///
/// Tiles are immutable once the board is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    letter: u8,
    x: usize,
    y: usize,
    modifiers: Modifiers,
}

impl Tile {
    /// Create a tile; the letter is normalized to lowercase
    #[must_use]
    pub const fn new(letter: u8, x: usize, y: usize, modifiers: Modifiers) -> Self {
        Self {
            letter: letter.to_ascii_lowercase(),
            x,
            y,
            modifiers,
        }
    }

    /// Lowercase ASCII letter shown on the tile
    #[inline]
    #[must_use]
    pub const fn letter(&self) -> u8 {
        self.letter
    }

    /// Column (0-indexed)
    #[inline]
    #[must_use]
    pub const fn x(&self) -> usize {
        self.x
    }

    /// Row (0-indexed)
    #[inline]
    #[must_use]
    pub const fn y(&self) -> usize {
        self.y
    }

    #[inline]
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    #[inline]
    #[must_use]
    pub const fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(modifier)
    }

    #[inline]
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.has(Modifier::Frozen)
    }

    /// Letter value with the tile's letter multiplier applied
    #[inline]
    #[must_use]
    pub const fn value(&self) -> u32 {
        letter_value(self.letter) * self.modifiers.letter_multiplier()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(self.letter.to_ascii_uppercase()))?;
        for modifier in self.modifiers.iter() {
            write!(f, "{}", modifier.marker())?;
        }
        Ok(())
    }
}

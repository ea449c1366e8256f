//! VerseKeyTable: bounded position index built from a reference text.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::CipherError;

/// Default bound for both rows and columns.
pub const DEFAULT_SIZE: usize = 10;

/// 1-indexed table coordinate: `row` is the word, `col` the character in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Word number, starting at 1.
    pub row: usize,
    /// Character number within the word, starting at 1.
    pub col: usize,
}

impl Position {
    /// Creates a position.
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = CipherError;

    /// Parses `row/col`. Anything else, including extra `/` parts, is a
    /// [`CipherError::MalformedToken`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CipherError::MalformedToken(s.to_string());
        let mut parts = s.split('/');
        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let row = row.trim().parse().map_err(|_| malformed())?;
        let col = col.trim().parse().map_err(|_| malformed())?;
        Ok(Position { row, col })
    }
}

/// Immutable two-way index between characters and table positions.
///
/// Built from the first `max_rows` whitespace-separated words of a verse,
/// each truncated to `max_cols` characters. Every cell holds exactly one
/// character; a character may occupy many cells, listed in row-major
/// encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseKeyTable {
    max_rows: usize,
    max_cols: usize,
    positions: HashMap<char, Vec<Position>>,
    cells: HashMap<Position, char>,
}

impl VerseKeyTable {
    /// Builds a table with the default 10×10 bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use classicrypt::verse::{Position, VerseKeyTable};
    ///
    /// let table = VerseKeyTable::new("Your chosen verse here");
    /// assert_eq!(table.first_position('Y'), Some(Position::new(1, 1)));
    /// assert_eq!(table.char_at(2, 1), Some('c'));
    /// ```
    pub fn new(verse: &str) -> Self {
        Self::build(verse, DEFAULT_SIZE, DEFAULT_SIZE)
    }

    /// Builds a table bounded to `max_rows` words of at most `max_cols`
    /// characters each.
    ///
    /// # Parameters
    /// - `verse`: Reference text, split on whitespace into rows.
    /// - `max_rows`: Number of words indexed. Zero yields an empty table.
    /// - `max_cols`: Characters indexed per word. Zero yields an empty table.
    ///
    /// # Returns
    /// An immutable table; building again from the same input gives an
    /// equal table.
    pub fn build(verse: &str, max_rows: usize, max_cols: usize) -> Self {
        let mut positions: HashMap<char, Vec<Position>> = HashMap::new();
        let mut cells = HashMap::new();
        for (r, word) in verse.split_whitespace().take(max_rows).enumerate() {
            for (c, ch) in word.chars().take(max_cols).enumerate() {
                let pos = Position::new(r + 1, c + 1);
                positions.entry(ch).or_default().push(pos);
                cells.insert(pos, ch);
            }
        }
        debug!(
            max_rows,
            max_cols,
            cells = cells.len(),
            distinct = positions.len(),
            "verse key table built"
        );
        VerseKeyTable {
            max_rows,
            max_cols,
            positions,
            cells,
        }
    }

    /// Row bound used at construction.
    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Column bound used at construction.
    pub fn max_cols(&self) -> usize {
        self.max_cols
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every position of `ch` in encounter order; empty if absent.
    pub fn positions_of(&self, ch: char) -> &[Position] {
        self.positions.get(&ch).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Earliest position of `ch`, the one the cipher emits.
    pub fn first_position(&self, ch: char) -> Option<Position> {
        self.positions_of(ch).first().copied()
    }

    /// Character stored at `(row, col)`, if any.
    pub fn char_at(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(&Position::new(row, col)).copied()
    }
}

use serde::{Deserialize, Serialize};

use crate::CellRangeError;

/// Number of palette entries a renderer needs: index 0 (empty) plus the
/// seven shape identifiers.
pub const PALETTE_LEN: usize = 8;

/// A single board or shape cell.
///
/// `0` is empty; `1..=7` is occupied, the value doubling as the owning
/// shape's identifier and as a palette index. The value carries no other
/// meaning.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Self = Self(0);
    pub const MAX: Self = Self(7);

    /// Creates a cell from a palette index.
    ///
    /// Out-of-range values are a programming error and panic; use
    /// [`Cell::try_from`] for untrusted input.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        assert!(value <= Self::MAX.0, "cell value out of range");
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// Palette slot for this cell, always `< PALETTE_LEN`.
    #[must_use]
    pub const fn palette_index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Cell {
    type Error = CellRangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX.0 {
            return Err(CellRangeError { value });
        }
        Ok(Self(value))
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.0
    }
}

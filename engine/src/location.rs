//! Validated location identifiers for the tableau and free-cell areas.
//!
//! Foundations are addressed directly by [`crate::card::Suit`] rather than by
//! a numeric index, since there is exactly one foundation slot per suit.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationError {
    InvalidColumnIndex(u8),
    InvalidCellIndex(u8),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::InvalidColumnIndex(i) => write!(f, "invalid tableau column index: {i}"),
            LocationError::InvalidCellIndex(i) => write!(f, "invalid free cell index: {i}"),
        }
    }
}

impl std::error::Error for LocationError {}

/// A validated tableau column index (0-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnIndex(u8);

impl ColumnIndex {
    pub const COUNT: u8 = 8;

    pub fn new(index: u8) -> Result<Self, LocationError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(LocationError::InvalidColumnIndex(index))
        }
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn all() -> impl DoubleEndedIterator<Item = ColumnIndex> {
        (0..Self::COUNT).map(ColumnIndex)
    }
}

/// A validated free-cell index (0-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex(u8);

impl CellIndex {
    pub const COUNT: u8 = 3;

    pub fn new(index: u8) -> Result<Self, LocationError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(LocationError::InvalidCellIndex(index))
        }
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..Self::COUNT).map(CellIndex)
    }
}

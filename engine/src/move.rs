//! The five legal move kinds in Shenzhen Solitaire.
//!
//! Moves are used by the rules engine as transitions between positions, and
//! by the search engine as the edges of the state graph it explores.

use crate::card::Suit;
use crate::location::{CellIndex, ColumnIndex};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Gather all four dragons of `suit` into one free cell as a `FaceDown`.
    CollectDragons { suit: Suit },
    /// Move the top card of a column to its foundation.
    ColumnToFoundation { column: ColumnIndex },
    /// Move a free-cell card to its foundation.
    FreeCellToFoundation { cell: CellIndex },
    /// Move the top `stack_size` cards from `from` onto `to`.
    ColumnToColumn { from: ColumnIndex, to: ColumnIndex, stack_size: u8 },
    /// Move the top card of a column into any free cell.
    ColumnToFreeCell { column: ColumnIndex },
    /// Move a free-cell card onto a column.
    FreeCellToColumn { cell: CellIndex, column: ColumnIndex },
}

impl Move {
    /// True for the two move kinds the forcing rule can trigger.
    pub fn is_foundation_move(&self) -> bool {
        matches!(self, Move::ColumnToFoundation { .. } | Move::FreeCellToFoundation { .. })
    }

    /// Number of cards this move transfers; 1 for everything but a column
    /// stack move.
    pub fn card_count(&self) -> u8 {
        match self {
            Move::ColumnToColumn { stack_size, .. } => *stack_size,
            _ => 1,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::CollectDragons { suit } => write!(f, "Collect {suit} dragons"),
            Move::ColumnToFoundation { column } => write!(f, "Column {} → Foundation", column.index()),
            Move::FreeCellToFoundation { cell } => write!(f, "FreeCell {} → Foundation", cell.index()),
            Move::ColumnToColumn { from, to, stack_size } => {
                write!(f, "Column {} → Column {} ({stack_size} cards)", from.index(), to.index())
            }
            Move::ColumnToFreeCell { column } => write!(f, "Column {} → FreeCell", column.index()),
            Move::FreeCellToColumn { cell, column } => write!(f, "FreeCell {} → Column {}", cell.index(), column.index()),
        }
    }
}

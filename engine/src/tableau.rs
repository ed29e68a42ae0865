//! The eight tableau columns.

use crate::card::Card;
use crate::location::ColumnIndex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tableau {
    columns: [Vec<Card>; 8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableauError {
    EmptyColumn,
}

impl fmt::Display for TableauError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableauError::EmptyColumn => write!(f, "no card in tableau column"),
        }
    }
}

impl std::error::Error for TableauError {}

impl Tableau {
    pub fn new(columns: [Vec<Card>; 8]) -> Self {
        Self { columns }
    }

    pub fn empty() -> Self {
        Self { columns: std::array::from_fn(|_| Vec::new()) }
    }

    pub fn column(&self, index: ColumnIndex) -> &[Card] {
        &self.columns[index.index() as usize]
    }

    pub fn columns(&self) -> impl Iterator<Item = &Vec<Card>> {
        self.columns.iter()
    }

    pub fn is_empty_column(&self, index: ColumnIndex) -> bool {
        self.column(index).is_empty()
    }

    pub fn top(&self, index: ColumnIndex) -> Option<&Card> {
        self.column(index).last()
    }

    pub fn push(&mut self, index: ColumnIndex, card: Card) {
        self.columns[index.index() as usize].push(card);
    }

    pub fn pop(&mut self, index: ColumnIndex) -> Result<Card, TableauError> {
        self.columns[index.index() as usize].pop().ok_or(TableauError::EmptyColumn)
    }

    /// The largest k such that the top k cards of the column form a
    /// descending, alternating-suit run (each consecutive pair satisfies
    /// `can_be_moved_on_top_of`). Empty column is 0, a lone top card is 1.
    pub fn natural_stack_size(&self, index: ColumnIndex) -> usize {
        let column = self.column(index);
        if column.is_empty() {
            return 0;
        }
        let mut size = 1;
        for window in column.windows(2).rev() {
            let (lower, upper) = (&window[0], &window[1]);
            if upper.can_be_moved_on_top_of(lower) {
                size += 1;
            } else {
                break;
            }
        }
        size
    }

    /// The card `stack_size` positions down from the top, i.e. the card that
    /// would land on the destination column when moving a stack of that size.
    pub fn card_at_stack_base(&self, index: ColumnIndex, stack_size: usize) -> Option<&Card> {
        let column = self.column(index);
        if stack_size == 0 || stack_size > column.len() {
            return None;
        }
        column.get(column.len() - stack_size)
    }

    /// Moves the top `stack_size` cards from `self[from]` onto `self[to]`,
    /// preserving their relative order.
    pub fn move_stack(&mut self, from: ColumnIndex, to: ColumnIndex, stack_size: usize) {
        let from_idx = from.index() as usize;
        let split_at = self.columns[from_idx].len() - stack_size;
        let moved: Vec<Card> = self.columns[from_idx].split_off(split_at);
        self.columns[to.index() as usize].extend(moved);
    }
}

impl fmt::Debug for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug_struct = f.debug_struct("Tableau");
        for (i, column) in self.columns.iter().enumerate() {
            let name = format!("column_{i}");
            if column.is_empty() {
                debug_struct.field(&name, &"[empty]");
            } else {
                debug_struct.field(&name, column);
            }
        }
        debug_struct.finish()
    }
}

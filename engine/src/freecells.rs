//! The free-cell area (a.k.a. top-left storage).
//!
//! Up to 3 cells, each holding a single card or a `FaceDown` placeholder left
//! behind by a dragon collection. Unlike classic FreeCell, slot identity is
//! gameplay-irrelevant here — see [`crate::canonical`] for how that symmetry
//! is collapsed for the visited set.

use crate::card::{Card, Suit};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FREE_CELL_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FreeCells {
    cells: [Option<Card>; FREE_CELL_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeCellError {
    NoEmptyCells,
}

impl fmt::Display for FreeCellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreeCellError::NoEmptyCells => write!(f, "no empty free cell available"),
        }
    }
}

impl std::error::Error for FreeCellError {}

impl FreeCells {
    pub fn empty() -> Self {
        Self { cells: [None; FREE_CELL_COUNT] }
    }

    pub fn from_cards(cards: [Option<Card>; FREE_CELL_COUNT]) -> Self {
        Self { cells: cards }
    }

    pub fn get(&self, slot: usize) -> Option<&Card> {
        self.cells[slot].as_ref()
    }

    pub fn occupied(&self) -> impl Iterator<Item = &Card> {
        self.cells.iter().filter_map(|c| c.as_ref())
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    pub fn has_room(&self) -> bool {
        self.occupied_count() < FREE_CELL_COUNT
    }

    /// Places `card` in the first empty slot.
    pub fn place(&mut self, card: Card) -> Result<(), FreeCellError> {
        let slot = self.cells.iter().position(|c| c.is_none()).ok_or(FreeCellError::NoEmptyCells)?;
        self.cells[slot] = Some(card);
        Ok(())
    }

    /// Removes the first card equal to `card`, if present.
    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(slot) = self.cells.iter().position(|c| *c == Some(card)) {
            self.cells[slot] = None;
            true
        } else {
            false
        }
    }

    /// True iff any cell holds a dragon of `suit`.
    pub fn has_dragon(&self, suit: Suit) -> bool {
        self.occupied().any(|c| c.is_dragon(Some(suit)))
    }

    /// Whether a dragon collection of `suit` has room to place its `FaceDown`
    /// placeholder: either a matching dragon already occupies a cell (it will
    /// be consumed by the collection), or there's an empty cell outright.
    pub fn has_room_for_collection(&self, suit: Suit) -> bool {
        self.has_room() || self.has_dragon(suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn new_free_cells_are_all_empty() {
        let cells = FreeCells::empty();
        assert_eq!(cells.occupied_count(), 0);
        assert!(cells.has_room());
    }

    #[test]
    fn place_fills_first_empty_slot() {
        let mut cells = FreeCells::empty();
        cells.place(Card::numeric(Suit::Red, 3).unwrap()).unwrap();
        cells.place(Card::numeric(Suit::Green, 4).unwrap()).unwrap();
        assert_eq!(cells.occupied_count(), 2);
    }

    #[test]
    fn place_fails_when_full() {
        let mut cells = FreeCells::empty();
        for v in 1..=3 {
            cells.place(Card::numeric(Suit::Red, v).unwrap()).unwrap();
        }
        assert_eq!(cells.place(Card::numeric(Suit::Green, 1).unwrap()), Err(FreeCellError::NoEmptyCells));
    }

    #[test]
    fn remove_clears_the_matching_slot() {
        let mut cells = FreeCells::empty();
        let card = Card::numeric(Suit::Red, 3).unwrap();
        cells.place(card).unwrap();
        assert!(cells.remove(card));
        assert_eq!(cells.occupied_count(), 0);
        assert!(!cells.remove(card));
    }

    #[rstest]
    #[case(0, true)]
    #[case(3, false)]
    fn has_room_for_collection_without_matching_dragon(#[case] occupied: usize, #[case] expected: bool) {
        let mut cells = FreeCells::empty();
        for v in 1..=occupied {
            cells.place(Card::numeric(Suit::Black, v as u8).unwrap()).unwrap();
        }
        assert_eq!(cells.has_room_for_collection(Suit::Red), expected);
    }

    #[test]
    fn has_room_for_collection_when_full_but_one_cell_matches() {
        let mut cells = FreeCells::empty();
        cells.place(Card::dragon(Suit::Red).unwrap()).unwrap();
        cells.place(Card::numeric(Suit::Black, 1).unwrap()).unwrap();
        cells.place(Card::numeric(Suit::Green, 2).unwrap()).unwrap();
        assert!(cells.has_room_for_collection(Suit::Red));
        assert!(!cells.has_room_for_collection(Suit::Green));
    }
}

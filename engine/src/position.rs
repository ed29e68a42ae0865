//! A complete game position: tableau + free cells + foundations.

use crate::card::{Card, Suit};
use crate::foundations::Foundations;
use crate::freecells::FreeCells;
use crate::location::ColumnIndex;
use crate::tableau::Tableau;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    tableau: Tableau,
    free_cells: FreeCells,
    foundations: Foundations,
}

/// Mirrors the recommended wire format (§6.4): `tableau`'s and `free_cells`'
/// `#[serde(transparent)]` impls flatten them to plain arrays under the
/// `columns` / `free_cells` keys.
#[derive(Serialize, Deserialize)]
struct PositionWire {
    columns: Tableau,
    free_cells: FreeCells,
    foundations: Foundations,
}

impl Serialize for Position {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PositionWire { columns: self.tableau.clone(), free_cells: self.free_cells, foundations: self.foundations }
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = PositionWire::deserialize(deserializer)?;
        Position::new(wire.columns, wire.free_cells, wire.foundations).map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    DuplicateCard(Card),
    MissingCard(Card),
    FoundationMismatch { suit: Suit, foundation_value: u8, dealt_count: u8 },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::DuplicateCard(c) => write!(f, "card {c} appears more than once"),
            PositionError::MissingCard(c) => write!(f, "card {c} is missing from the deck"),
            PositionError::FoundationMismatch { suit, foundation_value, dealt_count } => write!(
                f,
                "foundation {suit} reports {foundation_value} but {dealt_count} cards of that suit are accounted for elsewhere"
            ),
        }
    }
}

impl std::error::Error for PositionError {}

impl Position {
    /// Validates deck-multiset and shape invariants (§3) and constructs a
    /// `Position`. This is the boundary through which all external input
    /// (a recognizer, a test fixture) enters the engine.
    pub fn new(tableau: Tableau, free_cells: FreeCells, foundations: Foundations) -> Result<Self, PositionError> {
        let mut seen: HashMap<Card, u32> = HashMap::new();
        for card in tableau.columns().flatten().chain(free_cells.occupied()) {
            *seen.entry(*card).or_insert(0) += 1;
        }

        for (card, count) in &seen {
            let expected = if card.is_face_down() {
                u32::MAX
            } else if card.is_dragon(None) {
                4
            } else {
                1
            };
            if *count > expected {
                return Err(PositionError::DuplicateCard(*card));
            }
        }

        for suit in Suit::DRAGON_SUITS {
            let dealt_dragons: u32 = seen.iter().filter(|(c, _)| c.is_dragon(Some(suit))).map(|(_, count)| count).sum();
            let foundation_value = foundations.value(suit);
            // A dragon suit is either fully dealt across the board (4 live
            // dragons) or fully collected (0 live, folded into a FaceDown) —
            // foundation value itself never counts dragons, but a partially
            // dealt dragon suit (1-3 live) means a dealt card went missing.
            if dealt_dragons != 0 && dealt_dragons != 4 {
                return Err(PositionError::FoundationMismatch {
                    suit,
                    foundation_value,
                    dealt_count: dealt_dragons as u8,
                });
            }
        }

        // Every numeric card is accounted for exactly once: either still on
        // the board, or implied already collected by its foundation's value.
        for suit in [Suit::Red, Suit::Green, Suit::Black] {
            for value in 1..=9u8 {
                let card = Card::numeric(suit, value).unwrap();
                let on_board = seen.contains_key(&card);
                let collected = foundations.value(suit) >= value;
                match (on_board, collected) {
                    (false, false) => return Err(PositionError::MissingCard(card)),
                    (true, true) => return Err(PositionError::DuplicateCard(card)),
                    _ => {}
                }
            }
        }
        let special_on_board = seen.contains_key(&Card::special());
        let special_collected = foundations.value(Suit::Special) == 1;
        match (special_on_board, special_collected) {
            (false, false) => return Err(PositionError::MissingCard(Card::special())),
            (true, true) => return Err(PositionError::DuplicateCard(Card::special())),
            _ => {}
        }

        Ok(Self { tableau, free_cells, foundations })
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn free_cells(&self) -> &FreeCells {
        &self.free_cells
    }

    pub fn foundations(&self) -> &Foundations {
        &self.foundations
    }

    pub fn tableau_mut(&mut self) -> &mut Tableau {
        &mut self.tableau
    }

    pub fn free_cells_mut(&mut self) -> &mut FreeCells {
        &mut self.free_cells
    }

    pub fn foundations_mut(&mut self) -> &mut Foundations {
        &mut self.foundations
    }

    /// All 8 columns empty. By the deck invariant this implies foundations
    /// are maxed and free cells hold three `FaceDown` entries.
    pub fn is_winning(&self) -> bool {
        let columns_empty = ColumnIndex::all().all(|c| self.tableau.is_empty_column(c));
        if columns_empty {
            debug_assert!(self.foundations.is_complete());
            debug_assert!(self.free_cells.occupied().all(Card::is_face_down));
        }
        columns_empty
    }
}

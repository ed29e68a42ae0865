//! The foundation area (a.k.a. top-right storage).
//!
//! One slot per suit, holding the highest numeric value deposited so far
//! (0 = empty). There is no foundation slot for `FaceDown`.

use crate::card::{Card, Suit};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stored as the 4-tuple `(special, red, green, black)`, matching the
/// foundation's fixed per-suit ordering (§3). Serializes as a plain
/// `[special, red, green, black]` JSON array rather than a named object, to
/// match the wire format an external recognizer would produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Foundations {
    special: u8,
    red: u8,
    green: u8,
    black: u8,
}

impl Serialize for Foundations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.special, self.red, self.green, self.black].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Foundations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [special, red, green, black] = <[u8; 4]>::deserialize(deserializer)?;
        Ok(Self { special, red, green, black })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoundationError {
    NotNextInSequence { suit: Suit, expected: u8, got: Option<u8> },
    NoFoundationForFaceDown,
}

impl fmt::Display for FoundationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoundationError::NotNextInSequence { suit, expected, got } => {
                write!(f, "foundation {suit} expects value {expected}, got {got:?}")
            }
            FoundationError::NoFoundationForFaceDown => write!(f, "FaceDown has no foundation slot"),
        }
    }
}

impl std::error::Error for FoundationError {}

impl Foundations {
    pub fn empty() -> Self {
        Self { special: 0, red: 0, green: 0, black: 0 }
    }

    pub fn new(special: u8, red: u8, green: u8, black: u8) -> Self {
        Self { special, red, green, black }
    }

    pub fn value(&self, suit: Suit) -> u8 {
        match suit {
            Suit::Special => self.special,
            Suit::Red => self.red,
            Suit::Green => self.green,
            Suit::Black => self.black,
            Suit::FaceDown => 0,
        }
    }

    fn slot_mut(&mut self, suit: Suit) -> Option<&mut u8> {
        match suit {
            Suit::Special => Some(&mut self.special),
            Suit::Red => Some(&mut self.red),
            Suit::Green => Some(&mut self.green),
            Suit::Black => Some(&mut self.black),
            Suit::FaceDown => None,
        }
    }

    /// True iff `card` is the next card due on its suit's foundation: Special
    /// always (it is the only Special card), or a numeric card that is
    /// exactly one above the foundation's current value.
    pub fn accepts(&self, card: &Card) -> bool {
        match card.suit() {
            Suit::Special => self.special == 0,
            suit @ (Suit::Red | Suit::Green | Suit::Black) => {
                card.value().is_some_and(|v| v == self.value(suit) + 1)
            }
            Suit::FaceDown => false,
        }
    }

    pub fn deposit(&mut self, card: Card) -> Result<(), FoundationError> {
        if !self.accepts(&card) {
            return Err(FoundationError::NotNextInSequence {
                suit: card.suit(),
                expected: self.value(card.suit()) + 1,
                got: card.value(),
            });
        }
        let slot = self.slot_mut(card.suit()).ok_or(FoundationError::NoFoundationForFaceDown)?;
        *slot = card.value().unwrap_or(1);
        Ok(())
    }

    pub fn total(&self) -> u32 {
        self.special as u32 + self.red as u32 + self.green as u32 + self.black as u32
    }

    /// Special = 1 and every colored suit = 9.
    pub fn is_complete(&self) -> bool {
        self.special == 1 && self.red == 9 && self.green == 9 && self.black == 9
    }
}

impl fmt::Display for Foundations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Special:{} Red:{} Green:{} Black:{}]", self.special, self.red, self.green, self.black)
    }
}

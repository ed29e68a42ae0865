//! Card representation for Shenzhen Solitaire.
//!
//! A card belongs to one of five suits. Special and the three colored suits
//! (Red, Green, Black) are dealt; `FaceDown` never is — it is a sentinel that
//! occupies a free cell once all four dragons of a suit have been collected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declaration order is also sort order: Special < Red < Green < Black < FaceDown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Special,
    Red,
    Green,
    Black,
    FaceDown,
}

impl Suit {
    /// The three suits that carry dragons and can be collected.
    pub const DRAGON_SUITS: [Suit; 3] = [Suit::Red, Suit::Green, Suit::Black];

    pub fn is_colored(&self) -> bool {
        matches!(self, Suit::Red | Suit::Green | Suit::Black)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Suit::Special => "Special",
            Suit::Red => "Red",
            Suit::Green => "Green",
            Suit::Black => "Black",
            Suit::FaceDown => "FaceDown",
        };
        write!(f, "{name}")
    }
}

/// A single card.
///
/// `value` is `None` for dragons and for the `FaceDown` placeholder, and
/// `Some(1..=9)` for numeric cards (Special is always `Some(1)`).
///
/// `Ord` is derived directly from `(suit, value)`; since `None < Some(_)` for
/// the derived `Option<u8>` ordering, a dragon of a suit always sorts below
/// every numeric card of that suit, matching the total order required for
/// canonicalization and for free-cell sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    suit: Suit,
    value: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    InvalidValue(u8),
    SuitCannotCarryValue(Suit),
    SuitCannotBeDragon(Suit),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::InvalidValue(v) => write!(f, "invalid numeric value: {v}"),
            CardError::SuitCannotCarryValue(s) => write!(f, "suit {s} cannot carry a numeric value"),
            CardError::SuitCannotBeDragon(s) => write!(f, "suit {s} has no dragons"),
        }
    }
}

impl std::error::Error for CardError {}

impl Card {
    /// The single Special card, value fixed at 1.
    pub fn special() -> Self {
        Card { suit: Suit::Special, value: Some(1) }
    }

    /// A numeric card of a colored suit. `value` must be in `1..=9`.
    pub fn numeric(suit: Suit, value: u8) -> Result<Self, CardError> {
        if !suit.is_colored() {
            return Err(CardError::SuitCannotCarryValue(suit));
        }
        if !(1..=9).contains(&value) {
            return Err(CardError::InvalidValue(value));
        }
        Ok(Card { suit, value: Some(value) })
    }

    /// A dragon of a colored suit.
    pub fn dragon(suit: Suit) -> Result<Self, CardError> {
        if !suit.is_colored() {
            return Err(CardError::SuitCannotBeDragon(suit));
        }
        Ok(Card { suit, value: None })
    }

    /// The collapsed placeholder left in a free cell after a dragon collection.
    pub fn face_down() -> Self {
        Card { suit: Suit::FaceDown, value: None }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn value(&self) -> Option<u8> {
        self.value
    }

    pub fn is_face_down(&self) -> bool {
        matches!(self.suit, Suit::FaceDown)
    }

    pub fn is_special(&self) -> bool {
        matches!(self.suit, Suit::Special)
    }

    pub fn is_numeric(&self) -> bool {
        self.value.is_some()
    }

    /// True if this card is a dragon, optionally restricted to `suit`.
    pub fn is_dragon(&self, suit: Option<Suit>) -> bool {
        if self.value.is_some() || self.is_face_down() {
            return false;
        }
        match suit {
            Some(s) => self.suit == s,
            None => true,
        }
    }

    /// True iff both cards are numeric, their suits differ, and `self.value == other.value - 1`.
    /// Special cards never participate in tableau stacking.
    pub fn can_be_moved_on_top_of(&self, other: &Card) -> bool {
        if self.is_special() || other.is_special() {
            return false;
        }
        match (self.value, other.value) {
            (Some(a), Some(b)) => self.suit != other.suit && a + 1 == b,
            _ => false,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}/{}", self.suit, v),
            None if self.is_face_down() => write!(f, "FaceDown"),
            None => write!(f, "{}Dragon", self.suit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn special_is_fixed_at_one() {
        let special = Card::special();
        assert_eq!(special.value(), Some(1));
        assert!(special.is_special());
    }

    #[rstest]
    #[case(Suit::Red, 1, true)]
    #[case(Suit::Green, 9, true)]
    #[case(Suit::Black, 0, false)]
    #[case(Suit::Black, 10, false)]
    #[case(Suit::Special, 1, false)]
    fn numeric_validates_range_and_suit(#[case] suit: Suit, #[case] value: u8, #[case] ok: bool) {
        assert_eq!(Card::numeric(suit, value).is_ok(), ok);
    }

    #[test]
    fn dragon_rejects_special_and_face_down() {
        assert!(Card::dragon(Suit::Special).is_err());
        assert!(Card::dragon(Suit::FaceDown).is_err());
        assert!(Card::dragon(Suit::Red).is_ok());
    }

    #[rstest]
    #[case(Card::numeric(Suit::Red, 4).unwrap(), Card::numeric(Suit::Black, 5).unwrap(), true)]
    #[case(Card::numeric(Suit::Red, 4).unwrap(), Card::numeric(Suit::Red, 5).unwrap(), false)] // same suit
    #[case(Card::numeric(Suit::Red, 5).unwrap(), Card::numeric(Suit::Black, 5).unwrap(), false)] // wrong gap
    #[case(Card::dragon(Suit::Red).unwrap(), Card::numeric(Suit::Black, 5).unwrap(), false)] // dragon never stacks
    fn can_be_moved_on_top_of_rules(#[case] moving: Card, #[case] target: Card, #[case] expected: bool) {
        assert_eq!(moving.can_be_moved_on_top_of(&target), expected);
    }

    #[test]
    fn can_be_moved_on_top_of_is_antireflexive() {
        let card = Card::numeric(Suit::Red, 5).unwrap();
        assert!(!card.can_be_moved_on_top_of(&card));
    }

    #[test]
    fn special_never_stacks() {
        let special = Card::special();
        let red9 = Card::numeric(Suit::Red, 9).unwrap();
        assert!(!special.can_be_moved_on_top_of(&red9));
        assert!(!red9.can_be_moved_on_top_of(&special));
    }

    #[test]
    fn dragon_sorts_below_numeric_of_same_suit() {
        let dragon = Card::dragon(Suit::Red).unwrap();
        let one = Card::numeric(Suit::Red, 1).unwrap();
        assert!(dragon < one);
    }

    #[test]
    fn suit_ordering_is_special_first_facedown_last() {
        let mut suits = [Suit::FaceDown, Suit::Black, Suit::Special, Suit::Green, Suit::Red];
        suits.sort();
        assert_eq!(suits, [Suit::Special, Suit::Red, Suit::Green, Suit::Black, Suit::FaceDown]);
    }

    #[test]
    fn is_dragon_restricted_to_suit() {
        let red_dragon = Card::dragon(Suit::Red).unwrap();
        assert!(red_dragon.is_dragon(None));
        assert!(red_dragon.is_dragon(Some(Suit::Red)));
        assert!(!red_dragon.is_dragon(Some(Suit::Green)));
        assert!(!Card::face_down().is_dragon(None));
    }
}

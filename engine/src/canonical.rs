//! Canonicalization: a symmetry-collapsed key for the search engine's
//! visited set.
//!
//! Free cells have no meaningful identity (swapping the contents of two
//! cells doesn't change the game), and neither do columns (two positions
//! that differ only by a permutation of which physical column holds which
//! stack are the same position for solving purposes). [`fingerprint`]
//! collapses both symmetries so the search engine's `Visited` set catches
//! these as duplicates instead of re-exploring them.

use crate::card::Card;
use crate::freecells::FREE_CELL_COUNT;
use crate::foundations::Foundations;
use crate::position::Position;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    free_cells: [Option<Card>; FREE_CELL_COUNT],
    columns: Vec<Vec<Card>>,
    foundations: Foundations,
}

/// Empty columns sort last, uniformly; non-empty columns sort by their full
/// contents, bottom card first — which is also a sort by bottom card, since
/// `Card` comparisons on the first element dominate unless there's a tie.
fn column_order(a: &[Card], b: &[Card]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

fn free_cell_order(a: &Option<Card>, b: &Option<Card>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn fingerprint(position: &Position) -> Fingerprint {
    let mut free_cells: Vec<Option<Card>> =
        (0..FREE_CELL_COUNT).map(|slot| position.free_cells().get(slot).copied()).collect();
    free_cells.sort_by(free_cell_order);

    let mut columns: Vec<Vec<Card>> = position.tableau().columns().cloned().collect();
    columns.sort_by(|a, b| column_order(a, b));

    Fingerprint {
        free_cells: free_cells.try_into().expect("exactly FREE_CELL_COUNT slots"),
        columns,
        foundations: *position.foundations(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;
    use crate::freecells::FreeCells;
    use crate::location::ColumnIndex;
    use crate::tableau::Tableau;
    use std::collections::HashSet;

    fn col(i: u8) -> ColumnIndex {
        ColumnIndex::new(i).unwrap()
    }

    /// Fills whatever the deck invariant still requires into the
    /// highest-indexed empty column, so a fixture can place only the cards a
    /// test cares about and still pass `Position::new`'s validation.
    fn position_for_test(mut tableau: Tableau, free_cells: FreeCells, foundations: Foundations) -> Position {
        let mut seen: HashSet<Card> = tableau.columns().flatten().copied().collect();
        seen.extend(free_cells.occupied().copied());

        let mut filler = Vec::new();
        if !seen.contains(&Card::special()) && foundations.value(Suit::Special) == 0 {
            filler.push(Card::special());
        }
        for suit in [Suit::Red, Suit::Green, Suit::Black] {
            for value in 1..=9u8 {
                let card = Card::numeric(suit, value).unwrap();
                if !seen.contains(&card) && foundations.value(suit) < value {
                    filler.push(card);
                }
            }
        }
        for suit in Suit::DRAGON_SUITS {
            let dealt = seen.iter().filter(|c| c.is_dragon(Some(suit))).count();
            if dealt > 0 {
                filler.extend(std::iter::repeat(Card::dragon(suit).unwrap()).take(4 - dealt));
            }
        }

        if !filler.is_empty() {
            let target = ColumnIndex::all()
                .rev()
                .find(|&c| tableau.is_empty_column(c))
                .expect("a minimal test fixture leaves a column free for filler cards");
            for card in filler {
                tableau.push(target, card);
            }
        }

        Position::new(tableau, free_cells, foundations).expect("filler accounts for the rest of the deck")
    }

    #[test]
    fn free_cell_slot_assignment_is_irrelevant() {
        let a = Card::numeric(Suit::Red, 3).unwrap();
        let b = Card::numeric(Suit::Green, 5).unwrap();
        let p1 = position_for_test(Tableau::empty(), FreeCells::from_cards([Some(a), Some(b), None]), Foundations::empty());
        let p2 = position_for_test(Tableau::empty(), FreeCells::from_cards([None, Some(b), Some(a)]), Foundations::empty());
        assert_eq!(fingerprint(&p1), fingerprint(&p2));
    }

    #[test]
    fn column_identity_is_irrelevant() {
        let mut t1 = Tableau::empty();
        t1.push(col(0), Card::numeric(Suit::Red, 7).unwrap());
        t1.push(col(1), Card::numeric(Suit::Green, 4).unwrap());

        let mut t2 = Tableau::empty();
        t2.push(col(5), Card::numeric(Suit::Red, 7).unwrap());
        t2.push(col(6), Card::numeric(Suit::Green, 4).unwrap());

        let p1 = position_for_test(t1, FreeCells::empty(), Foundations::empty());
        let p2 = position_for_test(t2, FreeCells::empty(), Foundations::empty());
        assert_eq!(fingerprint(&p1), fingerprint(&p2));
    }

    #[test]
    fn different_stacks_produce_different_fingerprints() {
        let mut t1 = Tableau::empty();
        t1.push(col(0), Card::numeric(Suit::Red, 7).unwrap());
        let mut t2 = Tableau::empty();
        t2.push(col(0), Card::numeric(Suit::Red, 8).unwrap());

        let p1 = position_for_test(t1, FreeCells::empty(), Foundations::empty());
        let p2 = position_for_test(t2, FreeCells::empty(), Foundations::empty());
        assert_ne!(fingerprint(&p1), fingerprint(&p2));
    }

    #[test]
    fn empty_columns_always_sort_last() {
        let mut t = Tableau::empty();
        t.push(col(7), Card::numeric(Suit::Black, 2).unwrap());
        let position = position_for_test(t, FreeCells::empty(), Foundations::empty());
        let print = fingerprint(&position);
        assert!(print.columns.last().unwrap().is_empty());
        assert!(!print.columns[0].is_empty());
    }
}

//! Pure, side-effect-free rules: legality predicates, move application, and
//! the winning-position check.
//!
//! Every function here takes a [`Position`] by reference and never mutates
//! it; `apply` always produces a fresh [`Position`]. Applying a move the
//! legality predicates would reject is a programmer error and returns
//! [`MoveError`] rather than panicking, so callers (and tests) can assert on
//! it directly.

use crate::card::{Card, Suit};
use crate::location::{CellIndex, ColumnIndex};
use crate::r#move::Move;
use crate::position::Position;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    ColumnEmpty(ColumnIndex),
    CellEmpty(CellIndex),
    FoundationRejectsCard,
    StackTooLarge { requested: u8, available: usize },
    CardCannotStackOnDestination,
    FreeCellsFull,
    FaceDownIsImmovable,
    DragonsNotAllFree(Suit),
    NoRoomForCollection(Suit),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::ColumnEmpty(c) => write!(f, "column {} is empty", c.index()),
            MoveError::CellEmpty(c) => write!(f, "free cell {} is empty", c.index()),
            MoveError::FoundationRejectsCard => write!(f, "card is not next in sequence for its foundation"),
            MoveError::StackTooLarge { requested, available } => {
                write!(f, "requested stack of {requested} exceeds natural stack size {available}")
            }
            MoveError::CardCannotStackOnDestination => write!(f, "card cannot stack on destination's top card"),
            MoveError::FreeCellsFull => write!(f, "no empty free cell available"),
            MoveError::FaceDownIsImmovable => write!(f, "a FaceDown placeholder cannot be moved"),
            MoveError::DragonsNotAllFree(s) => write!(f, "not all four {s} dragons are free"),
            MoveError::NoRoomForCollection(s) => write!(f, "no free cell room to collect {s} dragons"),
        }
    }
}

impl std::error::Error for MoveError {}

fn free_dragon_count(position: &Position, suit: Suit) -> usize {
    let mut count = 0;
    for card in position.tableau().columns().filter_map(|col| col.last()) {
        if card.is_dragon(Some(suit)) {
            count += 1;
        }
    }
    count += position.free_cells().occupied().filter(|c| c.is_dragon(Some(suit))).count();
    count
}

pub fn is_collect_dragons_legal(position: &Position, suit: Suit) -> bool {
    free_dragon_count(position, suit) == 4 && position.free_cells().has_room_for_collection(suit)
}

pub fn is_column_to_foundation_legal(position: &Position, column: ColumnIndex) -> bool {
    position.tableau().top(column).is_some_and(|card| position.foundations().accepts(card))
}

pub fn is_free_cell_to_foundation_legal(position: &Position, cell: CellIndex) -> bool {
    position.free_cells().get(cell.index() as usize).is_some_and(|card| position.foundations().accepts(card))
}

pub fn is_column_to_column_legal(position: &Position, from: ColumnIndex, to: ColumnIndex, stack_size: u8) -> bool {
    let natural = position.tableau().natural_stack_size(from);
    column_to_column_legal_given_natural(position, from, to, stack_size, natural)
}

/// Same check as [`is_column_to_column_legal`], but takes an
/// already-computed `natural_stack_size(from)` so a caller trying several
/// `to`/`stack_size` combinations for the same `from` only computes it once.
fn column_to_column_legal_given_natural(
    position: &Position,
    from: ColumnIndex,
    to: ColumnIndex,
    stack_size: u8,
    natural: usize,
) -> bool {
    if from == to || stack_size == 0 || stack_size as usize > natural {
        return false;
    }
    match position.tableau().card_at_stack_base(from, stack_size as usize) {
        None => false,
        Some(moving) => match position.tableau().top(to) {
            None => true,
            Some(target) => moving.can_be_moved_on_top_of(target),
        },
    }
}

pub fn is_column_to_free_cell_legal(position: &Position, column: ColumnIndex) -> bool {
    !position.tableau().is_empty_column(column) && position.free_cells().has_room()
}

pub fn is_free_cell_to_column_legal(position: &Position, cell: CellIndex, column: ColumnIndex) -> bool {
    match position.free_cells().get(cell.index() as usize) {
        None => false,
        Some(card) if card.is_face_down() => false,
        Some(card) => match position.tableau().top(column) {
            None => true,
            Some(target) => card.can_be_moved_on_top_of(target),
        },
    }
}

/// The forced move: the first foundation-legal card found scanning columns
/// left to right, then free cells in order. When present, this is the only
/// move the search engine is allowed to apply from the position (§4.1.1).
pub fn find_forced_move(position: &Position) -> Option<Move> {
    for column in ColumnIndex::all() {
        if is_column_to_foundation_legal(position, column) {
            return Some(Move::ColumnToFoundation { column });
        }
    }
    for cell in CellIndex::all() {
        if is_free_cell_to_foundation_legal(position, cell) {
            return Some(Move::FreeCellToFoundation { cell });
        }
    }
    None
}

/// All legal moves other than forced foundation moves, enumerated per
/// §4.3.4. Column-to-column moves are yielded largest-stack-first; this
/// affects search order only, never correctness.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::new();

    for suit in Suit::DRAGON_SUITS {
        if is_collect_dragons_legal(position, suit) {
            moves.push(Move::CollectDragons { suit });
        }
    }

    for from in ColumnIndex::all() {
        let natural = position.tableau().natural_stack_size(from);
        for to in ColumnIndex::all() {
            if from == to {
                continue;
            }
            for stack_size in (1..=natural).rev() {
                if column_to_column_legal_given_natural(position, from, to, stack_size as u8, natural) {
                    moves.push(Move::ColumnToColumn { from, to, stack_size: stack_size as u8 });
                }
            }
        }
    }

    for column in ColumnIndex::all() {
        if is_column_to_free_cell_legal(position, column) {
            moves.push(Move::ColumnToFreeCell { column });
        }
    }

    for cell in CellIndex::all() {
        for column in ColumnIndex::all() {
            if is_free_cell_to_column_legal(position, cell, column) {
                moves.push(Move::FreeCellToColumn { cell, column });
            }
        }
    }

    moves
}

/// Applies `mv` to a fresh clone of `position`. The rules engine never
/// mutates a `Position` once constructed.
pub fn apply(position: &Position, mv: &Move) -> Result<Position, MoveError> {
    let mut next = position.clone();
    match *mv {
        Move::ColumnToFoundation { column } => {
            if !is_column_to_foundation_legal(&next, column) {
                return Err(MoveError::FoundationRejectsCard);
            }
            let card = next.tableau_mut().pop(column).map_err(|_| MoveError::ColumnEmpty(column))?;
            next.foundations_mut().deposit(card).map_err(|_| MoveError::FoundationRejectsCard)?;
        }
        Move::FreeCellToFoundation { cell } => {
            let card = *next.free_cells().get(cell.index() as usize).ok_or(MoveError::CellEmpty(cell))?;
            if !next.foundations().accepts(&card) {
                return Err(MoveError::FoundationRejectsCard);
            }
            next.free_cells_mut().remove(card);
            next.foundations_mut().deposit(card).map_err(|_| MoveError::FoundationRejectsCard)?;
        }
        Move::ColumnToColumn { from, to, stack_size } => {
            let natural = next.tableau().natural_stack_size(from);
            if stack_size == 0 || stack_size as usize > natural {
                return Err(MoveError::StackTooLarge { requested: stack_size, available: natural });
            }
            if !is_column_to_column_legal(&next, from, to, stack_size) {
                return Err(MoveError::CardCannotStackOnDestination);
            }
            next.tableau_mut().move_stack(from, to, stack_size as usize);
        }
        Move::ColumnToFreeCell { column } => {
            if !is_column_to_free_cell_legal(&next, column) {
                return Err(MoveError::FreeCellsFull);
            }
            let card = next.tableau_mut().pop(column).map_err(|_| MoveError::ColumnEmpty(column))?;
            next.free_cells_mut().place(card).map_err(|_| MoveError::FreeCellsFull)?;
        }
        Move::FreeCellToColumn { cell, column } => {
            let card = *next.free_cells().get(cell.index() as usize).ok_or(MoveError::CellEmpty(cell))?;
            if card.is_face_down() {
                return Err(MoveError::FaceDownIsImmovable);
            }
            if !is_free_cell_to_column_legal(&next, cell, column) {
                return Err(MoveError::CardCannotStackOnDestination);
            }
            next.free_cells_mut().remove(card);
            next.tableau_mut().push(column, card);
        }
        Move::CollectDragons { suit } => {
            if !is_collect_dragons_legal(&next, suit) {
                let count = free_dragon_count(&next, suit);
                if count != 4 {
                    return Err(MoveError::DragonsNotAllFree(suit));
                }
                return Err(MoveError::NoRoomForCollection(suit));
            }
            for col in ColumnIndex::all() {
                if next.tableau().top(col).is_some_and(|c| c.is_dragon(Some(suit))) {
                    next.tableau_mut().pop(col).expect("top card present");
                }
            }
            while next.free_cells_mut().remove(Card::dragon(suit).expect("colored suit")) {}
            next.free_cells_mut().place(Card::face_down()).expect("room checked by is_collect_dragons_legal");
        }
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundations::Foundations;
    use crate::freecells::FreeCells;
    use crate::tableau::Tableau;
    use rstest::rstest;
    use std::collections::HashSet;

    fn col(i: u8) -> ColumnIndex {
        ColumnIndex::new(i).unwrap()
    }

    fn cell(i: u8) -> CellIndex {
        CellIndex::new(i).unwrap()
    }

    /// Fills whatever the deck invariant still requires into the
    /// highest-indexed empty column, so a fixture can place only the cards a
    /// test cares about and still pass `Position::new`'s validation.
    fn position_for_test(mut tableau: Tableau, free_cells: FreeCells, foundations: Foundations) -> Position {
        let all_cards: Vec<Card> = tableau.columns().flatten().copied().chain(free_cells.occupied().copied()).collect();
        let seen: HashSet<Card> = all_cards.iter().copied().collect();

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
            let dealt = all_cards.iter().filter(|c| c.is_dragon(Some(suit))).count();
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
    fn forced_move_prefers_first_column_over_free_cells() {
        let mut tableau = Tableau::empty();
        tableau.push(col(2), Card::numeric(Suit::Red, 1).unwrap());
        let free_cells = FreeCells::from_cards([Some(Card::numeric(Suit::Green, 1).unwrap()), None, None]);
        let position = position_for_test(tableau, free_cells, Foundations::empty());
        assert_eq!(find_forced_move(&position), Some(Move::ColumnToFoundation { column: col(2) }));
    }

    #[test]
    fn forced_move_falls_back_to_free_cells() {
        let free_cells = FreeCells::from_cards([None, Some(Card::special()), None]);
        let position = position_for_test(Tableau::empty(), free_cells, Foundations::empty());
        assert_eq!(find_forced_move(&position), Some(Move::FreeCellToFoundation { cell: cell(1) }));
    }

    #[test]
    fn no_forced_move_when_nothing_foundation_legal() {
        let mut tableau = Tableau::empty();
        tableau.push(col(0), Card::numeric(Suit::Red, 5).unwrap());
        let position = position_for_test(tableau, FreeCells::empty(), Foundations::empty());
        assert_eq!(find_forced_move(&position), None);
    }

    #[test]
    fn column_to_column_rejects_stack_larger_than_natural() {
        let mut tableau = Tableau::empty();
        tableau.push(col(0), Card::numeric(Suit::Red, 5).unwrap());
        let position = position_for_test(tableau, FreeCells::empty(), Foundations::empty());
        assert!(!is_column_to_column_legal(&position, col(0), col(1), 2));
    }

    #[test]
    fn column_to_column_onto_empty_is_always_legal() {
        let mut tableau = Tableau::empty();
        tableau.push(col(0), Card::numeric(Suit::Red, 5).unwrap());
        let position = position_for_test(tableau, FreeCells::empty(), Foundations::empty());
        assert!(is_column_to_column_legal(&position, col(0), col(1), 1));
    }

    #[rstest]
    #[case(0, true)]
    #[case(3, false)]
    fn dragon_collection_legality_depends_on_free_cell_room(#[case] non_matching_cells: usize, #[case] expected: bool) {
        let mut tableau = Tableau::empty();
        for i in 0..4 {
            tableau.push(col(i), Card::dragon(Suit::Green).unwrap());
        }
        let non_matching_cards =
            [Card::numeric(Suit::Red, 1).unwrap(), Card::numeric(Suit::Black, 1).unwrap(), Card::numeric(Suit::Red, 2).unwrap()];
        let mut cells = [None, None, None];
        for (slot, card) in cells.iter_mut().zip(non_matching_cards).take(non_matching_cells) {
            *slot = Some(card);
        }
        let free_cells = FreeCells::from_cards(cells);
        let position = position_for_test(tableau, free_cells, Foundations::empty());
        assert_eq!(is_collect_dragons_legal(&position, Suit::Green), expected);
    }

    #[test]
    fn dragon_collection_legal_when_one_cell_holds_matching_dragon_even_if_full() {
        let mut tableau = Tableau::empty();
        for i in 0..3 {
            tableau.push(col(i), Card::dragon(Suit::Green).unwrap());
        }
        let free_cells = FreeCells::from_cards([
            Some(Card::dragon(Suit::Green).unwrap()),
            Some(Card::numeric(Suit::Red, 1).unwrap()),
            Some(Card::numeric(Suit::Black, 1).unwrap()),
        ]);
        let position = position_for_test(tableau, free_cells, Foundations::empty());
        assert!(is_collect_dragons_legal(&position, Suit::Green));
    }

    #[test]
    fn apply_collect_dragons_leaves_one_face_down_cell() {
        let mut tableau = Tableau::empty();
        for i in 0..4 {
            tableau.push(col(i), Card::dragon(Suit::Green).unwrap());
        }
        let free_cells = FreeCells::from_cards([Some(Card::numeric(Suit::Red, 1).unwrap()), None, None]);
        let position = position_for_test(tableau, free_cells, Foundations::empty());
        let next = apply(&position, &Move::CollectDragons { suit: Suit::Green }).unwrap();
        assert!(next.free_cells().occupied().any(Card::is_face_down));
        for i in 0..4 {
            assert!(next.tableau().is_empty_column(col(i)));
        }
    }

    #[test]
    fn apply_rejects_illegal_move() {
        let position = position_for_test(Tableau::empty(), FreeCells::empty(), Foundations::empty());
        assert!(apply(&position, &Move::ColumnToFreeCell { column: col(0) }).is_err());
    }
}

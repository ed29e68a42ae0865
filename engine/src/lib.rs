//! A pure, type-safe implementation of Shenzhen Solitaire game logic.
//!
//! This crate provides the core building blocks for a Shenzhen Solitaire
//! solver: cards, positions, moves, rules, and canonicalization. It contains
//! only game logic — no UI, no I/O, no search.
//!
//! ## What is Shenzhen Solitaire?
//!
//! Shenzhen Solitaire (the solitaire minigame from *Shenzhen I/O*) is played
//! with a 40-card deck: a single Special card, and three colored suits (Red,
//! Green, Black) each holding the numbers 1-9 plus four identical dragons.
//!
//! ### Game Layout
//!
//! ```text
//! [FreeCells]      [Foundations]
//! [ ][ ][ ]        [Special][Red][Green][Black]
//!
//! [Tableau Columns]
//! [c0][c1][c2][c3][c4][c5][c6][c7]
//! ```
//!
//! - **The Tableau**: 8 columns. A card can stack on another if it is
//!   numerically one lower and a different colored suit.
//! - **The Free Cells**: 3 temporary slots. A dragon collection leaves a
//!   `FaceDown` placeholder in one of them.
//! - **The Foundations**: one slot per suit, tracking the highest value
//!   deposited so far. There is no foundation slot for `FaceDown`.
//!
//! ## Key Concepts
//!
//! - [`Move`](r#move::Move): a transfer of cards, or a dragon collection.
//! - [`Position`](position::Position): tableau + free cells + foundations.
//! - [`canonical::Fingerprint`]: a symmetry-collapsed key used to detect
//!   positions already visited by a search, even if reached with free cells
//!   or columns permuted differently.
//!
//! # Getting Started
//!
//! Construct a [`Position`](position::Position) from a dealt [`Tableau`],
//! validate it with [`Position::new`](position::Position::new), then drive
//! it with [`rules::legal_moves`] and [`rules::apply`].

pub mod canonical;
pub mod card;
pub mod foundations;
pub mod freecells;
pub mod location;
pub mod r#move;
pub mod position;
pub mod rules;
pub mod tableau;

pub use canonical::Fingerprint;
pub use card::{Card, Suit};
pub use foundations::Foundations;
pub use freecells::FreeCells;
pub use location::{CellIndex, ColumnIndex};
pub use position::Position;
pub use r#move::Move;
pub use tableau::Tableau;

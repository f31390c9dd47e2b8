//! Game-state engine for a falling-block puzzle.
//!
//! The engine owns a fixed-size [`Board`] of locked cells and at most one
//! falling [`Piece`]. An external clock drives it through [`Game::tick`],
//! and input handlers call the mutators ([`Game::move_left`],
//! [`Game::rotate`], ...) directly. Every mutator reports what happened as
//! [`GameEvents`] so renderers and audio/dialog layers can react.
//!
//! ```
//! use stackfall_engine::{Game, GameEvent, ShapeKind};
//!
//! let mut game = Game::with_source(|| ShapeKind::O);
//! let events = game.tick();
//! assert!(events.contains(&GameEvent::StateChanged));
//! assert_eq!(game.active_piece().map(|p| p.y()), Some(1));
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A cell value outside the palette range `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell value {value} is outside 0..=7")]
pub struct CellRangeError {
    pub value: u8,
}

/// Raw rows that cannot form a valid piece shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape has no rows")]
    Empty,
    #[display("shape has no occupied cells")]
    Blank,
    #[display("shape size {size} exceeds 4")]
    TooLarge { size: usize },
    #[display("row {row} has {len} cells in a shape of size {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[display("cell value {value} is outside the palette range")]
    CellRange { value: u8 },
    #[display("shape mixes identifiers {first} and {second}")]
    MixedIds { first: u8, second: u8 },
}

/// A piece seed that is not exactly 32 hexadecimal digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed {input:?}: expected 32 hex digits")]
pub struct SeedParseError {
    pub input: String,
}

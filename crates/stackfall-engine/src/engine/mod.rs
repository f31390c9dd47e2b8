//! Game rules on top of the core data structures.
//!
//! - [`Game`] - board, active piece, score and run state
//! - [`GameEvent`] - what a single engine call produced
//! - [`PieceSource`] - where the next shape kind comes from
//! - [`PieceSeed`] - seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. A clock calls [`Game::tick`] at a fixed interval
//! 2. The tick clears full rows, spawns a piece when none is active and
//!    moves the active piece down one row
//! 3. A piece that cannot move down is locked into the board
//! 4. Locking at the top row is game over; the engine reports
//!    [`GameEvent::GameOver`] and starts over on an empty board
//!
//! Input handlers call [`Game::move_left`], [`Game::move_right`],
//! [`Game::move_down`] and [`Game::rotate`] between ticks.
//!
//! # Example
//!
//! ```
//! use stackfall_engine::{Game, PieceSeed};
//!
//! let seed: PieceSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
//! let mut game = Game::with_seed(seed);
//!
//! game.tick();
//! game.move_left();
//! game.rotate();
//!
//! game.pause();
//! assert!(game.tick().is_empty());
//! ```

pub use self::{event::*, game::*, piece_source::*};

mod event;
mod game;
mod piece_source;

//! Chess rules on bitboards.
//!
//! This crate provides:
//! - [`ops`] - destination sets for every piece type, computed on bitboards
//! - [`PositionState`] - a `Copy` position with move generation and legality
//! - [`Game`] - a game in progress, with draw detection and move notation
//! - [`GameOptions`] - castling and repetition rule switches
//! - [`perft`](movegen::perft) for validating the generator
//!
//! # Legality
//!
//! Moves are generated pseudo-legally and then filtered by playing each one
//! on a copy of the position and asking whether the mover's king is
//! attacked. Nothing is ever undone.
//!
//! # Example
//!
//! ```
//! use chess_rules::{Game, Outcome};
//!
//! let mut game = Game::new();
//! for notation in ["f3", "e5", "g4"] {
//!     let m = game.parse_move(notation).unwrap();
//!     assert_eq!(game.play_move(m), Outcome::None);
//! }
//! let mate = game.parse_move("Qh4#").unwrap();
//! assert_eq!(game.notate_move(mate), "Qh4#");
//! assert_eq!(game.play_move(mate), Outcome::BlackWin);
//! ```

mod game;
pub mod movegen;
pub mod notation;
pub mod ops;
mod options;
mod position;

pub use game::{Game, GameMove, Outcome};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::MoveList;
pub use notation::MoveParseError;
pub use options::{CastlingCheck, GameOptions, RepetitionKey};
pub use position::{CheckState, PositionState};

//! Value types for chess.
//!
//! Everything here is a small fixed-width value, cheap to copy:
//! - [`Color`], [`PieceType`] and the byte-packed [`Piece`]
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] packed into 16 bits, tagged with a [`MoveType`]
//! - [`Bitboard`], [`HalfBoard`] and [`Board`] for piece placement
//! - [`CastlingRight`] per color
//! - FEN parsing and serialization via [`Fen`]

mod bitboard;
mod board;
mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use board::{Board, HalfBoard};
pub use castling::CastlingRight;
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{Move, MoveType};
pub use piece::{Piece, PieceType};
pub use square::{File, Rank, Square, SquareParseError};

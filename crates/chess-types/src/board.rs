//! Piece placement: six bitboards per color.

use crate::{Bitboard, Color, Piece, PieceType, Square};
use std::fmt;

/// The pieces of one color, one bitboard per piece type.
///
/// The six masks never share a bit: [`HalfBoard::set`] clears a square from
/// every mask before placing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HalfBoard {
    masks: [Bitboard; 6],
}

impl HalfBoard {
    pub const EMPTY: HalfBoard = HalfBoard {
        masks: [Bitboard::EMPTY; 6],
    };

    pub const STARTING_WHITE: HalfBoard = HalfBoard {
        masks: [
            Bitboard(0xff00),
            Bitboard(0x42),
            Bitboard(0x24),
            Bitboard(0x81),
            Bitboard(0x8),
            Bitboard(0x10),
        ],
    };

    pub const STARTING_BLACK: HalfBoard = HalfBoard {
        masks: [
            Bitboard(0x00ff_0000_0000_0000),
            Bitboard(0x4200_0000_0000_0000),
            Bitboard(0x2400_0000_0000_0000),
            Bitboard(0x8100_0000_0000_0000),
            Bitboard(0x0800_0000_0000_0000),
            Bitboard(0x1000_0000_0000_0000),
        ],
    };

    /// Squares holding a piece of the given type.
    ///
    /// # Panics
    /// Panics for `PieceType::None`.
    #[inline]
    pub const fn mask(&self, piece_type: PieceType) -> Bitboard {
        self.masks[piece_type.index()]
    }

    #[inline]
    pub const fn pawns(&self) -> Bitboard {
        self.masks[0]
    }

    #[inline]
    pub const fn knights(&self) -> Bitboard {
        self.masks[1]
    }

    #[inline]
    pub const fn bishops(&self) -> Bitboard {
        self.masks[2]
    }

    #[inline]
    pub const fn rooks(&self) -> Bitboard {
        self.masks[3]
    }

    #[inline]
    pub const fn queens(&self) -> Bitboard {
        self.masks[4]
    }

    #[inline]
    pub const fn king(&self) -> Bitboard {
        self.masks[5]
    }

    /// Union of all six masks.
    #[inline]
    pub const fn any(&self) -> Bitboard {
        Bitboard(
            self.masks[0].0
                | self.masks[1].0
                | self.masks[2].0
                | self.masks[3].0
                | self.masks[4].0
                | self.masks[5].0,
        )
    }

    /// Piece type on `sq`, testing Pawn through King in order.
    pub fn get(&self, sq: Square) -> PieceType {
        PieceType::ALL
            .into_iter()
            .find(|t| self.masks[t.index()].contains(sq))
            .unwrap_or(PieceType::None)
    }

    /// Clears `sq` from every mask, then places `piece_type` (unless `None`).
    pub fn set(&mut self, sq: Square, piece_type: PieceType) {
        for mask in &mut self.masks {
            mask.clear(sq);
        }
        if piece_type != PieceType::None {
            self.masks[piece_type.index()].set(sq);
        }
    }
}

impl fmt::Debug for HalfBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HalfBoard")
            .field("pawns", &format_args!("{:#x}", self.pawns().0))
            .field("knights", &format_args!("{:#x}", self.knights().0))
            .field("bishops", &format_args!("{:#x}", self.bishops().0))
            .field("rooks", &format_args!("{:#x}", self.rooks().0))
            .field("queens", &format_args!("{:#x}", self.queens().0))
            .field("king", &format_args!("{:#x}", self.king().0))
            .finish()
    }
}

/// Full piece placement for both colors.
///
/// A square is occupied by at most one color: [`Board::set`] always clears
/// the square from the opposite color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Board {
    white: HalfBoard,
    black: HalfBoard,
}

impl Board {
    pub const EMPTY: Board = Board {
        white: HalfBoard::EMPTY,
        black: HalfBoard::EMPTY,
    };

    pub const STARTING_POSITION: Board = Board {
        white: HalfBoard::STARTING_WHITE,
        black: HalfBoard::STARTING_BLACK,
    };

    #[inline]
    pub const fn white(&self) -> &HalfBoard {
        &self.white
    }

    #[inline]
    pub const fn black(&self) -> &HalfBoard {
        &self.black
    }

    #[inline]
    pub const fn side(&self, color: Color) -> &HalfBoard {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    #[inline]
    pub const fn occupied(&self) -> Bitboard {
        Bitboard(self.white.any().0 | self.black.any().0)
    }

    #[inline]
    pub const fn empty(&self) -> Bitboard {
        Bitboard(!self.occupied().0)
    }

    /// Piece on `sq`; Black is consulted first, `Piece::NONE` if empty.
    pub fn get(&self, sq: Square) -> Piece {
        match self.black.get(sq) {
            PieceType::None => match self.white.get(sq) {
                PieceType::None => Piece::NONE,
                t => Piece::new(Color::White, t),
            },
            t => Piece::new(Color::Black, t),
        }
    }

    /// Places `piece` on `sq` and clears the square from the other color.
    ///
    /// An empty piece of either color clears the square entirely.
    pub fn set(&mut self, sq: Square, piece: Piece) {
        let (place, clear) = match piece.color() {
            Color::White => (&mut self.white, &mut self.black),
            Color::Black => (&mut self.black, &mut self.white),
        };
        place.set(sq, piece.piece_type());
        clear.set(sq, PieceType::None);
    }

    /// Iterates over occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().into_iter().map(|sq| (sq, self.get(sq)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let sq = Square::from_index_masked(rank * 8 + file);
                write!(f, "{} ", self.get(sq).fen_char().unwrap_or('.'))?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

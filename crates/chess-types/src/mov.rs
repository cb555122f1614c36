//! Packed move representation.

use crate::{PieceType, Square};
use std::fmt;

/// The 4-bit move-type tag stored in the high bits of a [`Move`].
///
/// Promotion tags share their numeric value with the matching [`PieceType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum MoveType {
    /// Ordinary move or capture.
    #[default]
    Quiet = 0,
    EnPassant = 1,
    PromoteKnight = 2,
    PromoteBishop = 3,
    PromoteRook = 4,
    PromoteQueen = 5,
    /// King-side castling (O-O).
    ShortCastle = 6,
    /// Queen-side castling (O-O-O).
    LongCastle = 7,
    /// Pawn advance from its starting rank by two squares.
    PawnTwoSquares = 8,
}

impl MoveType {
    /// Promotion tags in the order the generator emits them.
    pub const PROMOTIONS: [MoveType; 4] = [
        MoveType::PromoteQueen,
        MoveType::PromoteRook,
        MoveType::PromoteBishop,
        MoveType::PromoteKnight,
    ];

    /// Decodes a 4-bit tag.
    ///
    /// # Panics
    /// Panics on tags 9-15, which no constructor produces.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            0 => MoveType::Quiet,
            1 => MoveType::EnPassant,
            2 => MoveType::PromoteKnight,
            3 => MoveType::PromoteBishop,
            4 => MoveType::PromoteRook,
            5 => MoveType::PromoteQueen,
            6 => MoveType::ShortCastle,
            7 => MoveType::LongCastle,
            8 => MoveType::PawnTwoSquares,
            _ => panic!("unknown move type tag"),
        }
    }

    /// Returns the promotion tag for a piece type, if it is a legal promotion.
    #[inline]
    pub const fn promotion_to(piece: PieceType) -> Option<Self> {
        match piece {
            PieceType::Knight => Some(MoveType::PromoteKnight),
            PieceType::Bishop => Some(MoveType::PromoteBishop),
            PieceType::Rook => Some(MoveType::PromoteRook),
            PieceType::Queen => Some(MoveType::PromoteQueen),
            _ => None,
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceType> {
        match self {
            MoveType::PromoteKnight => Some(PieceType::Knight),
            MoveType::PromoteBishop => Some(PieceType::Bishop),
            MoveType::PromoteRook => Some(PieceType::Rook),
            MoveType::PromoteQueen => Some(PieceType::Queen),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveType::ShortCastle | MoveType::LongCastle)
    }
}

/// A chess move packed into 16 bits.
///
/// Layout: `[type: 4][destination: 6][source: 6]`. Equality and hashing
/// compare the raw value, so two moves between the same squares with
/// different type tags are different moves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    #[inline]
    pub const fn new(src: Square, dst: Square, move_type: MoveType) -> Self {
        Move((src.index() as u16) | ((dst.index() as u16) << 6) | ((move_type as u16) << 12))
    }

    /// Creates an ordinary move.
    #[inline]
    pub const fn quiet(src: Square, dst: Square) -> Self {
        Self::new(src, dst, MoveType::Quiet)
    }

    #[inline]
    pub const fn src(self) -> Square {
        Square::from_index_masked((self.0 & 0x3F) as u8)
    }

    #[inline]
    pub const fn dst(self) -> Square {
        Square::from_index_masked(((self.0 >> 6) & 0x3F) as u8)
    }

    #[inline]
    pub const fn move_type(self) -> MoveType {
        MoveType::from_bits((self.0 >> 12) as u8)
    }

    /// Returns a copy with the type tag replaced.
    #[inline]
    pub const fn with_type(self, move_type: MoveType) -> Self {
        Move((self.0 & 0x0FFF) | ((move_type as u16) << 12))
    }

    /// Returns a copy with the type tag cleared, for comparing by squares only.
    #[inline]
    pub const fn untyped(self) -> Self {
        Move(self.0 & 0x0FFF)
    }

    /// Returns the raw packed value.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Coordinate form such as `"e2e4"` or `"e7e8q"`.
    pub fn to_uci(self) -> String {
        let promo = match self.move_type().promotion_piece() {
            Some(PieceType::Knight) => "n",
            Some(PieceType::Bishop) => "b",
            Some(PieceType::Rook) => "r",
            Some(PieceType::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.src(), self.dst(), promo)
    }

    /// Parses coordinate form. The type tag is only set for promotions; a
    /// rules engine fills in castle/en-passant/double-push tags.
    pub fn from_uci(s: &str) -> Option<Self> {
        let src = Square::from_algebraic(s.get(0..2)?)?;
        let dst = Square::from_algebraic(s.get(2..4)?)?;
        let move_type = match &s[4..] {
            "" => MoveType::Quiet,
            "n" => MoveType::PromoteKnight,
            "b" => MoveType::PromoteBishop,
            "r" => MoveType::PromoteRook,
            "q" => MoveType::PromoteQueen,
            _ => return None,
        };
        Some(Move::new(src, dst, move_type))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {:?})", self.to_uci(), self.move_type())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

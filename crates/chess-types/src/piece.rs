//! Chess piece representation.

use crate::Color;
use std::fmt;

/// The kinds of chess pieces, plus `None` for an empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceType {
    None = 0,
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceType {
    /// The six real piece types, in board lookup order.
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Decodes a 3-bit type tag.
    ///
    /// # Panics
    /// Panics on a tag outside 0-6; such a tag can only come from a corrupted
    /// packed value.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            0 => PieceType::None,
            1 => PieceType::Pawn,
            2 => PieceType::Knight,
            3 => PieceType::Bishop,
            4 => PieceType::Rook,
            5 => PieceType::Queen,
            6 => PieceType::King,
            _ => panic!("unknown piece type tag"),
        }
    }

    /// Returns the index among the six real types (Pawn = 0 .. King = 5).
    ///
    /// # Panics
    /// Panics for `PieceType::None`.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceType::None => panic!("PieceType::None has no board index"),
            _ => self as usize - 1,
        }
    }

    /// Upper-case letter used in move notation; pawns have none.
    pub const fn san_char(self) -> Option<char> {
        match self {
            PieceType::Knight => Some('N'),
            PieceType::Bishop => Some('B'),
            PieceType::Rook => Some('R'),
            PieceType::Queen => Some('Q'),
            PieceType::King => Some('K'),
            PieceType::Pawn | PieceType::None => None,
        }
    }

    /// Parses a notation piece letter (case-sensitive, `N B R Q K`).
    pub const fn from_san_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::None => "None",
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A colored piece packed into one byte.
///
/// Layout: bit 3 is the color (0 = White, 1 = Black), bits 0-2 the
/// [`PieceType`] tag. An empty square is `Piece::NONE` (White, `None`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece(u8);

impl Piece {
    const COLOR_BIT: u8 = 0x8;
    const TYPE_MASK: u8 = 0x7;

    pub const NONE: Piece = Piece(0);
    pub const WHITE_PAWN: Piece = Piece::new(Color::White, PieceType::Pawn);
    pub const WHITE_KNIGHT: Piece = Piece::new(Color::White, PieceType::Knight);
    pub const WHITE_BISHOP: Piece = Piece::new(Color::White, PieceType::Bishop);
    pub const WHITE_ROOK: Piece = Piece::new(Color::White, PieceType::Rook);
    pub const WHITE_QUEEN: Piece = Piece::new(Color::White, PieceType::Queen);
    pub const WHITE_KING: Piece = Piece::new(Color::White, PieceType::King);
    pub const BLACK_PAWN: Piece = Piece::new(Color::Black, PieceType::Pawn);
    pub const BLACK_KNIGHT: Piece = Piece::new(Color::Black, PieceType::Knight);
    pub const BLACK_BISHOP: Piece = Piece::new(Color::Black, PieceType::Bishop);
    pub const BLACK_ROOK: Piece = Piece::new(Color::Black, PieceType::Rook);
    pub const BLACK_QUEEN: Piece = Piece::new(Color::Black, PieceType::Queen);
    pub const BLACK_KING: Piece = Piece::new(Color::Black, PieceType::King);

    /// Packs a color and piece type.
    #[inline]
    pub const fn new(color: Color, piece_type: PieceType) -> Self {
        let color_bits = match color {
            Color::White => 0,
            Color::Black => Self::COLOR_BIT,
        };
        Piece(color_bits | piece_type as u8)
    }

    /// Rebuilds a piece from its packed byte.
    ///
    /// # Panics
    /// Panics if the type tag is not a valid [`PieceType`].
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        PieceType::from_bits(bits & Self::TYPE_MASK);
        Piece(bits & (Self::COLOR_BIT | Self::TYPE_MASK))
    }

    /// Returns the packed byte.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn color(self) -> Color {
        if self.0 & Self::COLOR_BIT == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn piece_type(self) -> PieceType {
        PieceType::from_bits(self.0 & Self::TYPE_MASK)
    }

    /// Returns true for an empty square.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 & Self::TYPE_MASK == 0
    }

    /// Parses a FEN piece letter.
    pub const fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece_type = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some(Piece::new(color, piece_type))
    }

    /// Returns the FEN letter, or `None` for an empty square.
    pub const fn fen_char(self) -> Option<char> {
        let c = match self.piece_type() {
            PieceType::None => return None,
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        Some(match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        })
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "Piece(None)")
        } else {
            write!(f, "Piece({} {})", self.color(), self.piece_type())
        }
    }
}

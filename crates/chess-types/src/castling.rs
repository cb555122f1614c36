//! Per-color castling availability.

/// Which castling moves one color may still make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CastlingRight {
    #[default]
    None = 0,
    KingSide = 1,
    QueenSide = 2,
    Both = 3,
}

impl CastlingRight {
    const KING_SIDE: u8 = CastlingRight::KingSide as u8;
    const QUEEN_SIDE: u8 = CastlingRight::QueenSide as u8;

    #[inline]
    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => CastlingRight::None,
            1 => CastlingRight::KingSide,
            2 => CastlingRight::QueenSide,
            _ => CastlingRight::Both,
        }
    }

    #[inline]
    pub const fn has_king_side(self) -> bool {
        self as u8 & Self::KING_SIDE != 0
    }

    #[inline]
    pub const fn has_queen_side(self) -> bool {
        self as u8 & Self::QUEEN_SIDE != 0
    }

    #[inline]
    #[must_use]
    pub const fn add_king_side(self) -> Self {
        Self::from_bits(self as u8 | Self::KING_SIDE)
    }

    #[inline]
    #[must_use]
    pub const fn add_queen_side(self) -> Self {
        Self::from_bits(self as u8 | Self::QUEEN_SIDE)
    }

    #[inline]
    #[must_use]
    pub const fn remove_king_side(self) -> Self {
        Self::from_bits(self as u8 & Self::QUEEN_SIDE)
    }

    #[inline]
    #[must_use]
    pub const fn remove_queen_side(self) -> Self {
        Self::from_bits(self as u8 & Self::KING_SIDE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove() {
        let r = CastlingRight::None.add_king_side();
        assert_eq!(r, CastlingRight::KingSide);
        let r = r.add_queen_side();
        assert_eq!(r, CastlingRight::Both);
        assert_eq!(r.remove_king_side(), CastlingRight::QueenSide);
        assert_eq!(r.remove_queen_side(), CastlingRight::KingSide);
        assert_eq!(
            r.remove_king_side().remove_queen_side(),
            CastlingRight::None
        );
    }

    #[test]
    fn queries() {
        assert!(CastlingRight::Both.has_king_side());
        assert!(CastlingRight::Both.has_queen_side());
        assert!(!CastlingRight::KingSide.has_queen_side());
        assert!(!CastlingRight::None.has_king_side());
    }

    #[test]
    fn removing_absent_side_is_noop() {
        assert_eq!(
            CastlingRight::QueenSide.remove_king_side(),
            CastlingRight::QueenSide
        );
    }
}

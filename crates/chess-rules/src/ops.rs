//! Destination sets for each piece type, computed directly on bitboards.
//!
//! Every function here is total and allocation-free: it maps a set of
//! origin squares (and, for sliders and pawn pushes, the set of empty
//! squares) to the union of their destinations, returning
//! [`Bitboard::EMPTY`] when there are none. Horizontal wraparound is masked
//! off before each shift.
//!
//! Sliders use a "slide while empty" fill rather than lookup tables. Each
//! ray stops at, and includes, the first occupied square it reaches, so the
//! result contains possible captures of either color; callers mask out their
//! own pieces.

use chess_types::{Bitboard, Color};

const NOT_A: u64 = Bitboard::NOT_A_FILE.0;
const NOT_H: u64 = Bitboard::NOT_H_FILE.0;
const NOT_AB: u64 = Bitboard::NOT_AB_FILE.0;
const NOT_GH: u64 = Bitboard::NOT_GH_FILE.0;
const RANK_2: u64 = Bitboard::RANK_2.0;
const RANK_7: u64 = Bitboard::RANK_7.0;

/// Knight destinations from every square in `bits`.
#[inline]
pub const fn knight_moves(bits: Bitboard) -> Bitboard {
    let b = bits.0;
    let lr1 = ((b & NOT_A) >> 1) | ((b & NOT_H) << 1);
    let lr1_ud2 = (lr1 >> 16) | (lr1 << 16);
    let ud1 = (b >> 8) | (b << 8);
    let ud1_lr2 = ((ud1 & NOT_AB) >> 2) | ((ud1 & NOT_GH) << 2);
    Bitboard(lr1_ud2 | ud1_lr2)
}

/// King destinations from every square in `bits`.
#[inline]
pub const fn king_moves(bits: Bitboard) -> Bitboard {
    let mut res = bits.0;
    res |= ((res & NOT_A) >> 1) | ((res & NOT_H) << 1);
    res |= (res >> 8) | (res << 8);
    Bitboard(res & !bits.0)
}

/// Fills toward higher square indices along one direction.
const fn slide_up(mut bits: u64, shift: u32, mask: u64, empty: u64) -> u64 {
    loop {
        let added = ((bits & mask) << shift) & empty;
        if added & bits == added {
            return (bits & mask) << shift;
        }
        bits |= added;
    }
}

/// Fills toward lower square indices along one direction.
const fn slide_down(mut bits: u64, shift: u32, mask: u64, empty: u64) -> u64 {
    loop {
        let added = ((bits & mask) >> shift) & empty;
        if added & bits == added {
            return (bits & mask) >> shift;
        }
        bits |= added;
    }
}

/// Diagonal slides from every square in `bits`.
#[inline]
pub const fn bishop_moves(bits: Bitboard, empty: Bitboard) -> Bitboard {
    let (b, e) = (bits.0, empty.0);
    Bitboard(
        slide_down(b, 9, NOT_A, e)
            | slide_down(b, 7, NOT_H, e)
            | slide_up(b, 9, NOT_H, e)
            | slide_up(b, 7, NOT_A, e),
    )
}

/// Orthogonal slides from every square in `bits`.
#[inline]
pub const fn rook_moves(bits: Bitboard, empty: Bitboard) -> Bitboard {
    let (b, e) = (bits.0, empty.0);
    Bitboard(
        slide_down(b, 1, NOT_A, e)
            | slide_down(b, 8, !0, e)
            | slide_up(b, 1, NOT_H, e)
            | slide_up(b, 8, !0, e),
    )
}

/// Union of bishop and rook slides.
#[inline]
pub const fn queen_moves(bits: Bitboard, empty: Bitboard) -> Bitboard {
    Bitboard(bishop_moves(bits, empty).0 | rook_moves(bits, empty).0)
}

/// Squares diagonally in front of white pawns, occupied or not.
#[inline]
pub const fn white_pawn_attacks(bits: Bitboard) -> Bitboard {
    Bitboard(((bits.0 & NOT_A) << 7) | ((bits.0 & NOT_H) << 9))
}

/// Squares diagonally in front of black pawns, occupied or not.
#[inline]
pub const fn black_pawn_attacks(bits: Bitboard) -> Bitboard {
    Bitboard(((bits.0 & NOT_A) >> 9) | ((bits.0 & NOT_H) >> 7))
}

#[inline]
pub const fn white_pawn_forward(bits: Bitboard, empty: Bitboard) -> Bitboard {
    Bitboard((bits.0 << 8) & empty.0)
}

#[inline]
pub const fn black_pawn_forward(bits: Bitboard, empty: Bitboard) -> Bitboard {
    Bitboard((bits.0 >> 8) & empty.0)
}

/// Two-square advances from rank 2; both squares ahead must be empty.
#[inline]
pub const fn white_pawn_two_squares(bits: Bitboard, empty: Bitboard) -> Bitboard {
    Bitboard(((((bits.0 & RANK_2) << 8) & empty.0) << 8) & empty.0)
}

/// Two-square advances from rank 7; both squares ahead must be empty.
#[inline]
pub const fn black_pawn_two_squares(bits: Bitboard, empty: Bitboard) -> Bitboard {
    Bitboard(((((bits.0 & RANK_7) >> 8) & empty.0) >> 8) & empty.0)
}

#[inline]
pub const fn pawn_attacks(color: Color, bits: Bitboard) -> Bitboard {
    match color {
        Color::White => white_pawn_attacks(bits),
        Color::Black => black_pawn_attacks(bits),
    }
}

#[inline]
pub const fn pawn_forward(color: Color, bits: Bitboard, empty: Bitboard) -> Bitboard {
    match color {
        Color::White => white_pawn_forward(bits, empty),
        Color::Black => black_pawn_forward(bits, empty),
    }
}

#[inline]
pub const fn pawn_two_squares(color: Color, bits: Bitboard, empty: Bitboard) -> Bitboard {
    match color {
        Color::White => white_pawn_two_squares(bits, empty),
        Color::Black => black_pawn_two_squares(bits, empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_types::Square;

    fn bb(squares: &[&str]) -> Bitboard {
        squares
            .iter()
            .map(|s| Square::parse(s).unwrap())
            .collect()
    }

    #[test]
    fn knight_center_and_corners() {
        assert_eq!(knight_moves(bb(&["d4"])).count(), 8);
        assert_eq!(knight_moves(bb(&["a1"])), bb(&["b3", "c2"]));
        assert_eq!(knight_moves(bb(&["h8"])), bb(&["g6", "f7"]));
        assert_eq!(knight_moves(bb(&["g1"])), bb(&["e2", "f3", "h3"]));
        assert_eq!(knight_moves(Bitboard::EMPTY), Bitboard::EMPTY);
    }

    #[test]
    fn knight_never_wraps() {
        for sq in Bitboard::FULL {
            let dests = knight_moves(Bitboard::from_square(sq));
            for d in dests {
                let df = (d.file().index() as i8 - sq.file().index() as i8).abs();
                let dr = (d.rank().index() as i8 - sq.rank().index() as i8).abs();
                assert!(matches!((df, dr), (1, 2) | (2, 1)), "{} -> {}", sq, d);
            }
        }
    }

    #[test]
    fn king_steps() {
        assert_eq!(king_moves(bb(&["e4"])).count(), 8);
        assert_eq!(king_moves(bb(&["a1"])), bb(&["a2", "b1", "b2"]));
        assert_eq!(king_moves(bb(&["h5"])), bb(&["g4", "g5", "g6", "h4", "h6"]));
    }

    #[test]
    fn rook_slide_stops_on_first_blocker() {
        let empty = !bb(&["d6", "f4"]);
        let moves = rook_moves(bb(&["d4"]), empty & !bb(&["d4"]));
        assert!(moves.contains(Square::parse("d6").unwrap()));
        assert!(!moves.contains(Square::parse("d7").unwrap()));
        assert!(moves.contains(Square::parse("f4").unwrap()));
        assert!(!moves.contains(Square::parse("g4").unwrap()));
        assert!(moves.contains(Square::parse("a4").unwrap()));
        assert!(moves.contains(Square::parse("d1").unwrap()));
        assert!(!moves.contains(Square::parse("d4").unwrap()));
        assert_eq!(moves.count(), 2 + 2 + 3 + 3);
    }

    #[test]
    fn rook_on_empty_board() {
        let sq = bb(&["a1"]);
        assert_eq!(rook_moves(sq, !sq).count(), 14);
        let sq = bb(&["h4"]);
        assert_eq!(rook_moves(sq, !sq).count(), 14);
    }

    #[test]
    fn bishop_slides_without_wrapping() {
        let sq = bb(&["h1"]);
        let moves = bishop_moves(sq, !sq);
        assert_eq!(moves, bb(&["g2", "f3", "e4", "d5", "c6", "b7", "a8"]));
        let sq = bb(&["d4"]);
        assert_eq!(bishop_moves(sq, !sq).count(), 13);
    }

    #[test]
    fn adjacent_blocker_is_included() {
        let origin = bb(&["c1"]);
        let empty = !(origin | bb(&["b2", "d2"]));
        assert_eq!(bishop_moves(origin, empty), bb(&["b2", "d2"]));
    }

    #[test]
    fn queen_is_union() {
        let sq = bb(&["d4"]);
        assert_eq!(queen_moves(sq, !sq).count(), 27);
    }

    #[test]
    fn pawn_attacks_mask_edges() {
        assert_eq!(white_pawn_attacks(bb(&["a2"])), bb(&["b3"]));
        assert_eq!(white_pawn_attacks(bb(&["h2"])), bb(&["g3"]));
        assert_eq!(black_pawn_attacks(bb(&["a7"])), bb(&["b6"]));
        assert_eq!(black_pawn_attacks(bb(&["e5"])), bb(&["d4", "f4"]));
        assert_eq!(pawn_attacks(Color::White, bb(&["e4"])), bb(&["d5", "f5"]));
    }

    #[test]
    fn pawn_pushes() {
        let empty = !(Bitboard::RANK_2 | Bitboard::RANK_7 | bb(&["e3"]));
        let white = Bitboard::RANK_2;
        assert_eq!(white_pawn_forward(white, empty).count(), 7);
        let two = white_pawn_two_squares(white, empty);
        assert_eq!(two.count(), 7);
        assert!(!two.contains(Square::parse("e4").unwrap()));

        let black = Bitboard::RANK_7;
        assert_eq!(pawn_forward(Color::Black, black, empty).count(), 8);
        assert_eq!(pawn_two_squares(Color::Black, black, empty).count(), 8);
    }

    #[test]
    fn two_squares_only_from_start_rank() {
        let pawn = bb(&["e3"]);
        assert!(white_pawn_two_squares(pawn, !pawn).is_empty());
        let pawn = bb(&["e6"]);
        assert!(black_pawn_two_squares(pawn, !pawn).is_empty());
    }
}

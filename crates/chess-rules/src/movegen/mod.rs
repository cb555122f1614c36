//! Candidate move generation.
//!
//! Candidates are pseudo-legal: every move a piece could make on the current
//! board, ignoring whether it leaves the mover's king attacked. Filtering is
//! done by [`PositionState::legal_moves_with`], which replays each candidate
//! on a copy.

pub mod perft;

use chess_types::{Bitboard, CastlingRight, Color, Move, MoveType, Square};

use crate::ops;
use crate::options::CastlingCheck;
use crate::position::PositionState;

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves; pseudo-legal counts stay
/// well under 256 as well, so no heap allocation is needed.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub const MAX_MOVES: usize = 256;

    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::quiet(Square::A1, Square::A1); Self::MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true, keeping order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }

    pub fn to_vec(&self) -> Vec<Move> {
        self.as_slice().to_vec()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates every pseudo-legal move for the side to move.
pub fn generate_candidates(position: &PositionState, castling: CastlingCheck) -> MoveList {
    let mut moves = MoveList::new();
    generate_pawn_moves(position, &mut moves);
    generate_piece_moves(position, &mut moves);
    generate_castling_moves(position, castling, &mut moves);
    moves
}

/// Pushes `src -> dst`, expanding to all four promotions on the last rank.
fn push_pawn_move(moves: &mut MoveList, src: Square, dst: Square, last_rank: u8) {
    if dst.rank().index() == last_rank {
        for promotion in MoveType::PROMOTIONS {
            moves.push(Move::new(src, dst, promotion));
        }
    } else {
        moves.push(Move::quiet(src, dst));
    }
}

fn generate_pawn_moves(position: &PositionState, moves: &mut MoveList) {
    let us = position.side_to_move;
    let board = &position.board;
    let empty = board.empty();
    let theirs = board.side(us.opposite()).any();
    let pawns = board.side(us).pawns();

    let (push, last_rank) = match us {
        Color::White => (8i8, 7u8),
        Color::Black => (-8i8, 0u8),
    };

    for dst in ops::pawn_forward(us, pawns, empty) {
        if let Some(src) = dst.offset(-push) {
            push_pawn_move(moves, src, dst, last_rank);
        }
    }

    for dst in ops::pawn_two_squares(us, pawns, empty) {
        if let Some(src) = dst.offset(-2 * push) {
            moves.push(Move::new(src, dst, MoveType::PawnTwoSquares));
        }
    }

    for src in pawns {
        let attacks = ops::pawn_attacks(us, Bitboard::from_square(src));
        for dst in attacks & theirs {
            push_pawn_move(moves, src, dst, last_rank);
        }
        for dst in attacks & position.en_passant {
            moves.push(Move::new(src, dst, MoveType::EnPassant));
        }
    }
}

/// Knights, bishops, rooks, queens and the king.
///
/// Queens are generated twice, once along diagonals and once along
/// files and ranks; the two sets never overlap.
fn generate_piece_moves(position: &PositionState, moves: &mut MoveList) {
    let board = &position.board;
    let ours = board.side(position.side_to_move);
    let own = ours.any();
    let empty = board.empty();

    let mut push_all = |src: Square, dests: Bitboard| {
        for dst in dests & !own {
            moves.push(Move::quiet(src, dst));
        }
    };

    for src in ours.knights() {
        push_all(src, ops::knight_moves(Bitboard::from_square(src)));
    }
    for src in ours.bishops() | ours.queens() {
        push_all(src, ops::bishop_moves(Bitboard::from_square(src), empty));
    }
    for src in ours.rooks() | ours.queens() {
        push_all(src, ops::rook_moves(Bitboard::from_square(src), empty));
    }
    for src in ours.king() {
        push_all(src, ops::king_moves(Bitboard::from_square(src)));
    }
}

/// Castling needs the right and empty squares between king and rook.
///
/// Under [`CastlingCheck::Strict`] the king must also not be in check and
/// must not pass over an attacked square. The landing square is left to
/// the legality filter in both modes.
fn generate_castling_moves(
    position: &PositionState,
    castling: CastlingCheck,
    moves: &mut MoveList,
) {
    let us = position.side_to_move;
    let rights = position.castling(us);
    if rights == CastlingRight::None {
        return;
    }

    let offset = us.back_rank_offset();
    let back_rank = position.board.occupied().bits() >> offset;
    let king = Square::from_index_masked(4 + offset);
    let them = us.opposite();
    let strict = castling == CastlingCheck::Strict;
    if strict && position.is_square_attacked(king, them) {
        return;
    }

    let safe = |file: u8| {
        !strict || !position.is_square_attacked(Square::from_index_masked(file + offset), them)
    };

    if rights.has_king_side() && back_rank & 0x60 == 0 && safe(5) {
        moves.push(Move::new(
            king,
            Square::from_index_masked(6 + offset),
            MoveType::ShortCastle,
        ));
    }
    if rights.has_queen_side() && back_rank & 0x0e == 0 && safe(3) {
        moves.push(Move::new(
            king,
            Square::from_index_masked(2 + offset),
            MoveType::LongCastle,
        ));
    }
}

//! Full position state and move application.
//!
//! [`PositionState`] is a plain `Copy` value. Anything speculative ("what if
//! this move were played") is done on a copy, which is then dropped; the
//! original is never touched.

use chess_types::{
    Bitboard, Board, CastlingRight, Color, Fen, FenError, Move, MoveType, Piece, PieceType, Square,
};

use crate::movegen::{self, MoveList};
use crate::ops;
use crate::options::CastlingCheck;

/// Whether a move gives check, and whether that check is mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckState {
    None,
    Check,
    Checkmate,
}

/// Complete chess position state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionState {
    pub board: Board,

    pub side_to_move: Color,

    pub white_castling: CastlingRight,

    pub black_castling: CastlingRight,

    /// The square a pawn may capture onto en passant; at most one bit set.
    pub en_passant: Bitboard,

    /// Plies played, incremented on every move.
    pub half_moves: u32,

    /// Full-move number, incremented after Black moves.
    pub full_moves: u32,
}

impl PositionState {
    /// Creates the standard starting position.
    pub const fn startpos() -> Self {
        Self::from_parsed(Fen::startpos())
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Fen::parse(fen).map(Self::from_parsed)
    }

    pub const fn from_parsed(fen: Fen) -> Self {
        PositionState {
            board: fen.board,
            side_to_move: fen.side_to_move,
            white_castling: fen.white_castling,
            black_castling: fen.black_castling,
            en_passant: match fen.en_passant {
                Some(sq) => Bitboard::from_square(sq),
                None => Bitboard::EMPTY,
            },
            half_moves: fen.half_moves,
            full_moves: fen.full_moves,
        }
    }

    /// Snapshot as a FEN record.
    pub fn fen(&self) -> Fen {
        Fen {
            board: self.board,
            side_to_move: self.side_to_move,
            white_castling: self.white_castling,
            black_castling: self.black_castling,
            en_passant: self.en_passant.lsb(),
            half_moves: self.half_moves,
            full_moves: self.full_moves,
        }
    }

    pub fn to_fen(&self) -> String {
        self.fen().to_string()
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.board.get(sq)
    }

    #[inline]
    pub const fn castling(&self, color: Color) -> CastlingRight {
        match color {
            Color::White => self.white_castling,
            Color::Black => self.black_castling,
        }
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant.lsb()
    }

    /// Pseudo-legal moves: own-king safety is not considered.
    pub fn candidate_moves(&self) -> MoveList {
        self.candidate_moves_with(CastlingCheck::default())
    }

    pub fn candidate_moves_with(&self, castling: CastlingCheck) -> MoveList {
        movegen::generate_candidates(self, castling)
    }

    /// Legal moves under the default castling rule, which only verifies the
    /// king's landing square.
    pub fn legal_moves(&self) -> MoveList {
        self.legal_moves_with(CastlingCheck::default())
    }

    /// Legal moves: candidates that do not leave the mover's king attacked.
    pub fn legal_moves_with(&self, castling: CastlingCheck) -> MoveList {
        let mut moves = self.candidate_moves_with(castling);
        moves.retain(|&m| {
            let mut probe = *self;
            probe.play_move_unchecked(m, true);
            !probe.is_under_check()
        });
        moves
    }

    /// Applies `m` without checking legality.
    ///
    /// With `only_modify_board` set, only the pieces move: side to move,
    /// castling rights, en-passant target and counters are left as they
    /// were. Legality probing relies on this to ask whether the mover's own
    /// king is attacked afterwards.
    pub fn play_move_unchecked(&mut self, m: Move, only_modify_board: bool) {
        let (src, dst) = (m.src(), m.dst());
        let player = self.side_to_move;
        self.board.set(dst, self.board.get(src));

        match m.move_type() {
            MoveType::Quiet | MoveType::PawnTwoSquares => {}
            MoveType::EnPassant => {
                let target = self.en_passant.lsb().unwrap_or(dst);
                let delta = match player {
                    Color::White => -8,
                    Color::Black => 8,
                };
                if let Some(taken) = target.offset(delta) {
                    self.board.set(taken, Piece::NONE);
                }
            }
            t @ (MoveType::PromoteKnight
            | MoveType::PromoteBishop
            | MoveType::PromoteRook
            | MoveType::PromoteQueen) => {
                if let Some(piece) = t.promotion_piece() {
                    self.board.set(dst, Piece::new(player, piece));
                }
            }
            MoveType::ShortCastle => self.relocate_rook(src, 3, 1),
            MoveType::LongCastle => self.relocate_rook(src, -4, -1),
        }

        self.board.set(src, Piece::NONE);
        if only_modify_board {
            return;
        }

        self.revoke_castling(src);
        self.revoke_castling(dst);

        self.en_passant = match m.move_type() {
            MoveType::PawnTwoSquares => {
                Bitboard::from_square(Square::from_index_masked((src.index() + dst.index()) / 2))
            }
            _ => Bitboard::EMPTY,
        };
        self.half_moves = self.half_moves.saturating_add(1);
        self.side_to_move = player.opposite();
        if self.side_to_move == Color::White {
            self.full_moves = self.full_moves.saturating_add(1);
        }
    }

    /// Moves the castling rook from `king + from` to `king + to`.
    fn relocate_rook(&mut self, king: Square, from: i8, to: i8) {
        let rook = Piece::new(self.side_to_move, PieceType::Rook);
        if let (Some(rook_src), Some(rook_dst)) = (king.offset(from), king.offset(to)) {
            self.board.set(rook_src, Piece::NONE);
            self.board.set(rook_dst, rook);
        }
    }

    /// Drops the rights tied to `sq` once a piece leaves or lands on it.
    fn revoke_castling(&mut self, sq: Square) {
        match sq {
            Square::A1 => self.white_castling = self.white_castling.remove_queen_side(),
            Square::E1 => self.white_castling = CastlingRight::None,
            Square::H1 => self.white_castling = self.white_castling.remove_king_side(),
            Square::A8 => self.black_castling = self.black_castling.remove_queen_side(),
            Square::E8 => self.black_castling = CastlingRight::None,
            Square::H8 => self.black_castling = self.black_castling.remove_king_side(),
            _ => {}
        }
    }

    /// Every square attacked by `color`'s pieces.
    pub fn attacked_by(&self, color: Color) -> Bitboard {
        let empty = self.board.empty();
        let side = self.board.side(color);
        ops::pawn_attacks(color, side.pawns())
            | ops::knight_moves(side.knights())
            | ops::bishop_moves(side.bishops() | side.queens(), empty)
            | ops::rook_moves(side.rooks() | side.queens(), empty)
            | ops::king_moves(side.king())
    }

    #[inline]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.attacked_by(by).contains(sq)
    }

    /// True if the side to move's king is attacked.
    pub fn is_under_check(&self) -> bool {
        let king = self.board.side(self.side_to_move).king();
        (king & self.attacked_by(self.side_to_move.opposite())).is_not_empty()
    }

    /// True if `m` lands on an enemy piece or is a pawn capturing en passant.
    pub fn captures(&self, m: Move) -> bool {
        !self.piece_at(m.dst()).is_none()
            || (self.piece_at(m.src()).piece_type() == PieceType::Pawn
                && self.en_passant == Bitboard::from_square(m.dst()))
    }

    /// Replays `m` on a copy and reports whether it checks or mates.
    pub fn check_state(&self, m: Move) -> CheckState {
        self.check_state_with(m, CastlingCheck::default())
    }

    pub fn check_state_with(&self, m: Move, castling: CastlingCheck) -> CheckState {
        let mut next = *self;
        next.play_move_unchecked(m, false);
        if !next.is_under_check() {
            CheckState::None
        } else if next.legal_moves_with(castling).is_empty() {
            CheckState::Checkmate
        } else {
            CheckState::Check
        }
    }
}

impl Default for PositionState {
    fn default() -> Self {
        Self::startpos()
    }
}

impl From<Fen> for PositionState {
    fn from(fen: Fen) -> Self {
        Self::from_parsed(fen)
    }
}

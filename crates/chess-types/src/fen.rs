//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{Board, CastlingRight, Color, Piece, Square, SquareParseError};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("unfinished piece placement in rank {0}")]
    UnfinishedPlacement(u8),

    #[error("too many squares in rank {0}")]
    RankOverflow(u8),

    #[error("ranks should be separated by a slash, found '{0}'")]
    MissingRankSeparator(char),

    #[error("extraneous characters after piece placement: {0:?}")]
    ExtraneousPlacement(String),

    #[error("unknown piece character '{0}'")]
    UnknownPiece(char),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("unknown castling indicator '{0}'")]
    InvalidCastlingRights(char),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(#[from] SquareParseError),

    #[error("invalid move count: {0}")]
    InvalidMoveCount(String),
}

/// A parsed FEN record.
///
/// Only the checks listed on [`FenError`] are performed; in particular the
/// placement is not checked for king counts or pawns on the back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fen {
    pub board: Board,
    pub side_to_move: Color,
    pub white_castling: CastlingRight,
    pub black_castling: CastlingRight,
    pub en_passant: Option<Square>,
    /// Plies played; FEN's half-move field.
    pub half_moves: u32,
    pub full_moves: u32,
}

impl Fen {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// The standard starting position.
    pub const fn startpos() -> Self {
        Fen {
            board: Board::STARTING_POSITION,
            side_to_move: Color::White,
            white_castling: CastlingRight::Both,
            black_castling: CastlingRight::Both,
            en_passant: None,
            half_moves: 0,
            full_moves: 1,
        }
    }

    /// Parses a FEN string with 4 or 6 whitespace-separated fields.
    ///
    /// With 4 fields the move counters default to `0` and `1`.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let board = parse_placement(fields[0])?;
        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };
        let (white_castling, black_castling) = parse_castling(fields[2])?;
        let en_passant = match fields[3] {
            "-" => None,
            sq => Some(Square::parse(sq)?),
        };
        let (half_moves, full_moves) = if fields.len() == 6 {
            (parse_move_count(fields[4])?, parse_move_count(fields[5])?)
        } else {
            (0, 1)
        };

        Ok(Fen {
            board,
            side_to_move,
            white_castling,
            black_castling,
            en_passant,
            half_moves,
            full_moves,
        })
    }
}

impl Default for Fen {
    fn default() -> Self {
        Self::startpos()
    }
}

impl std::str::FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fen::parse(s)
    }
}

/// Walks ranks 8 down to 1; each rank must cover exactly eight files.
fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let mut board = Board::EMPTY;
    let mut chars = placement.chars();

    for rank in (0..8u8).rev() {
        let mut file = 0u8;
        while file < 8 {
            let c = chars
                .next()
                .ok_or(FenError::UnfinishedPlacement(rank + 1))?;
            match c {
                '1'..='8' => file += c as u8 - b'0',
                _ => {
                    let piece = Piece::from_fen_char(c).ok_or(FenError::UnknownPiece(c))?;
                    board.set(Square::from_index_masked(rank * 8 + file), piece);
                    file += 1;
                }
            }
            if file > 8 {
                return Err(FenError::RankOverflow(rank + 1));
            }
        }
        if rank > 0 {
            match chars.next() {
                Some('/') => {}
                Some(c) => return Err(FenError::MissingRankSeparator(c)),
                None => return Err(FenError::UnfinishedPlacement(rank)),
            }
        }
    }

    let rest: String = chars.collect();
    if !rest.is_empty() {
        return Err(FenError::ExtraneousPlacement(rest));
    }
    Ok(board)
}

fn parse_castling(field: &str) -> Result<(CastlingRight, CastlingRight), FenError> {
    let mut white = CastlingRight::None;
    let mut black = CastlingRight::None;
    if field == "-" {
        return Ok((white, black));
    }
    for c in field.chars() {
        match c {
            'K' => white = white.add_king_side(),
            'Q' => white = white.add_queen_side(),
            'k' => black = black.add_king_side(),
            'q' => black = black.add_queen_side(),
            _ => return Err(FenError::InvalidCastlingRights(c)),
        }
    }
    Ok((white, black))
}

fn parse_move_count(field: &str) -> Result<u32, FenError> {
    field
        .parse()
        .map_err(|_| FenError::InvalidMoveCount(field.to_string()))
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let mut empty_run = 0;
            for file in 0..8u8 {
                match self.board.get(Square::from_index_masked(rank * 8 + file)).fen_char() {
                    Some(c) => {
                        if empty_run > 0 {
                            write!(f, "{}", empty_run)?;
                            empty_run = 0;
                        }
                        write!(f, "{}", c)?;
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                write!(f, "{}", empty_run)?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} ", self.side_to_move.fen_char())?;

        let mut castling = String::new();
        if self.white_castling.has_king_side() {
            castling.push('K');
        }
        if self.white_castling.has_queen_side() {
            castling.push('Q');
        }
        if self.black_castling.has_king_side() {
            castling.push('k');
        }
        if self.black_castling.has_queen_side() {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }
        write!(f, "{} ", castling)?;

        match self.en_passant {
            Some(sq) => write!(f, "{}", sq)?,
            None => write!(f, "-")?,
        }
        write!(f, " {} {}", self.half_moves, self.full_moves)
    }
}

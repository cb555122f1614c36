//! Algebraic move notation, read and written against a position.
//!
//! The accepted grammar is a relaxed form of SAN:
//!
//! ```text
//! castle  := ("O-O-O" | "0-0-0" | "O-O" | "0-0") check?
//! normal  := piece? file? rank? "x"? file? rank? ("="? promo)? check?
//! piece   := N | B | R | Q | K
//! promo   := N | B | R | Q
//! check   := "+" | "#"
//! ```
//!
//! A token that names only one square (`"e4"`, `"Nf3"`) names the
//! destination. Piece letters are case-sensitive, so `b` is always a file.

use chess_types::{File, Move, MoveType, Piece, PieceType, Rank};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

use crate::options::CastlingCheck;
use crate::position::{CheckState, PositionState};

/// Why a notation string could not be turned into a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// The text does not follow the move grammar at all.
    #[error("not a move")]
    NotAMove,

    /// No legal move fits the description.
    #[error("illegal move")]
    Illegal,

    /// Several legal moves fit; all of them are listed.
    #[error("ambiguous move, could be any of: {}", join_moves(.0))]
    Ambiguous(Vec<Move>),

    /// Exactly one legal move fits, but its capture or check marker is wrong.
    #[error("did you mean {0}? the capture or check marker does not match")]
    ClarificationIncorrect(Move),
}

impl MoveParseError {
    /// True for everything except [`MoveParseError::NotAMove`]: the text was
    /// readable as a move but does not describe exactly one legal move.
    pub fn is_legality_error(&self) -> bool {
        !matches!(self, MoveParseError::NotAMove)
    }
}

fn join_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_uci())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fields of a non-castling token; unset fields match anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NormalToken {
    piece: PieceType,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    takes: bool,
    to_file: Option<File>,
    to_rank: Option<Rank>,
    promotion: Option<PieceType>,
    check: CheckState,
}

impl NormalToken {
    fn matches(&self, m: Move) -> bool {
        let (src, dst) = (m.src(), m.dst());
        self.from_file.map_or(true, |f| src.file() == f)
            && self.from_rank.map_or(true, |r| src.rank() == r)
            && self.to_file.map_or(true, |f| dst.file() == f)
            && self.to_rank.map_or(true, |r| dst.rank() == r)
    }
}

fn scan_check(rest: &str) -> Option<CheckState> {
    match rest {
        "" => Some(CheckState::None),
        "+" => Some(CheckState::Check),
        "#" => Some(CheckState::Checkmate),
        _ => None,
    }
}

/// Returns `(is_long, check)` for a castling token.
fn scan_castling(notation: &str) -> Option<(bool, CheckState)> {
    const TOKENS: [(&str, bool); 4] = [
        ("0-0-0", true),
        ("O-O-O", true),
        ("0-0", false),
        ("O-O", false),
    ];
    TOKENS.iter().find_map(|&(token, long)| {
        let rest = notation.strip_prefix(token)?;
        scan_check(rest).map(|check| (long, check))
    })
}

/// Consumes the next character if `f` accepts it.
fn take<T>(chars: &mut Peekable<Chars<'_>>, f: impl Fn(char) -> Option<T>) -> Option<T> {
    let value = f(*chars.peek()?)?;
    chars.next();
    Some(value)
}

/// Scans a non-castling token. Each field is optional and takes at most one
/// character, so consuming greedily left to right is unambiguous.
fn scan_normal(notation: &str) -> Option<NormalToken> {
    let mut chars = notation.chars().peekable();

    let piece = take(&mut chars, PieceType::from_san_char).unwrap_or(PieceType::Pawn);
    let from_file = take(&mut chars, File::from_char);
    let from_rank = take(&mut chars, Rank::from_char);
    let takes = take(&mut chars, |c| (c == 'x').then_some(())).is_some();
    let to_file = take(&mut chars, File::from_char);
    let to_rank = take(&mut chars, Rank::from_char);
    take(&mut chars, |c| (c == '=').then_some(()));
    let promotion = take(&mut chars, |c| {
        PieceType::from_san_char(c).filter(|&p| p != PieceType::King)
    });
    let check = match take(&mut chars, |c| matches!(c, '+' | '#').then_some(c)) {
        Some('+') => CheckState::Check,
        Some(_) => CheckState::Checkmate,
        None => CheckState::None,
    };
    if chars.next().is_some() {
        return None;
    }

    let mut token = NormalToken {
        piece,
        from_file,
        from_rank,
        takes,
        to_file,
        to_rank,
        promotion,
        check,
    };
    if token.to_file.is_none() && token.to_rank.is_none() {
        std::mem::swap(&mut token.from_file, &mut token.to_file);
        std::mem::swap(&mut token.from_rank, &mut token.to_rank);
    }
    Some(token)
}

fn has_file_letter(notation: &str) -> bool {
    notation.chars().any(|c| matches!(c, 'a'..='h'))
}

/// True if `notation` follows the move grammar, regardless of any position.
pub fn matches_move_syntax(notation: &str) -> bool {
    scan_castling(notation).is_some()
        || (has_file_letter(notation) && scan_normal(notation).is_some())
}

/// Resolves `notation` to exactly one legal move of `position`.
pub fn parse_move(
    position: &PositionState,
    notation: &str,
    castling: CastlingCheck,
) -> Result<Move, MoveParseError> {
    if notation.is_empty() {
        return Err(MoveParseError::NotAMove);
    }
    if let Some((long, check)) = scan_castling(notation) {
        return parse_castling(position, long, check, castling);
    }
    if !has_file_letter(notation) {
        return Err(MoveParseError::NotAMove);
    }
    let token = scan_normal(notation).ok_or(MoveParseError::NotAMove)?;

    let mover = Piece::new(position.side_to_move, token.piece);
    let mut matching: Vec<Move> = Vec::new();
    for &m in &position.legal_moves_with(castling) {
        // Promotion variants share src/dst; keep one of them.
        if position.piece_at(m.src()) == mover
            && token.matches(m)
            && !matching.iter().any(|o| o.untyped() == m.untyped())
        {
            matching.push(m);
        }
    }

    let mut result = match matching.len() {
        0 => return Err(MoveParseError::Illegal),
        1 => matching[0],
        _ => return Err(MoveParseError::Ambiguous(matching)),
    };

    let should_promote = token.piece == PieceType::Pawn
        && matches!(result.dst().rank(), Rank::R1 | Rank::R8);
    if should_promote != token.promotion.is_some() {
        return Err(MoveParseError::Illegal);
    }
    if let Some(promotion) = token.promotion.and_then(MoveType::promotion_to) {
        result = result.with_type(promotion);
    }

    if token.takes && !position.captures(result) {
        return Err(MoveParseError::ClarificationIncorrect(result));
    }
    if token.check != CheckState::None && token.check != position.check_state_with(result, castling)
    {
        return Err(MoveParseError::ClarificationIncorrect(result));
    }
    Ok(result)
}

fn parse_castling(
    position: &PositionState,
    long: bool,
    check: CheckState,
    castling: CastlingCheck,
) -> Result<Move, MoveParseError> {
    let wanted = if long {
        MoveType::LongCastle
    } else {
        MoveType::ShortCastle
    };
    let m = position
        .legal_moves_with(castling)
        .iter()
        .copied()
        .find(|m| m.move_type() == wanted)
        .ok_or(MoveParseError::Illegal)?;
    if check != CheckState::None && check != position.check_state_with(m, castling) {
        return Err(MoveParseError::ClarificationIncorrect(m));
    }
    Ok(m)
}

/// Writes `m` in notation. `m` should be legal in `position`.
pub fn notate_move(position: &PositionState, m: Move, castling: CastlingCheck) -> String {
    let check = match position.check_state_with(m, castling) {
        CheckState::None => "",
        CheckState::Check => "+",
        CheckState::Checkmate => "#",
    };

    match m.move_type() {
        MoveType::ShortCastle => return format!("O-O{}", check),
        MoveType::LongCastle => return format!("O-O-O{}", check),
        _ => {}
    }

    let (src, dst) = (m.src(), m.dst());
    let takes = position.captures(m);
    let piece = position.piece_at(src).piece_type();

    let mut out = String::new();
    match piece.san_char() {
        None => {
            if takes {
                out.push(src.file().to_char());
                out.push('x');
            }
            out.push_str(&dst.to_algebraic());
            if let Some(promotion) = m.move_type().promotion_piece().and_then(PieceType::san_char)
            {
                out.push('=');
                out.push(promotion);
            }
        }
        Some(letter) => {
            out.push(letter);
            out.push_str(&disambiguation(position, m, piece, castling));
            if takes {
                out.push('x');
            }
            out.push_str(&dst.to_algebraic());
        }
    }
    out.push_str(check);
    out
}

/// Shortest source qualifier that singles `m` out among same-piece moves
/// to the same destination.
fn disambiguation(
    position: &PositionState,
    m: Move,
    piece: PieceType,
    castling: CastlingCheck,
) -> String {
    let src = m.src();
    let rivals: Vec<Move> = position
        .legal_moves_with(castling)
        .iter()
        .copied()
        .filter(|o| o.dst() == m.dst() && position.piece_at(o.src()).piece_type() == piece)
        .collect();

    if rivals.len() <= 1 {
        String::new()
    } else if rivals.iter().filter(|o| o.src().file() == src.file()).count() == 1 {
        src.file().to_char().to_string()
    } else if rivals.iter().filter(|o| o.src().rank() == src.rank()).count() == 1 {
        src.rank().to_char().to_string()
    } else {
        src.to_algebraic()
    }
}

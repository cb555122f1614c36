//! A game in progress: position plus draw bookkeeping.
//!
//! [`Game`] owns the canonical [`PositionState`] and the two pieces of
//! history the position itself cannot hold: the fifty-move counter and the
//! repetition table. Whether the game is over is never stored; it is the
//! [`Outcome`] returned by the move that ended it.

use chess_types::{Bitboard, Board, CastlingRight, Color, FenError, Move, PieceType};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

use crate::movegen::MoveList;
use crate::notation::{self, MoveParseError};
use crate::options::{GameOptions, RepetitionKey};
use crate::position::PositionState;

/// Plies without a pawn move or capture after which the game is drawn.
const FIFTY_MOVE_LIMIT: u32 = 100;

/// Occurrences of one position that draw the game.
const REPETITION_LIMIT: u32 = 3;

/// Result of [`Game::play_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The move was played and the game goes on.
    None,
    /// The move is not legal; nothing changed.
    Illegal,
    DrawByRepetition,
    DrawBy50MoveRule,
    DrawByStalemate,
    WhiteWin,
    BlackWin,
}

impl Outcome {
    /// True if this outcome ends the game.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::None | Outcome::Illegal)
    }

    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::WhiteWin => Some(Color::White),
            Outcome::BlackWin => Some(Color::Black),
            _ => None,
        }
    }

    const fn win_for(color: Color) -> Self {
        match color {
            Color::White => Outcome::WhiteWin,
            Color::Black => Outcome::BlackWin,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::None => "game continues",
            Outcome::Illegal => "illegal move",
            Outcome::DrawByRepetition => "draw by threefold repetition",
            Outcome::DrawBy50MoveRule => "draw by the fifty-move rule",
            Outcome::DrawByStalemate => "draw by stalemate",
            Outcome::WhiteWin => "white wins",
            Outcome::BlackWin => "black wins",
        };
        f.write_str(text)
    }
}

/// A committed move with its notation as written before it was played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    pub mov: Move,
    pub notation: String,
}

/// What the repetition table counts. Fields outside the configured
/// [`RepetitionKey`] are left at fixed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PositionKey {
    board: Board,
    side_to_move: Color,
    castling: (CastlingRight, CastlingRight),
    en_passant: Bitboard,
}

impl PositionKey {
    fn of(position: &PositionState, key: RepetitionKey) -> Self {
        let mut k = PositionKey {
            board: position.board,
            side_to_move: position.side_to_move,
            castling: (CastlingRight::None, CastlingRight::None),
            en_passant: Bitboard::EMPTY,
        };
        if key == RepetitionKey::FullPosition {
            k.castling = (position.white_castling, position.black_castling);
            k.en_passant = position.en_passant;
        }
        k
    }
}

/// A chess game under a fixed set of [`GameOptions`].
///
/// Not synchronized: callers that share a game across threads must
/// serialize access themselves.
#[derive(Debug, Clone)]
pub struct Game {
    position: PositionState,
    options: GameOptions,
    fifty_move_counter: u32,
    repetitions: HashMap<PositionKey, u32>,
    moves: Vec<GameMove>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A game from the standard starting position with default options.
    pub fn new() -> Self {
        Self::with_options(GameOptions::default())
    }

    pub fn with_options(options: GameOptions) -> Self {
        Self::from_position(PositionState::startpos(), 0, options)
    }

    /// A game from a FEN position; its half-move field seeds the
    /// fifty-move counter.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::from_fen_with_options(fen, GameOptions::default())
    }

    pub fn from_fen_with_options(fen: &str, options: GameOptions) -> Result<Self, FenError> {
        let position = PositionState::from_fen(fen)?;
        trace!(fen, "loaded position");
        Ok(Self::from_position(position, position.half_moves, options))
    }

    fn from_position(
        position: PositionState,
        fifty_move_counter: u32,
        options: GameOptions,
    ) -> Self {
        Game {
            position,
            options,
            fifty_move_counter,
            repetitions: HashMap::new(),
            moves: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> &PositionState {
        &self.position
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.position.board
    }

    #[inline]
    pub fn options(&self) -> GameOptions {
        self.options
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Plies played, as tracked by the position.
    #[inline]
    pub fn half_moves(&self) -> u32 {
        self.position.half_moves
    }

    #[inline]
    pub fn full_moves(&self) -> u32 {
        self.position.full_moves
    }

    /// Plies since the last pawn move or capture.
    #[inline]
    pub fn fifty_move_counter(&self) -> u32 {
        self.fifty_move_counter
    }

    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves_with(self.options.castling_check)
    }

    pub fn is_check(&self) -> bool {
        self.position.is_under_check()
    }

    /// Moves committed so far, oldest first.
    pub fn history(&self) -> &[GameMove] {
        &self.moves
    }

    /// How many times the current position has been reached by a move.
    /// The position a game starts from is not an occurrence.
    pub fn repetition_count(&self) -> u32 {
        let key = PositionKey::of(&self.position, self.options.repetition_key);
        self.repetitions.get(&key).copied().unwrap_or(0)
    }

    /// FEN of the current position, with the fifty-move counter in the
    /// half-move field.
    pub fn to_fen(&self) -> String {
        let mut fen = self.position.fen();
        fen.half_moves = self.fifty_move_counter;
        fen.to_string()
    }

    /// True if `notation` follows the move grammar; no position is consulted.
    pub fn matches_move_syntax(notation: &str) -> bool {
        notation::matches_move_syntax(notation)
    }

    /// Resolves `notation` to a legal move in the current position.
    pub fn parse_move(&self, notation: &str) -> Result<Move, MoveParseError> {
        notation::parse_move(&self.position, notation, self.options.castling_check).map_err(
            |err| {
                debug!(notation, %err, "rejected move notation");
                err
            },
        )
    }

    /// Writes `m` in notation for the current position.
    pub fn notate_move(&self, m: Move) -> String {
        notation::notate_move(&self.position, m, self.options.castling_check)
    }

    /// Finds the legal move `m` stands for.
    ///
    /// Source and destination must match. A promotion must name the same
    /// piece, and a promoting pawn move must name one. Castling, en-passant
    /// and double-push tags come from the legal move.
    fn resolve(&self, m: Move) -> Option<Move> {
        let wants_promotion = m.move_type().is_promotion();
        self.legal_moves().iter().copied().find(|legal| {
            legal.untyped() == m.untyped()
                && if wants_promotion {
                    *legal == m
                } else {
                    !legal.move_type().is_promotion()
                }
        })
    }

    /// Plays `m` if it is legal and reports what happened.
    pub fn play_move(&mut self, m: Move) -> Outcome {
        let Some(m) = self.resolve(m) else {
            debug!(mv = %m, "illegal move");
            return Outcome::Illegal;
        };

        let notation = self.notate_move(m);
        let resets = self.position.piece_at(m.src()).piece_type() == PieceType::Pawn
            || self.position.captures(m);
        self.fifty_move_counter = if resets {
            0
        } else {
            self.fifty_move_counter.saturating_add(1)
        };

        self.position.play_move_unchecked(m, false);
        let outcome = self.classify();
        debug!(mv = %notation, %outcome, fen = %self.to_fen(), "move committed");
        self.moves.push(GameMove { mov: m, notation });
        outcome
    }

    fn classify(&mut self) -> Outcome {
        if self.legal_moves().is_empty() {
            return if self.is_check() {
                Outcome::win_for(self.position.side_to_move.opposite())
            } else {
                Outcome::DrawByStalemate
            };
        }
        if self.fifty_move_counter >= FIFTY_MOVE_LIMIT {
            return Outcome::DrawBy50MoveRule;
        }

        let key = PositionKey::of(&self.position, self.options.repetition_key);
        let seen = self.repetitions.entry(key).or_insert(0);
        *seen += 1;
        if *seen >= REPETITION_LIMIT {
            Outcome::DrawByRepetition
        } else {
            Outcome::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CastlingCheck;
    use chess_types::{Piece, Square};

    fn play(game: &mut Game, notation: &str) -> Outcome {
        let m = game
            .parse_move(notation)
            .unwrap_or_else(|e| panic!("{}: {}", notation, e));
        game.play_move(m)
    }

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.half_moves(), 0);
        assert_eq!(game.full_moves(), 1);
        assert_eq!(game.fifty_move_counter(), 0);
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.repetition_count(), 0);
        assert!(game.history().is_empty());
        assert!(!game.is_check());
        assert_eq!(game.to_fen(), chess_types::Fen::STARTPOS);
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        assert_eq!(play(&mut game, "f3"), Outcome::None);
        assert_eq!(play(&mut game, "e5"), Outcome::None);
        assert_eq!(play(&mut game, "g4"), Outcome::None);
        let mate = game.parse_move("Qh4").unwrap();
        assert_eq!(game.notate_move(mate), "Qh4#");
        let outcome = game.play_move(mate);
        assert_eq!(outcome, Outcome::BlackWin);
        assert_eq!(outcome.winner(), Some(Color::Black));
        assert!(outcome.is_terminal());
        assert_eq!(game.history().last().unwrap().notation, "Qh4#");
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn white_wins_back_rank() {
        let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert_eq!(play(&mut game, "Ra8#"), Outcome::WhiteWin);
    }

    #[test]
    fn stalemate() {
        let mut game = Game::from_fen("7k/8/6K1/8/8/8/5Q2/8 w - - 0 1").unwrap();
        assert_eq!(play(&mut game, "Qf7"), Outcome::DrawByStalemate);
    }

    #[test]
    fn illegal_moves_leave_game_untouched() {
        let mut game = Game::new();
        let before = game.to_fen();
        assert_eq!(game.play_move(Move::quiet(sq("e2"), sq("e5"))), Outcome::Illegal);
        assert_eq!(game.play_move(Move::quiet(sq("e7"), sq("e5"))), Outcome::Illegal);
        assert_eq!(game.to_fen(), before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn untyped_move_is_resolved() {
        let mut game = Game::new();
        assert_eq!(game.play_move(Move::quiet(sq("e2"), sq("e4"))), Outcome::None);
        assert_eq!(game.position().en_passant_square(), Some(sq("e3")));
        assert_eq!(game.history()[0].notation, "e4");
    }

    #[test]
    fn promotion_must_be_named() {
        let mut game = Game::from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        assert_eq!(game.play_move(Move::quiet(sq("a7"), sq("a8"))), Outcome::Illegal);
        let promote = Move::new(sq("a7"), sq("a8"), chess_types::MoveType::PromoteRook);
        assert_eq!(game.play_move(promote), Outcome::None);
        assert_eq!(game.board().get(sq("a8")), Piece::WHITE_ROOK);
    }

    #[test]
    fn repetition_on_third_occurrence() {
        let mut game = Game::new();
        let cycle = ["Nf3", "Nf6", "Ng1", "Ng8"];
        for notation in cycle {
            assert_eq!(play(&mut game, notation), Outcome::None);
        }
        assert_eq!(game.repetition_count(), 1);
        for notation in cycle {
            assert_eq!(play(&mut game, notation), Outcome::None);
        }
        assert_eq!(game.repetition_count(), 2);
        assert_eq!(play(&mut game, "Nf3"), Outcome::DrawByRepetition);
        assert_eq!(game.repetition_count(), 3);
    }

    #[test]
    fn full_position_key_counts_castling_rights() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let shuffle = ["Kf1", "Kf8", "Ke1", "Ke8", "Kf1", "Kf8", "Ke1", "Ke8"];

        let mut game = Game::from_fen(fen).unwrap();
        for notation in shuffle {
            assert_eq!(play(&mut game, notation), Outcome::None);
        }
        assert_eq!(play(&mut game, "Kf1"), Outcome::DrawByRepetition);

        let options = GameOptions {
            repetition_key: RepetitionKey::FullPosition,
            ..GameOptions::default()
        };
        let mut game = Game::from_fen_with_options(fen, options).unwrap();
        for notation in shuffle {
            assert_eq!(play(&mut game, notation), Outcome::None);
        }
        assert_eq!(play(&mut game, "Kf1"), Outcome::None);
        assert_eq!(game.repetition_count(), 2);
        assert_eq!(play(&mut game, "Kf8"), Outcome::DrawByRepetition);
    }

    #[test]
    fn starting_position_is_not_an_occurrence() {
        let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
        let mut game = Game::from_fen(fen).unwrap();
        assert_eq!(game.repetition_count(), 0);
        for notation in ["Kf1", "Kf8", "Ke1", "Ke8"] {
            assert_eq!(play(&mut game, notation), Outcome::None);
        }
        assert_eq!(game.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 4 3");
        assert_eq!(game.repetition_count(), 1);
    }

    #[test]
    fn counters_saturate_at_the_limit() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 4294967295").unwrap();
        assert_eq!(play(&mut game, "Kd7"), Outcome::None);
        assert_eq!(game.full_moves(), u32::MAX);
        assert_eq!(game.fifty_move_counter(), 1);

        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 4294967295 9").unwrap();
        assert_eq!(play(&mut game, "Kd7"), Outcome::DrawBy50MoveRule);
        assert_eq!(game.fifty_move_counter(), u32::MAX);
        assert_eq!(game.half_moves(), u32::MAX);
    }

    #[test]
    fn fifty_move_rule() {
        let mut game = Game::from_fen("8/8/8/8/8/8/8/R3K2k w Q - 99 60").unwrap();
        assert_eq!(game.fifty_move_counter(), 99);
        assert_eq!(play(&mut game, "Ra2"), Outcome::DrawBy50MoveRule);
        assert_eq!(game.fifty_move_counter(), 100);
    }

    #[test]
    fn fifty_move_counter_resets() {
        let mut game = Game::new();
        play(&mut game, "Nf3");
        play(&mut game, "Nc6");
        assert_eq!(game.fifty_move_counter(), 2);
        play(&mut game, "e4");
        assert_eq!(game.fifty_move_counter(), 0);
        play(&mut game, "Nb4");
        play(&mut game, "Nc3");
        assert_eq!(game.fifty_move_counter(), 2);
        play(&mut game, "Nxa2");
        assert_eq!(game.fifty_move_counter(), 0);
        assert!(game.to_fen().ends_with(" 0 4"));
    }

    #[test]
    fn en_passant_through_game() {
        let mut game = Game::new();
        for notation in ["e4", "Nf6", "e5", "d5", "exd6"] {
            assert_eq!(play(&mut game, notation), Outcome::None);
        }
        assert_eq!(game.board().get(sq("d5")), Piece::NONE);
        assert_eq!(game.board().get(sq("d6")), Piece::WHITE_PAWN);
        assert_eq!(game.history()[4].notation, "exd6");
    }

    #[test]
    fn castling_option_changes_legality() {
        let fen = "r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1";
        let options = GameOptions {
            castling_check: CastlingCheck::Strict,
            ..GameOptions::default()
        };
        let strict = Game::from_fen_with_options(fen, options).unwrap();
        assert_eq!(strict.parse_move("O-O"), Err(MoveParseError::Illegal));

        let mut lenient = Game::from_fen(fen).unwrap();
        assert_eq!(play(&mut lenient, "O-O"), Outcome::None);
        assert_eq!(lenient.board().get(Square::G1), Piece::WHITE_KING);
    }

    #[test]
    fn accessors_track_play() {
        let mut game = Game::new();
        play(&mut game, "e4");
        play(&mut game, "e5");
        play(&mut game, "Nf3");
        assert_eq!(game.half_moves(), 3);
        assert_eq!(game.full_moves(), 2);
        assert_eq!(game.side_to_move(), Color::Black);
        let notations: Vec<_> = game.history().iter().map(|m| m.notation.as_str()).collect();
        assert_eq!(notations, ["e4", "e5", "Nf3"]);
        assert_eq!(
            game.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::WhiteWin.to_string(), "white wins");
        assert!(!Outcome::None.is_terminal());
        assert!(!Outcome::Illegal.is_terminal());
        assert!(Outcome::DrawByStalemate.is_terminal());
        assert_eq!(Outcome::DrawByRepetition.winner(), None);
    }

    #[test]
    fn syntax_check_is_static() {
        assert!(Game::matches_move_syntax("Nbd2"));
        assert!(!Game::matches_move_syntax("resign"));
    }
}

//! Whole games replayed through the public API.

use chess_rules::{CastlingCheck, Game, GameOptions, MoveParseError, Outcome, PositionState};
use chess_types::{Fen, Move, MoveType, Piece, Square};

fn replay(game: &mut Game, moves: &[&str]) -> Vec<Outcome> {
    moves
        .iter()
        .map(|notation| {
            let m = game
                .parse_move(notation)
                .unwrap_or_else(|e| panic!("{} rejected: {}", notation, e));
            game.play_move(m)
        })
        .collect()
}

#[test]
fn italian_game_with_both_castlings() {
    let mut game = Game::new();
    let moves = ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "O-O", "Nf6", "d3", "O-O"];
    let outcomes = replay(&mut game, &moves);
    assert!(outcomes.iter().all(|&o| o == Outcome::None));

    let notations: Vec<_> = game.history().iter().map(|m| m.notation.clone()).collect();
    assert_eq!(notations, moves);
    assert_eq!(
        game.to_fen(),
        "r1bq1rk1/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQ1RK1 w - - 1 6"
    );
}

#[test]
fn scholars_mate() {
    let mut game = Game::new();
    let outcomes = replay(&mut game, &["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"]);
    assert_eq!(outcomes.last(), Some(&Outcome::WhiteWin));
    assert_eq!(game.history().last().map(|m| m.notation.as_str()), Some("Qxf7#"));
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.parse_move("Ke7"), Err(MoveParseError::Illegal));
}

#[test]
fn fools_mate_notation() {
    let mut game = Game::new();
    let outcomes = replay(&mut game, &["f3", "e5", "g4", "Qh4#"]);
    assert_eq!(outcomes, [Outcome::None, Outcome::None, Outcome::None, Outcome::BlackWin]);
    assert_eq!(game.history()[3].notation, "Qh4#");
}

#[test]
fn wrong_mate_marker_is_reported() {
    let mut game = Game::new();
    replay(&mut game, &["f3", "e5", "g4"]);
    let qh4 = Move::quiet(Square::parse("d8").unwrap(), Square::parse("h4").unwrap());
    assert_eq!(
        game.parse_move("Qh4+"),
        Err(MoveParseError::ClarificationIncorrect(qh4))
    );
    assert_eq!(game.parse_move("Qh4"), Ok(qh4));
}

#[test]
fn underpromotion_with_capture() {
    let mut game = Game::from_fen("r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let m = game.parse_move("bxa8=N").unwrap();
    assert_eq!(m.move_type(), MoveType::PromoteKnight);
    assert_eq!(game.play_move(m), Outcome::None);
    assert_eq!(game.board().get(Square::A8), Piece::WHITE_KNIGHT);
    assert_eq!(game.fifty_move_counter(), 0);
}

#[test]
fn castling_gives_check() {
    let mut game = Game::from_fen("3k4/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    let m = game.parse_move("O-O-O+").unwrap();
    assert_eq!(game.notate_move(m), "O-O-O+");
    assert_eq!(game.play_move(m), Outcome::None);
    assert!(game.is_check());
    assert_eq!(game.board().get(Square::D1), Piece::WHITE_ROOK);
    assert_eq!(game.board().get(Square::C1), Piece::WHITE_KING);
    assert_eq!(game.to_fen(), "3k4/8/8/8/8/8/8/2KR4 b - - 1 1");
}

#[test]
fn strict_and_lenient_castling_disagree_on_transit() {
    let fen = "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1";
    let attacked = "4k3/8/8/8/8/8/3r4/R3K2R w KQ - 0 1";

    let strict_options = GameOptions {
        castling_check: CastlingCheck::Strict,
        ..GameOptions::default()
    };

    let strict = Game::from_fen_with_options(fen, strict_options).unwrap();
    let castles = strict.legal_moves().iter().filter(|m| m.move_type().is_castling()).count();
    assert_eq!(castles, 2);

    let strict = Game::from_fen_with_options(attacked, strict_options).unwrap();
    assert_eq!(strict.parse_move("O-O-O"), Err(MoveParseError::Illegal));
    assert!(strict.parse_move("O-O").is_ok());

    let lenient = Game::from_fen(attacked).unwrap();
    assert!(lenient.parse_move("O-O-O").is_ok());
}

#[test]
fn default_castling_only_checks_the_landing_square() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1").unwrap();
    let m = game.parse_move("O-O").unwrap();
    assert_eq!(m.move_type(), MoveType::ShortCastle);
    assert_eq!(game.play_move(m), Outcome::None);
    assert_eq!(game.board().get(Square::G1), Piece::WHITE_KING);

    let in_check = Game::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(in_check.is_check());
    assert!(in_check.parse_move("O-O-O").is_ok());
    assert!(in_check.parse_move("O-O").is_ok());
}

#[test]
fn positions_and_games_agree_on_fen() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let game = Game::from_fen(fen).unwrap();
    let position = PositionState::from_fen(fen).unwrap();
    assert_eq!(game.position(), &position);
    assert_eq!(game.to_fen(), fen);
    assert_eq!(Fen::parse(fen).map(PositionState::from), Ok(position));
}

#[test]
fn invalid_fen_is_reported() {
    assert!(Game::from_fen("not a fen").is_err());
    assert!(Game::from_fen("8/8/8/8/8/8/8/8 w - -").is_ok());
}

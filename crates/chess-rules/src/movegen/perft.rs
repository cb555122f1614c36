//! Perft: leaf-node counts used to validate move generation.
//!
//! Counts are computed under [`CastlingCheck::Strict`], which matches the
//! published reference values.

use crate::options::CastlingCheck;
use crate::position::PositionState;

/// Counts leaf nodes `depth` plies below `position`.
pub fn perft(position: &PositionState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves_with(CastlingCheck::Strict);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &m in &moves {
        let mut next = *position;
        next.play_move_unchecked(m, false);
        nodes += perft(&next, depth - 1);
    }
    nodes
}

/// Per-move node counts at `depth - 1`, sorted by coordinate notation.
/// Empty at depth 0, where no move is made.
pub fn perft_divide(position: &PositionState, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = position.legal_moves_with(CastlingCheck::Strict);
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|&m| {
            let mut next = *position;
            next.play_move_unchecked(m, false);
            (m.to_uci(), perft(&next, depth - 1))
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

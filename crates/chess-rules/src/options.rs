//! Rule options a [`Game`](crate::Game) is played under.
//!
//! Both options default to the behavior described on each variant marked
//! `#[default]`. They deserialize from a table such as:
//!
//! ```toml
//! castling-check = "strict"
//! repetition-key = "full-position"
//! ```

use serde::{Deserialize, Serialize};

/// Which king squares must be unattacked for castling to be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CastlingCheck {
    /// The king may not castle out of, through, or into check.
    Strict,
    /// Only the landing square is checked, by the ordinary legality filter.
    /// The king may castle out of check or across an attacked square.
    #[default]
    LandingOnly,
}

/// What counts as "the same position" for threefold repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepetitionKey {
    /// Piece placement and side to move only.
    #[default]
    PlacementAndSide,
    /// Placement, side to move, castling rights, and en-passant target.
    FullPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GameOptions {
    pub castling_check: CastlingCheck,
    pub repetition_key: RepetitionKey,
}

impl GameOptions {
    pub const fn new(castling_check: CastlingCheck, repetition_key: RepetitionKey) -> Self {
        GameOptions {
            castling_check,
            repetition_key,
        }
    }
}

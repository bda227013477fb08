//! Pluggable board evaluation.
//!
//! Search delegates static scoring to `BoardScorer` so a different heuristic
//! can be swapped in without touching the search code.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Magnitude of a checkmate score; mate at ply `p` scores `MATE_SCORE - p`.
pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Plain material count.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20000,
        }
    }

    #[inline]
    fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
        PieceKind::ALL.iter().fold(0i32, |score, kind| {
            let white = game_state.pieces(Color::White, *kind).count_ones() as i32;
            let black = game_state.pieces(Color::Black, *kind).count_ones() as i32;
            score + (white - black) * Self::piece_value(*kind)
        })
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let white_minus_black = Self::material_balance_white_minus_black(game_state);
        match game_state.side_to_move {
            Color::White => white_minus_black,
            Color::Black => -white_minus_black,
        }
    }
}

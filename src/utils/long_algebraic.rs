//! Long algebraic move text (`e2e4`, `e7e8q`).

use crate::chess_errors::{EngineError, EngineResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legality::find_legal_move;
use crate::utils::algebraic::algebraic_to_square;

/// Parse move text without consulting a position.
///
/// Accepts origin and destination squares plus an optional promotion letter
/// (`n`, `b`, `r`, `q`, either case).
pub fn parse_long_algebraic(text: &str) -> EngineResult<Move> {
    let invalid = || EngineError::InvalidMoveText(text.to_owned());

    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| invalid())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| invalid())?;

    match text[4..].chars().next() {
        None => Ok(Move::new(from, to)),
        Some(ch) => {
            let kind = PieceKind::from_char(ch)
                .filter(|kind| PieceKind::PROMOTIONS.contains(kind))
                .ok_or_else(invalid)?;
            Ok(Move::with_promotion(from, to, kind))
        }
    }
}

/// Parse `text` and match it against the legal moves of `game_state`.
pub fn resolve_long_algebraic(game_state: &mut GameState, text: &str) -> EngineResult<Move> {
    let candidate = parse_long_algebraic(text)?;
    find_legal_move(game_state, candidate).map_err(|_| EngineError::IllegalMove(text.to_owned()))
}

//! Capture-first move ordering (most valuable victim, least valuable attacker).

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::make_move::classify_move;
use crate::move_generation::move_list::{MoveList, MAX_GENERATED_MOVES};
use crate::search::board_scoring::MaterialScorer;

const PROMOTION_BONUS: i32 = 1;

/// Ordering key: captures by `victim * 10 - mover`, then promotions, then quiet moves.
#[inline]
pub fn score_move(game_state: &GameState, mv: Move) -> i32 {
    let class = classify_move(game_state, mv);
    let mover = game_state
        .piece_at(mv.from)
        .map_or(0, |piece| MaterialScorer::piece_value(piece.kind()));

    match class.captured {
        Some(victim) => MaterialScorer::piece_value(victim) * 10 - mover,
        None if class.promotion => PROMOTION_BONUS,
        None => 0,
    }
}

/// Sort `moves` best-first. The sort is stable, so equal keys keep generation order.
///
/// Keys live in a fixed array next to the list; insertion sort keeps the
/// whole pass off the heap.
pub fn order_moves(game_state: &GameState, moves: &mut MoveList) {
    let mut keys = [0i32; MAX_GENERATED_MOVES];
    for (key, mv) in keys.iter_mut().zip(moves.iter()) {
        *key = score_move(game_state, *mv);
    }

    for i in 1..moves.len() {
        let (key, mv) = (keys[i], moves[i]);
        let mut j = i;
        while j > 0 && keys[j - 1] < key {
            keys[j] = keys[j - 1];
            moves[j] = moves[j - 1];
            j -= 1;
        }
        keys[j] = key;
        moves[j] = mv;
    }
}

/// Keep only moves that remove an enemy piece.
pub fn retain_captures(game_state: &GameState, moves: &mut MoveList) {
    moves.retain(|mv| classify_move(game_state, *mv).is_capture());
}

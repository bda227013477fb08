//! Legal move filtering on top of pseudo-legal generation.
//!
//! A castle is legal when none of the squares on the king's path is attacked.
//! Every other move is applied, the mover's king is tested, and the move is
//! taken back.

use crate::chess_errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::{castling_lane_for, CastlingLane};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::move_generation::make_move::{make_move, undo_move};
use crate::move_generation::move_generator::generate_moves;
use crate::move_generation::move_list::{MoveList, MAX_LEGAL_MOVES};

/// Castling lane `mv` would use, when it is a king's two-file move from home.
#[inline]
pub fn castling_lane_of(game_state: &GameState, mv: Move) -> Option<&'static CastlingLane> {
    let piece = game_state.piece_at(mv.from)?;
    if piece.kind() != PieceKind::King {
        return None;
    }
    castling_lane_for(piece.color(), mv.from, mv.to)
}

#[inline]
fn castle_path_is_safe(game_state: &GameState, lane: &CastlingLane) -> bool {
    let enemy = lane.color.opposite();
    lane.king_path
        .iter()
        .all(|square| !is_square_attacked(game_state, *square, enemy))
}

/// Whether pseudo-legal `mv` leaves the mover's king safe.
///
/// The position is unchanged on return.
pub fn is_legal_move(game_state: &mut GameState, mv: Move) -> bool {
    if let Some(lane) = castling_lane_of(game_state, mv) {
        return castle_path_is_safe(game_state, lane);
    }

    let mover = game_state.side_to_move;
    make_move(game_state, mv);
    let legal = !is_king_in_check(game_state, mover);
    undo_move(game_state);
    legal
}

/// Apply `mv` if it is legal and report whether it was applied.
///
/// Saves the second make/undo pair that `is_legal_move` followed by
/// `make_move` would cost; perft and search use this on every node.
pub fn make_move_if_legal(game_state: &mut GameState, mv: Move) -> bool {
    if let Some(lane) = castling_lane_of(game_state, mv) {
        if !castle_path_is_safe(game_state, lane) {
            return false;
        }
    }

    let mover = game_state.side_to_move;
    make_move(game_state, mv);
    if is_king_in_check(game_state, mover) {
        undo_move(game_state);
        return false;
    }
    true
}

/// Pseudo-legal moves that survive `is_legal_move`, in generation order.
pub fn generate_legal_moves(game_state: &mut GameState) -> MoveList {
    let mut legal = generate_moves(game_state);
    legal.retain(|mv| is_legal_move(game_state, *mv));
    debug_assert!(legal.len() <= MAX_LEGAL_MOVES);
    legal
}

/// True when the side to move has at least one legal move.
pub fn has_legal_move(game_state: &mut GameState) -> bool {
    generate_moves(game_state)
        .into_iter()
        .any(|mv| is_legal_move(game_state, mv))
}

pub fn is_checkmate(game_state: &mut GameState) -> bool {
    is_king_in_check(game_state, game_state.side_to_move) && !has_legal_move(game_state)
}

pub fn is_stalemate(game_state: &mut GameState) -> bool {
    !is_king_in_check(game_state, game_state.side_to_move) && !has_legal_move(game_state)
}

/// The legal move matching `candidate` (origin, destination and promotion).
pub fn find_legal_move(game_state: &mut GameState, candidate: Move) -> EngineResult<Move> {
    generate_legal_moves(game_state)
        .into_iter()
        .find(|mv| *mv == candidate)
        .ok_or_else(|| EngineError::IllegalMove(candidate.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_has_twenty_legal_moves() {
        let mut game = GameState::new_game();
        let before = game.clone();
        assert_eq!(generate_legal_moves(&mut game).len(), 20);
        assert_eq!(game, before);
    }

    #[test]
    fn castling_through_attacked_square_is_rejected() {
        // Black rook on f8 covers f1: white may castle queenside but not kingside.
        let mut game =
            GameState::from_fen("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let legal = generate_legal_moves(&mut game);

        assert!(!legal.contains(&Move::new(4, 6)));
        assert!(legal.contains(&Move::new(4, 2)));
    }

    #[test]
    fn castling_out_of_check_is_rejected() {
        let mut game =
            GameState::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let legal = generate_legal_moves(&mut game);

        assert!(!legal.contains(&Move::new(4, 6)));
        assert!(!legal.contains(&Move::new(4, 2)));
    }

    #[test]
    fn queenside_castle_ignores_attacks_on_b_file() {
        // b1 must be empty but may be attacked.
        let mut game =
            GameState::from_fen("1r5k/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("FEN should parse");
        assert!(generate_legal_moves(&mut game).contains(&Move::new(4, 2)));
    }

    #[test]
    fn no_legal_castle_crosses_an_attacked_square() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b KQkq - 0 1",
            "r3k2r/8/8/8/8/5b2/8/R3K2R w KQkq - 0 1",
        ];
        for fen in fens {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let enemy = game.side_to_move.opposite();
            for mv in generate_legal_moves(&mut game) {
                if let Some(lane) = castling_lane_of(&game, mv) {
                    for square in lane.king_path {
                        assert!(!is_square_attacked(&game, square, enemy), "{mv} in {fen}");
                    }
                }
            }
        }
    }

    #[test]
    fn bishop_on_f3_blocks_only_queenside() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/5b2/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let legal = generate_legal_moves(&mut game);
        assert!(legal.contains(&Move::new(4, 6)));
        assert!(!legal.contains(&Move::new(4, 2)));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        let mut game =
            GameState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        assert!(generate_legal_moves(&mut game).iter().all(|mv| mv.from != 12));
    }

    #[test]
    fn detects_checkmate_and_stalemate() {
        let mut mated = GameState::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .expect("FEN should parse");
        assert!(is_checkmate(&mut mated));
        assert!(!is_stalemate(&mut mated));

        let mut stalemated =
            GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(is_stalemate(&mut stalemated));
        assert!(!is_checkmate(&mut stalemated));
    }

    #[test]
    fn find_legal_move_rejects_illegal_candidates() {
        let mut game = GameState::new_game();
        assert_eq!(find_legal_move(&mut game, Move::new(12, 28)), Ok(Move::new(12, 28)));
        assert_eq!(
            find_legal_move(&mut game, Move::new(12, 36)),
            Err(EngineError::IllegalMove("e2e5".to_owned()))
        );
    }

    #[test]
    fn make_move_if_legal_leaves_position_alone_on_rejection() {
        let mut game =
            GameState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let before = game.clone();
        assert!(!make_move_if_legal(&mut game, Move::new(12, 27)));
        assert_eq!(game, before);
        assert!(make_move_if_legal(&mut game, Move::new(4, 3)));
        assert_eq!(game.history_len(), 1);
    }
}

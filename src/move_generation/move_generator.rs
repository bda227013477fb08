//! Pseudo-legal move generation.
//!
//! Produces every move obeying piece movement rules for the side to move,
//! without checking whether the mover's king is left attacked. Castle
//! candidates are included whenever the right is held and the lane is empty;
//! `legality` filters the rest.

use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_list::MoveList;
use crate::move_generation::pseudo_moves_king::king_targets;
use crate::move_generation::pseudo_moves_pawn::pawn_targets;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::sliding_moves::{bishop_attacks, queen_attacks, rook_attacks};

/// All pseudo-legal moves for `game_state.side_to_move`.
pub fn generate_moves(game_state: &GameState) -> MoveList {
    let mut moves = MoveList::new();
    let side = game_state.side_to_move;
    let mut own = game_state.occupancy[side.index()];

    while own != 0 {
        let from = own.trailing_zeros() as Square;
        own &= own - 1;

        let Some(piece) = game_state.piece_at(from) else {
            debug_assert!(false, "occupancy bit {from} without a mailbox piece");
            continue;
        };

        let targets = piece_targets(game_state, from, piece);
        if piece.kind() == PieceKind::Pawn {
            push_pawn_moves(&mut moves, from, targets, side);
        } else {
            push_moves(&mut moves, from, targets);
        }
    }

    moves
}

/// Destination set of `piece` on `from`, own-occupied squares removed.
#[inline]
pub fn piece_targets(game_state: &GameState, from: Square, piece: Piece) -> Bitboard {
    let color = piece.color();
    let occupied = game_state.occupancy_all();
    let own = game_state.occupancy[color.index()];

    match piece.kind() {
        PieceKind::Pawn => pawn_targets(game_state, from, color),
        PieceKind::Knight => knight_attacks(from) & !own,
        PieceKind::Bishop => bishop_attacks(from, occupied) & !own,
        PieceKind::Rook => rook_attacks(from, occupied) & !own,
        PieceKind::Queen => queen_attacks(from, occupied) & !own,
        PieceKind::King => king_targets(game_state, from, color),
    }
}

#[inline]
fn push_moves(moves: &mut MoveList, from: Square, mut targets: Bitboard) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        targets &= targets - 1;
        moves.push(Move::new(from, to));
    }
}

/// Pawn arrivals on the last rank expand into one move per promotion piece.
#[inline]
fn push_pawn_moves(moves: &mut MoveList, from: Square, mut targets: Bitboard, color: Color) {
    let last_rank = promotion_rank(color);
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        targets &= targets - 1;
        if to / 8 == last_rank {
            for kind in PieceKind::PROMOTIONS {
                moves.push(Move::with_promotion(from, to, kind));
            }
        } else {
            moves.push(Move::new(from, to));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_moves;
    use crate::game_state::chess_types::*;

    #[test]
    fn start_position_has_twenty_pseudo_moves() {
        let game = GameState::new_game();
        assert_eq!(generate_moves(&game).len(), 20);
    }

    #[test]
    fn no_move_lands_on_own_piece() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 0 1",
        ];
        for fen in fens {
            let game = GameState::from_fen(fen).expect("FEN should parse");
            let own = game.occupancy[game.side_to_move.index()];
            for mv in generate_moves(&game) {
                assert_eq!(own & (1u64 << mv.to), 0, "{mv} lands on own piece in {fen}");
                assert_ne!(own & (1u64 << mv.from), 0, "{mv} starts off own pieces in {fen}");
            }
        }
    }

    #[test]
    fn promotion_push_expands_into_four_moves() {
        let game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let promotions: Vec<Move> = generate_moves(&game)
            .into_iter()
            .filter(|mv| mv.from == 48)
            .collect();

        assert_eq!(promotions.len(), 4);
        for kind in PieceKind::PROMOTIONS {
            assert!(promotions.contains(&Move::with_promotion(48, 56, kind)));
        }
    }

    #[test]
    fn pinned_piece_moves_are_still_generated() {
        // Knight on e2 is pinned by the rook on e8; pseudo-legal generation ignores pins.
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let knight_moves = generate_moves(&game)
            .into_iter()
            .filter(|mv| mv.from == 12)
            .count();
        assert_eq!(knight_moves, 6);
    }
}

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attackers_of;
use crate::moves::sliding_moves::{bishop_attacks, rook_attacks};

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = game_state.king_square(color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Whether any piece of `attacker_color` attacks `square`.
///
/// Works from the target outward: each attack pattern is cast from `square`
/// and intersected with the matching attacker bitboard. Attacks are counted
/// whether or not `square` is occupied, and regardless of pins.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let pieces = |kind| game_state.pieces(attacker_color, kind);

    if pawn_attackers_of(attacker_color, square) & pieces(PieceKind::Pawn) != 0 {
        return true;
    }

    if knight_attacks(square) & pieces(PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & pieces(PieceKind::King) != 0 {
        return true;
    }

    let occupied = game_state.occupancy_all();
    let queens = pieces(PieceKind::Queen);

    if bishop_attacks(square, occupied) & (pieces(PieceKind::Bishop) | queens) != 0 {
        return true;
    }

    rook_attacks(square, occupied) & (pieces(PieceKind::Rook) | queens) != 0
}

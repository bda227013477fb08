//! Pawn target generation.

use crate::game_state::chess_rules::pawn_start_rank;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::board_masks::square_mask;
use crate::moves::pawn_moves::{pawn_attacks, pawn_single_pushes};

/// Pseudo-legal destinations of a `color` pawn standing on `from`.
///
/// Pushes only onto empty squares (the double push also needs the square in
/// between empty); diagonals only onto enemy pieces or the en-passant square.
pub fn pawn_targets(game_state: &GameState, from: Square, color: Color) -> Bitboard {
    let origin = square_mask(from);
    let empty = !game_state.occupancy_all();

    let single = pawn_single_pushes(color, origin, empty);
    let mut targets = single;
    if single != 0 && from / 8 == pawn_start_rank(color) {
        targets |= pawn_single_pushes(color, single, empty);
    }

    let en_passant = game_state
        .en_passant_square
        .map_or(0, square_mask);
    let capturable = game_state.occupancy[color.opposite().index()] | en_passant;
    targets |= pawn_attacks(color, from) & capturable;

    targets & !game_state.occupancy[color.index()]
}

#[cfg(test)]
mod tests {
    use super::pawn_targets;
    use crate::game_state::chess_types::*;

    #[test]
    fn start_rank_pawn_gets_single_and_double_push() {
        let game = GameState::new_game();
        let e2 = 12u8;
        assert_eq!(pawn_targets(&game, e2, Color::White), (1u64 << 20) | (1u64 << 28));
    }

    #[test]
    fn blocked_pawn_has_no_double_push() {
        let game = GameState::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(pawn_targets(&game, 12, Color::White), 0);

        let game = GameState::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(pawn_targets(&game, 12, Color::White), 1u64 << 20);
    }

    #[test]
    fn captures_include_en_passant_square() {
        let game =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let e5 = 36u8;
        let d6 = 43u8;
        let e6 = 44u8;
        assert_eq!(pawn_targets(&game, e5, Color::White), (1u64 << d6) | (1u64 << e6));
    }

    #[test]
    fn black_pawn_moves_down_the_board() {
        let game = GameState::new_game();
        let d7 = 51u8;
        assert_eq!(pawn_targets(&game, d7, Color::Black), (1u64 << 43) | (1u64 << 35));
    }
}

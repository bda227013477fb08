//! King target generation, including unchecked castle candidates.

use crate::game_state::chess_rules::CASTLING_LANES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::board_masks::square_mask;
use crate::moves::king_moves::king_attacks;

/// Step targets plus a two-file castle target for each lane whose right is
/// set, whose king square matches `from`, and whose in-between squares are
/// empty. Whether the king crosses attacked squares is left to the legality
/// filter.
pub fn king_targets(game_state: &GameState, from: Square, color: Color) -> Bitboard {
    let mut targets = king_attacks(from);
    let occupied = game_state.occupancy_all();

    for lane in CASTLING_LANES.iter().filter(|lane| lane.color == color) {
        if lane.king_from == from
            && game_state.castling_rights & lane.right != 0
            && occupied & lane.empty_mask == 0
        {
            targets |= square_mask(lane.king_to);
        }
    }

    targets & !game_state.occupancy[color.index()]
}

#[cfg(test)]
mod tests {
    use super::king_targets;
    use crate::game_state::chess_types::*;

    #[test]
    fn castle_candidates_need_empty_lanes() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let targets = king_targets(&game, 4, Color::White);
        assert_ne!(targets & (1u64 << 6), 0);
        assert_ne!(targets & (1u64 << 2), 0);

        let blocked = GameState::from_fen("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1").expect("FEN should parse");
        let targets = king_targets(&blocked, 4, Color::White);
        assert_eq!(targets & (1u64 << 6), 0);
        assert_eq!(targets & (1u64 << 2), 0);
    }

    #[test]
    fn castle_candidates_need_rights() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1").expect("FEN should parse");
        let targets = king_targets(&game, 60, Color::Black);
        assert_eq!(targets & (1u64 << 62), 0);
        assert_ne!(targets & (1u64 << 58), 0);
    }
}

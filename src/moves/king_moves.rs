//! King step table.
//!
//! Eight one-square neighbours per square, produced with edge-masked shifts.
//! Castling targets are not part of the table; the king generator adds them.

use crate::game_state::chess_types::Bitboard;
use crate::moves::board_masks::{shift, NOT_FILE_A, NOT_FILE_H};

const KING_STEPS: [(i32, Bitboard); 8] = [
    (9, NOT_FILE_A),
    (8, !0),
    (7, NOT_FILE_H),
    (1, NOT_FILE_A),
    (-1, NOT_FILE_H),
    (-7, NOT_FILE_A),
    (-8, !0),
    (-9, NOT_FILE_H),
];

pub const KING_ATTACKS: [Bitboard; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: u8) -> Bitboard {
    KING_ATTACKS[square as usize]
}

const fn generate_king_attacks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let origin = 1u64 << sq;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < KING_STEPS.len() {
            let (offset, mask) = KING_STEPS[i];
            attacks |= shift(origin, offset) & mask;
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{king_attacks, KING_ATTACKS};

    #[test]
    fn king_attacks_from_a1_has_three_targets() {
        let a1 = 0u8;
        assert_eq!(KING_ATTACKS[a1 as usize].count_ones(), 3);
        assert_eq!(king_attacks(a1), (1u64 << 1) | (1u64 << 8) | (1u64 << 9));
    }

    #[test]
    fn king_attacks_on_h_file_do_not_wrap() {
        let h4 = 31u8;
        let expected = (1u64 << 22) | (1u64 << 23) | (1u64 << 30) | (1u64 << 38) | (1u64 << 39);
        assert_eq!(king_attacks(h4), expected);
    }

    #[test]
    fn interior_king_has_eight_targets() {
        for square in 0..64u8 {
            let file = square % 8;
            let rank = square / 8;
            let expected = match (file == 0 || file == 7, rank == 0 || rank == 7) {
                (true, true) => 3,
                (true, false) | (false, true) => 5,
                (false, false) => 8,
            };
            assert_eq!(king_attacks(square).count_ones(), expected, "square {square}");
        }
    }
}

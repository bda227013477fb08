//! Knight jump table.
//!
//! Built at compile time by shifting each one-bit board through the eight
//! L-shaped offsets and dropping bits that wrapped across the a/h edge.

use crate::game_state::chess_types::Bitboard;
use crate::moves::board_masks::{shift, NOT_FILE_A, NOT_FILE_AB, NOT_FILE_GH, NOT_FILE_H};

/// (offset, mask applied after the shift)
const KNIGHT_JUMPS: [(i32, Bitboard); 8] = [
    (17, NOT_FILE_A),
    (15, NOT_FILE_H),
    (10, NOT_FILE_AB),
    (6, NOT_FILE_GH),
    (-6, NOT_FILE_AB),
    (-10, NOT_FILE_GH),
    (-15, NOT_FILE_A),
    (-17, NOT_FILE_H),
];

pub const KNIGHT_ATTACKS: [Bitboard; 64] = generate_knight_attacks();

#[inline]
pub const fn knight_attacks(square: u8) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

const fn generate_knight_attacks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let origin = 1u64 << sq;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < KNIGHT_JUMPS.len() {
            let (offset, mask) = KNIGHT_JUMPS[i];
            attacks |= shift(origin, offset) & mask;
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

//! File/rank masks and the signed shift used by every attack generator.
//!
//! Shifting a bitboard left or right by 1, 7, 9 (and 6, 10, 15, 17 for
//! knights) moves bits across the a/h file boundary. Each such shift is paired
//! with a mask that removes bits which wrapped onto the opposite edge.

use crate::game_state::chess_types::Bitboard;

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;

pub const NOT_FILE_A: Bitboard = !FILE_A;
pub const NOT_FILE_H: Bitboard = !FILE_H;
pub const NOT_FILE_AB: Bitboard = !(FILE_A | FILE_B);
pub const NOT_FILE_GH: Bitboard = !(FILE_G | FILE_H);

pub const RANK_1: Bitboard = 0xff;
pub const RANK_8: Bitboard = RANK_1 << 56;

/// Shift toward higher squares for positive offsets, lower squares otherwise.
#[inline]
pub const fn shift(bb: Bitboard, offset: i32) -> Bitboard {
    if offset >= 0 {
        bb << offset
    } else {
        bb >> -offset
    }
}

/// Single-bit mask for a square index.
#[inline]
pub const fn square_mask(square: u8) -> Bitboard {
    1u64 << square
}

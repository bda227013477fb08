//! Pawn push and capture patterns.
//!
//! Set-wise shifts over a whole pawn bitboard. Diagonal shifts are masked so
//! a pawn on the a or h file never captures onto the opposite edge.

use crate::game_state::chess_types::{Bitboard, Color};
use crate::moves::board_masks::{NOT_FILE_A, NOT_FILE_H};

/// Squares attacked by `pawns` of `color`.
#[inline]
pub const fn pawn_attack_span(color: Color, pawns: Bitboard) -> Bitboard {
    match color {
        Color::White => ((pawns << 7) & NOT_FILE_H) | ((pawns << 9) & NOT_FILE_A),
        Color::Black => ((pawns >> 7) & NOT_FILE_A) | ((pawns >> 9) & NOT_FILE_H),
    }
}

pub const WHITE_PAWN_ATTACKS: [Bitboard; 64] = generate_pawn_attacks(Color::White);
pub const BLACK_PAWN_ATTACKS: [Bitboard; 64] = generate_pawn_attacks(Color::Black);

/// Capture targets of a single pawn of `color` on `square`.
#[inline]
pub const fn pawn_attacks(color: Color, square: u8) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

/// Squares holding a pawn of `color` that would attack `square`.
///
/// A pawn of `color` attacks `square` exactly when a pawn of the opposite
/// color standing on `square` would attack the pawn's square.
#[inline]
pub const fn pawn_attackers_of(color: Color, square: u8) -> Bitboard {
    pawn_attacks(color.opposite(), square)
}

/// One-step pushes of `pawns` of `color` onto `empty` squares.
#[inline]
pub const fn pawn_single_pushes(color: Color, pawns: Bitboard, empty: Bitboard) -> Bitboard {
    match color {
        Color::White => (pawns << 8) & empty,
        Color::Black => (pawns >> 8) & empty,
    }
}

const fn generate_pawn_attacks(color: Color) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = pawn_attack_span(color, 1u64 << sq);
        sq += 1;
    }

    table
}

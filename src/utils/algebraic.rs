//! Square and bitboard conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square/bitboard representations reused by FEN and move-text parsing.

use crate::chess_errors::{EngineError, EngineResult};
use crate::game_state::chess_types::{Bitboard, Square};

/// Convert an algebraic square (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> EngineResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(EngineError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(EngineError::InvalidSquare(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to algebraic form (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> EngineResult<String> {
    if square > 63 {
        return Err(EngineError::InvalidSquare(square.to_string()));
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    Ok(format!("{file_char}{rank_char}"))
}

/// Algebraic names of every square in `bitboard`, lowest index first.
pub fn bitboard_to_squares(mut bitboard: Bitboard) -> Vec<String> {
    let mut names = Vec::with_capacity(bitboard.count_ones() as usize);
    while bitboard != 0 {
        let square = bitboard.trailing_zeros() as Square;
        bitboard &= bitboard - 1;
        names.push(format!(
            "{}{}",
            char::from(b'a' + square % 8),
            char::from(b'1' + square / 8)
        ));
    }
    names
}

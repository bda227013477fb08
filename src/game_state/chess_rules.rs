//! Canonical chess-rule constants.
//!
//! Static rule data: the starting position and the fixed geometry of the
//! four castling moves, shared by generation, application, legality and FEN
//! validation so that none of them hard-code corner squares separately.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Squares one castling move touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub color: Color,
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook; all must be empty.
    pub empty_mask: Bitboard,
    /// King origin, crossed square, destination; none may be attacked.
    pub king_path: [Square; 3],
}

pub const CASTLING_LANES: [CastlingLane; 4] = [
    CastlingLane {
        color: Color::White,
        right: CASTLE_WHITE_KINGSIDE,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        rook_to: 5,
        empty_mask: (1 << 5) | (1 << 6),
        king_path: [4, 5, 6],
    },
    CastlingLane {
        color: Color::White,
        right: CASTLE_WHITE_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        rook_to: 3,
        empty_mask: (1 << 1) | (1 << 2) | (1 << 3),
        king_path: [4, 3, 2],
    },
    CastlingLane {
        color: Color::Black,
        right: CASTLE_BLACK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        rook_to: 61,
        empty_mask: (1 << 61) | (1 << 62),
        king_path: [60, 61, 62],
    },
    CastlingLane {
        color: Color::Black,
        right: CASTLE_BLACK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        rook_to: 59,
        empty_mask: (1 << 57) | (1 << 58) | (1 << 59),
        king_path: [60, 59, 58],
    },
];

/// Lane matching a king move, if the move is a castle for `color`.
#[inline]
pub fn castling_lane_for(color: Color, from: Square, to: Square) -> Option<&'static CastlingLane> {
    CASTLING_LANES
        .iter()
        .find(|lane| lane.color == color && lane.king_from == from && lane.king_to == to)
}

/// Right lost when a piece leaves or lands on `square` (rook corners only).
#[inline]
pub const fn corner_right(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}

#[inline]
pub const fn both_rights(color: Color) -> CastlingRights {
    match color {
        Color::White => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        Color::Black => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
    }
}

/// Rank (0-based) pawns of `color` start on.
#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

/// Rank (0-based) where pawns of `color` promote.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

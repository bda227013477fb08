//! Ray-cast attacks for bishops, rooks and queens.
//!
//! No lookup tables: each ray walks one square at a time from the origin,
//! bounded by the number of squares left before the edge in that direction,
//! and stops on (and includes) the first occupied square.

use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::board_masks::shift;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayDirection {
    pub offset: i32,
    pub file_step: i8,
    pub rank_step: i8,
}

impl RayDirection {
    const fn new(file_step: i8, rank_step: i8) -> Self {
        Self {
            offset: file_step as i32 + 8 * rank_step as i32,
            file_step,
            rank_step,
        }
    }

    /// Steps available from `square` before the ray leaves the board.
    #[inline]
    pub const fn distance_to_edge(self, square: Square) -> u8 {
        let file = square % 8;
        let rank = square / 8;
        let file_room = match self.file_step {
            1 => 7 - file,
            -1 => file,
            _ => 7,
        };
        let rank_room = match self.rank_step {
            1 => 7 - rank,
            -1 => rank,
            _ => 7,
        };
        if file_room < rank_room {
            file_room
        } else {
            rank_room
        }
    }
}

pub const ORTHOGONAL_DIRECTIONS: [RayDirection; 4] = [
    RayDirection::new(1, 0),
    RayDirection::new(-1, 0),
    RayDirection::new(0, 1),
    RayDirection::new(0, -1),
];

pub const DIAGONAL_DIRECTIONS: [RayDirection; 4] = [
    RayDirection::new(1, 1),
    RayDirection::new(-1, -1),
    RayDirection::new(-1, 1),
    RayDirection::new(1, -1),
];

/// Union of the rays from `square` along `directions`, blocked by `occupancy`.
#[inline]
pub fn ray_attacks(square: Square, occupancy: Bitboard, directions: &[RayDirection]) -> Bitboard {
    let origin = 1u64 << square;
    let mut attacks = 0u64;

    for direction in directions {
        let mut bb = origin;
        for _ in 0..direction.distance_to_edge(square) {
            bb = shift(bb, direction.offset);
            attacks |= bb;
            if bb & occupancy != 0 {
                break;
            }
        }
    }

    attacks
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    ray_attacks(square, occupancy, &DIAGONAL_DIRECTIONS)
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    ray_attacks(square, occupancy, &ORTHOGONAL_DIRECTIONS)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(square: Square, occupancy: Bitboard, steps: &[(i32, i32)]) -> Bitboard {
        let mut out = 0u64;
        for (df, dr) in steps {
            let mut f = (square % 8) as i32 + df;
            let mut r = (square / 8) as i32 + dr;
            while (0..8).contains(&f) && (0..8).contains(&r) {
                let bit = 1u64 << (r * 8 + f);
                out |= bit;
                if occupancy & bit != 0 {
                    break;
                }
                f += df;
                r += dr;
            }
        }
        out
    }

    #[test]
    fn rook_rays_from_d4_have_fourteen_squares() {
        let d4 = 27u8;
        assert_eq!(rook_attacks(d4, 0).count_ones(), 14);
        assert_eq!(bishop_attacks(d4, 0).count_ones(), 13);
        assert_eq!(queen_attacks(d4, 0).count_ones(), 27);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let a1 = 0u8;
        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks(a1, blocker_on_a4);

        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
    }

    #[test]
    fn rays_match_coordinate_walk_on_every_square() {
        let occupancy = 0x0042_1800_2400_8100u64;
        let orthogonal = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        let diagonal = [(1, 1), (-1, -1), (-1, 1), (1, -1)];
        for square in 0..64u8 {
            assert_eq!(
                rook_attacks(square, occupancy),
                reference(square, occupancy, &orthogonal),
                "rook on {square}"
            );
            assert_eq!(
                bishop_attacks(square, occupancy),
                reference(square, occupancy, &diagonal),
                "bishop on {square}"
            );
        }
    }

    #[test]
    fn distance_to_edge_on_h_file() {
        let h4 = 31u8;
        assert_eq!(ORTHOGONAL_DIRECTIONS[0].distance_to_edge(h4), 0);
        assert_eq!(ORTHOGONAL_DIRECTIONS[1].distance_to_edge(h4), 7);
        assert_eq!(DIAGONAL_DIRECTIONS[0].distance_to_edge(h4), 0);
        assert_eq!(DIAGONAL_DIRECTIONS[2].distance_to_edge(h4), 4);
    }
}

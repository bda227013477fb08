//! Fixed-capacity move buffer.
//!
//! Generation writes into an `ArrayVec` on the stack so the recursive search
//! and perft never allocate per node. The largest known legal move count of
//! any chess position is 218; the buffer leaves headroom for pseudo-legal
//! extras (castle candidates, pinned-piece moves). Pushing past capacity
//! panics, which is the intended response to a generator bug.

use arrayvec::ArrayVec;

use crate::game_state::chess_types::Move;

/// Largest number of legal moves in any reachable chess position.
pub const MAX_LEGAL_MOVES: usize = 218;

/// Capacity of a pseudo-legal move buffer.
pub const MAX_GENERATED_MOVES: usize = 256;

pub type MoveList = ArrayVec<Move, MAX_GENERATED_MOVES>;

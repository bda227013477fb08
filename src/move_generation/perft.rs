//! Move-path enumeration for validating generation and make/undo.

use std::fmt;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legality::make_move_if_legal;
use crate::move_generation::make_move::{classify_move, undo_move};
use crate::move_generation::move_generator::generate_moves;

/// Leaf-move breakdown reported by `perft_detailed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

/// Number of legal move sequences of length `depth` from `game_state`.
///
/// `depth == 0` counts the current position as one node. The position is
/// restored before returning.
pub fn perft(game_state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in generate_moves(game_state) {
        if !make_move_if_legal(game_state, mv) {
            continue;
        }
        nodes += perft(game_state, depth - 1);
        undo_move(game_state);
    }
    nodes
}

/// Like `perft`, with the last move of every path classified.
pub fn perft_detailed(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generate_moves(game_state) {
        let class = classify_move(game_state, mv);
        if !make_move_if_legal(game_state, mv) {
            continue;
        }

        if depth == 1 {
            total.merge(PerftCounts {
                nodes: 1,
                captures: class.is_capture() as u64,
                en_passant: class.en_passant as u64,
                castles: class.castle as u64,
                promotions: class.promotion as u64,
                checks: is_king_in_check(game_state, game_state.side_to_move) as u64,
            });
        } else {
            total.merge(perft_detailed(game_state, depth - 1));
        }

        undo_move(game_state);
    }
    total
}

/// Per-root-move node counts, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivideReport {
    pub entries: Vec<(Move, u64)>,
    pub total: u64,
}

impl fmt::Display for DivideReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (mv, nodes) in &self.entries {
            writeln!(f, "{mv}: {nodes}")?;
        }
        write!(f, "Total nodes: {}", self.total)
    }
}

/// Split `perft(depth)` by root move; entries sum to `total`.
///
/// `depth == 0` yields no entries and a total of zero.
pub fn divide(game_state: &mut GameState, depth: u8) -> DivideReport {
    let mut report = DivideReport::default();
    if depth == 0 {
        return report;
    }

    for mv in generate_moves(game_state) {
        if !make_move_if_legal(game_state, mv) {
            continue;
        }
        let nodes = perft(game_state, depth - 1);
        undo_move(game_state);

        report.entries.push((mv, nodes));
        report.total += nodes;
    }
    report
}

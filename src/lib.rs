//! Crate root module declarations for the Dualboard chess engine core.
//!
//! This file exposes all top-level subsystems (game state, attack tables,
//! move generation, search, engines, UCI protocol handling, and utility
//! helpers) so the binary, tests, and benchmarks can import stable module
//! paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod board_masks;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legality;
    pub mod make_move;
    pub mod move_generator;
    pub mod move_list;
    pub mod perft;
    pub mod pseudo_moves_king;
    pub mod pseudo_moves_pawn;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod move_ordering;
}

pub mod engines {
    pub mod engine_alpha_beta;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod uci {
    pub mod uci_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}

//! Fixed-depth negamax search with alpha-beta pruning.
//!
//! Searches the live position in place: every node generates pseudo-legal
//! moves, filters them through `make_move_if_legal`, recurses, and undoes.
//! Scores are fail-soft and always from the side to move's perspective.

use chrono::Utc;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legality::make_move_if_legal;
use crate::move_generation::make_move::undo_move;
use crate::move_generation::move_generator::generate_moves;
use crate::search::board_scoring::{BoardScorer, MaterialScorer, MATE_SCORE};
use crate::search::move_ordering::{order_moves, retain_captures};

pub const MAX_SEARCH_DEPTH: u8 = 32;

/// Bound wider than any reachable score.
const INFINITY: i32 = MATE_SCORE + 1;

/// Quiescence stops extending past this ply.
const MAX_PLY: u16 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Resolve captures at the horizon instead of scoring it directly.
    pub quiescence: bool,
    pub move_ordering: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            quiescence: false,
            move_ordering: true,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth: max_depth.clamp(1, MAX_SEARCH_DEPTH),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the root has no legal move.
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed_ms: i64,
}

struct Searcher<'a, S: BoardScorer> {
    scorer: &'a S,
    config: &'a SearchConfig,
    nodes: u64,
    root_best: Option<Move>,
}

/// Search `game_state` to `config.max_depth` plies with the material scorer.
pub fn search(game_state: &mut GameState, config: &SearchConfig) -> SearchResult {
    search_with_scorer(game_state, config, &MaterialScorer)
}

pub fn search_with_scorer<S: BoardScorer>(
    game_state: &mut GameState,
    config: &SearchConfig,
    scorer: &S,
) -> SearchResult {
    let started = Utc::now();
    let depth = config.max_depth.clamp(1, MAX_SEARCH_DEPTH);

    let mut searcher = Searcher {
        scorer,
        config,
        nodes: 0,
        root_best: None,
    };
    let best_score = searcher.negamax(game_state, depth, 0, -INFINITY, INFINITY);

    SearchResult {
        best_move: searcher.root_best,
        best_score,
        depth,
        nodes: searcher.nodes,
        elapsed_ms: (Utc::now() - started).num_milliseconds(),
    }
}

/// Best move at a fixed depth with default settings, or `None` when there is no legal move.
pub fn search_best_move(game_state: &mut GameState, max_depth: u8) -> Option<Move> {
    search(game_state, &SearchConfig::with_depth(max_depth)).best_move
}

impl<S: BoardScorer> Searcher<'_, S> {
    fn negamax(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        ply: u16,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return if self.config.quiescence {
                self.quiescence(game_state, ply, alpha, beta)
            } else {
                self.scorer.score(game_state)
            };
        }

        let mut moves = generate_moves(game_state);
        if self.config.move_ordering {
            order_moves(game_state, &mut moves);
        }

        let mut best = -INFINITY;
        let mut any_legal = false;

        for mv in moves {
            if !make_move_if_legal(game_state, mv) {
                continue;
            }
            any_legal = true;

            let score = -self.negamax(game_state, depth - 1, ply + 1, -beta, -alpha);
            undo_move(game_state);

            if score > best {
                best = score;
                if ply == 0 {
                    self.root_best = Some(mv);
                }
            }
            if score > alpha {
                alpha = score;
            }
            if score >= beta {
                break;
            }
        }

        if !any_legal {
            return terminal_score(game_state, ply);
        }
        best
    }

    /// Captures-only extension with a stand-pat lower bound.
    fn quiescence(&mut self, game_state: &mut GameState, ply: u16, mut alpha: i32, beta: i32) -> i32 {
        let stand_pat = self.scorer.score(game_state);
        if stand_pat >= beta || ply >= MAX_PLY {
            return stand_pat;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut captures = generate_moves(game_state);
        retain_captures(game_state, &mut captures);
        order_moves(game_state, &mut captures);

        let mut best = stand_pat;
        for mv in captures {
            if !make_move_if_legal(game_state, mv) {
                continue;
            }
            self.nodes += 1;
            let score = -self.quiescence(game_state, ply + 1, -beta, -alpha);
            undo_move(game_state);

            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if score >= beta {
                break;
            }
        }
        best
    }
}

fn terminal_score(game_state: &GameState, ply: u16) -> i32 {
    if is_king_in_check(game_state, game_state.side_to_move) {
        -MATE_SCORE + i32::from(ply)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legality::is_checkmate;
    use crate::move_generation::make_move::make_move;

    #[test]
    fn search_finds_mate_in_one() {
        let mut game =
            GameState::from_fen("7k/Q7/6K1/8/8/8/8/8 w - - 0 1").expect("FEN should parse");
        let result = search(&mut game, &SearchConfig::with_depth(2));
        let best = result.best_move.expect("white has moves");
        assert_eq!(result.best_score, MATE_SCORE - 1, "best move {best}");

        // More than one move mates here; replay the choice instead of naming it.
        make_move(&mut game, best);
        assert!(is_checkmate(&mut game), "{best} should deliver mate");
    }

    #[test]
    fn search_takes_the_hanging_queen() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/4q3/4KQ2 w - - 0 1").expect("FEN should parse");
        assert_eq!(search_best_move(&mut game, 1), Some(Move::new(5, 12)));
    }

    #[test]
    fn search_leaves_the_position_unchanged() {
        let mut game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let before = game.clone();
        let result = search(&mut game, &SearchConfig::with_depth(3));

        assert!(result.best_move.is_some());
        assert!(result.nodes > 0);
        assert_eq!(game, before);
    }

    #[test]
    fn checkmated_root_has_no_best_move() {
        let mut game = GameState::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .expect("FEN should parse");
        let result = search(&mut game, &SearchConfig::with_depth(3));
        assert_eq!(result.best_move, None);
        assert_eq!(result.best_score, -MATE_SCORE);
    }

    #[test]
    fn stalemated_root_scores_zero() {
        let mut game =
            GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let result = search(&mut game, &SearchConfig::with_depth(2));
        assert_eq!(result.best_move, None);
        assert_eq!(result.best_score, 0);
    }

    #[test]
    fn ordering_and_quiescence_do_not_change_the_mate() {
        let fen = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1";
        for (quiescence, move_ordering) in [(false, false), (true, true), (true, false)] {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let config = SearchConfig {
                max_depth: 2,
                quiescence,
                move_ordering,
            };
            let result = search(&mut game, &config);
            assert_eq!(result.best_move, Some(Move::new(0, 56)));
            assert_eq!(result.best_score, MATE_SCORE - 1);
        }
    }

    #[test]
    fn quiescence_sees_the_recapture() {
        // Qxd5 wins a pawn at depth 1 but loses the queen to the recapture.
        let fen = "4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1";
        let mut plain = GameState::from_fen(fen).expect("FEN should parse");
        let greedy = search(&mut plain, &SearchConfig::with_depth(1));
        assert_eq!(greedy.best_move, Some(Move::new(3, 35)));

        let mut careful = GameState::from_fen(fen).expect("FEN should parse");
        let config = SearchConfig {
            max_depth: 1,
            quiescence: true,
            move_ordering: true,
        };
        let result = search(&mut careful, &config);
        assert_ne!(result.best_move, Some(Move::new(3, 35)));
    }

    #[test]
    fn depth_is_clamped() {
        assert_eq!(SearchConfig::with_depth(0).max_depth, 1);
        assert_eq!(SearchConfig::with_depth(200).max_depth, MAX_SEARCH_DEPTH);
    }
}

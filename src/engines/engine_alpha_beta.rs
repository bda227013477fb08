//! Fixed-depth alpha-beta engine over the material scorer.

use crate::chess_errors::{EngineError, EngineResult};
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;
use crate::search::alpha_beta::{search_with_scorer, SearchConfig, MAX_SEARCH_DEPTH};
use crate::search::board_scoring::{MaterialScorer, MATE_SCORE};

#[derive(Debug, Clone, Default)]
pub struct AlphaBetaEngine {
    config: SearchConfig,
    scorer: MaterialScorer,
}

impl AlphaBetaEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            scorer: MaterialScorer,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

fn parse_check(name: &str, value: &str) -> EngineResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => Err(EngineError::InvalidOption(format!("{name} expects true/false, got {value}"))),
    }
}

/// `cp N`, or `mate N` (moves, negative when being mated) near the mate bound.
fn score_text(score: i32) -> String {
    let distance = MATE_SCORE - score.abs();
    if distance < i32::from(MAX_SEARCH_DEPTH) * 2 {
        let moves = (distance + 1) / 2;
        if score > 0 {
            format!("mate {moves}")
        } else {
            format!("mate -{moves}")
        }
    } else {
        format!("cp {score}")
    }
}

impl Engine for AlphaBetaEngine {
    fn name(&self) -> &str {
        "alphabeta"
    }

    fn set_option(&mut self, name: &str, value: &str) -> EngineResult<()> {
        match name.to_ascii_lowercase().as_str() {
            "depth" => {
                let depth: u8 = value
                    .parse()
                    .map_err(|_| EngineError::InvalidOption(format!("Depth expects a number, got {value}")))?;
                self.config.max_depth = depth.clamp(1, MAX_SEARCH_DEPTH);
            }
            "quiescence" => self.config.quiescence = parse_check(name, value)?,
            "moveordering" => self.config.move_ordering = parse_check(name, value)?,
            _ => return Err(EngineError::InvalidOption(format!("unknown option {name}"))),
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
    ) -> EngineResult<EngineOutput> {
        let mut config = self.config;
        if let Some(depth) = params.depth {
            config.max_depth = depth.clamp(1, MAX_SEARCH_DEPTH);
        }

        let result = search_with_scorer(game_state, &config, &self.scorer);

        let mut out = EngineOutput {
            best_move: result.best_move,
            ..EngineOutput::default()
        };
        let mut line = format!(
            "info depth {} score {} nodes {} time {}",
            result.depth,
            score_text(result.best_score),
            result.nodes,
            result.elapsed_ms
        );
        if let Some(mv) = result.best_move {
            line.push_str(&format!(" pv {mv}"));
        }
        out.info_lines.push(line);
        Ok(out)
    }
}

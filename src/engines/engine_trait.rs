//! Engine abstraction layer used by the protocol loop.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::chess_errors::EngineResult;
use crate::game_state::{chess_types::Move, game_state::GameState};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Overrides the engine's configured depth for this search only.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> EngineResult<()> {
        Ok(())
    }

    /// Pick a move for the side to move. `game_state` is borrowed mutably for
    /// in-place search and is unchanged on return.
    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
    ) -> EngineResult<EngineOutput>;
}

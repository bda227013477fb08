//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands plus a handful of debugging commands (`perft`,
//! `divide`, `move`, `undo`, `print`, ...), maintains the current position,
//! routes `go` requests to the selected engine and emits protocol output.
//! Malformed commands produce one `info string` line and leave the position
//! untouched.

use std::io::{self, BufRead, Write};

use chrono::Utc;

use crate::chess_errors::{EngineError, EngineResult};
use crate::engines::engine_alpha_beta::AlphaBetaEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legality::generate_legal_moves;
use crate::move_generation::make_move::{make_move, undo_move};
use crate::move_generation::perft::{divide, perft};
use crate::search::alpha_beta::{SearchConfig, MAX_SEARCH_DEPTH};
use crate::utils::algebraic::bitboard_to_squares;
use crate::utils::long_algebraic::resolve_long_algebraic;
use crate::utils::render_game_state::{render_bitboard, render_game_state};

const UCI_ENGINE_NAME: &str = "Dualboard";
const UCI_ENGINE_AUTHOR: &str = "the Dualboard developers";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineKind {
    AlphaBeta,
    Random,
}

impl EngineKind {
    fn parse(value: &str) -> EngineResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "alphabeta" => Ok(EngineKind::AlphaBeta),
            "random" => Ok(EngineKind::Random),
            _ => Err(EngineError::InvalidOption(format!(
                "Engine expects alphabeta or random, got {value}"
            ))),
        }
    }
}

fn build_engine(kind: EngineKind, config: SearchConfig) -> Box<dyn Engine> {
    match kind {
        EngineKind::AlphaBeta => Box::new(AlphaBetaEngine::new(config)),
        EngineKind::Random => Box::new(RandomEngine::new()),
    }
}

struct UciState {
    game_state: GameState,
    engine: Box<dyn Engine>,
    engine_kind: EngineKind,
    search_config: SearchConfig,
    debug_mode: bool,
}

impl UciState {
    fn new() -> Self {
        let engine_kind = EngineKind::AlphaBeta;
        let search_config = SearchConfig::default();
        Self {
            game_state: GameState::new_game(),
            engine: build_engine(engine_kind, search_config),
            engine_kind,
            search_config,
            debug_mode: false,
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let reply = match cmd {
            "uci" => Ok(self.uci_banner()),
            "isready" => Ok(vec!["readyok".to_owned()]),
            "ucinewgame" => {
                self.game_state = GameState::new_game();
                self.engine.new_game();
                Ok(Vec::new())
            }
            "setoption" => self.handle_setoption(&args).map(|()| Vec::new()),
            "position" => self.handle_position(&args).map(|()| Vec::new()),
            "go" => match self.handle_go(&args) {
                Ok(lines) => Ok(lines),
                Err(err) => {
                    writeln!(out, "info string go error: {err}")?;
                    writeln!(out, "bestmove 0000")?;
                    return Ok(false);
                }
            },
            "perft" => self.handle_perft(&args),
            "divide" => self.handle_divide(&args),
            "move" => self.handle_move(&args),
            "moves" => self.handle_moves(&args),
            "undo" => self.handle_undo(),
            "getmoves" => Ok(self.legal_move_listing()),
            "get" if args.first() == Some(&"moves") => Ok(self.legal_move_listing()),
            "iswhite" => Ok(vec![format!(
                "Is white: {}",
                self.game_state.side_to_move == Color::White
            )]),
            "print" | "d" => Ok(self.board_listing()),
            "bitboards" => Ok(self.bitboard_listing()),
            "debug" => {
                self.debug_mode = args
                    .first()
                    .is_some_and(|mode| mode.eq_ignore_ascii_case("on"));
                Ok(Vec::new())
            }
            "stop" | "ponderhit" | "register" => {
                // Search is synchronous; nothing to interrupt.
                Ok(Vec::new())
            }
            "quit" => return Ok(true),
            _ => Ok(vec![format!("info string unknown command: {cmd}")]),
        };

        match reply {
            Ok(lines) => {
                for line in lines {
                    writeln!(out, "{line}")?;
                }
            }
            Err(err) => writeln!(out, "info string {cmd} error: {err}")?,
        }

        Ok(false)
    }

    fn uci_banner(&self) -> Vec<String> {
        let defaults = SearchConfig::default();
        vec![
            format!("id name {UCI_ENGINE_NAME}"),
            format!("id author {UCI_ENGINE_AUTHOR}"),
            format!(
                "option name Depth type spin default {} min 1 max {MAX_SEARCH_DEPTH}",
                defaults.max_depth
            ),
            format!(
                "option name Quiescence type check default {}",
                defaults.quiescence
            ),
            format!(
                "option name MoveOrdering type check default {}",
                defaults.move_ordering
            ),
            "option name Engine type combo default alphabeta var alphabeta var random".to_owned(),
            "uciok".to_owned(),
        ]
    }

    fn handle_setoption(&mut self, args: &[&str]) -> EngineResult<()> {
        let mut name_tokens = Vec::new();
        let mut value_tokens = Vec::new();
        let mut mode = "";

        for tok in args {
            match *tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(*tok),
                _ if mode == "value" => value_tokens.push(*tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");
        if name.is_empty() {
            return Err(EngineError::InvalidCommand(
                "expected setoption name <name> value <value>".to_owned(),
            ));
        }

        if name.eq_ignore_ascii_case("Engine") {
            self.engine_kind = EngineKind::parse(&value)?;
        } else {
            // Search options are parsed by the alpha-beta engine and kept
            // here so they survive switching engines.
            let mut scratch = AlphaBetaEngine::new(self.search_config);
            scratch.set_option(&name, &value)?;
            self.search_config = *scratch.config();
        }

        self.engine = build_engine(self.engine_kind, self.search_config);
        Ok(())
    }

    fn handle_position(&mut self, args: &[&str]) -> EngineResult<()> {
        let moves_at = args.iter().position(|tok| *tok == "moves");
        let (setup, moves) = match moves_at {
            Some(index) => (&args[..index], &args[index + 1..]),
            None => (args, &args[args.len()..]),
        };

        let mut next_state = match setup.split_first() {
            Some((&"startpos", [])) => GameState::new_game(),
            Some((&"fen", fields)) => GameState::load_position(fields)?,
            Some((other, _)) => {
                return Err(EngineError::InvalidCommand(format!(
                    "unsupported position token '{other}'"
                )))
            }
            None => {
                return Err(EngineError::InvalidCommand(
                    "incomplete position command".to_owned(),
                ))
            }
        };

        for lan in moves {
            let mv = resolve_long_algebraic(&mut next_state, lan)?;
            make_move(&mut next_state, mv);
        }

        self.game_state = next_state;
        Ok(())
    }

    fn handle_go(&mut self, args: &[&str]) -> EngineResult<Vec<String>> {
        let params = parse_go_params(args)?;

        let started = Utc::now();
        let result = self.engine.choose_move(&mut self.game_state, &params)?;
        let elapsed_ms = (Utc::now() - started).num_milliseconds();

        let mut lines = result.info_lines;
        if self.debug_mode {
            lines.push(format!(
                "info string {} engine took {elapsed_ms} ms",
                self.engine.name()
            ));
        }
        lines.push(match result.best_move {
            Some(mv) => format!("bestmove {mv}"),
            None => "bestmove 0000".to_owned(),
        });
        Ok(lines)
    }

    fn handle_perft(&mut self, args: &[&str]) -> EngineResult<Vec<String>> {
        let depth = parse_depth_arg("perft", args)?;

        let started = Utc::now();
        let nodes = perft(&mut self.game_state, depth);
        let elapsed_ms = (Utc::now() - started).num_milliseconds();

        let mut lines = vec![nodes.to_string()];
        if self.debug_mode {
            lines.push(timing_line(nodes, elapsed_ms));
        }
        Ok(lines)
    }

    fn handle_divide(&mut self, args: &[&str]) -> EngineResult<Vec<String>> {
        let depth = parse_depth_arg("divide", args)?;

        let started = Utc::now();
        let report = divide(&mut self.game_state, depth);
        let elapsed_ms = (Utc::now() - started).num_milliseconds();

        let mut lines: Vec<String> = report.to_string().lines().map(str::to_owned).collect();
        if self.debug_mode {
            lines.push(timing_line(report.total, elapsed_ms));
        }
        Ok(lines)
    }

    fn handle_move(&mut self, args: &[&str]) -> EngineResult<Vec<String>> {
        let [lan] = args else {
            return Err(EngineError::InvalidCommand("expected move <from><to>[promotion]".to_owned()));
        };
        let mv = resolve_long_algebraic(&mut self.game_state, lan)?;
        make_move(&mut self.game_state, mv);
        Ok(self.board_listing())
    }

    /// Apply several moves, all or nothing.
    fn handle_moves(&mut self, args: &[&str]) -> EngineResult<Vec<String>> {
        if args.is_empty() {
            return Err(EngineError::InvalidCommand("expected moves <move>...".to_owned()));
        }

        let mut next_state = self.game_state.clone();
        for lan in args {
            let mv = resolve_long_algebraic(&mut next_state, lan)?;
            make_move(&mut next_state, mv);
        }

        self.game_state = next_state;
        Ok(self.board_listing())
    }

    fn handle_undo(&mut self) -> EngineResult<Vec<String>> {
        self.game_state.ensure_can_undo()?;
        undo_move(&mut self.game_state);
        Ok(self.board_listing())
    }

    fn legal_move_listing(&mut self) -> Vec<String> {
        let legal = generate_legal_moves(&mut self.game_state);
        let mut lines: Vec<String> = legal.iter().map(Move::to_string).collect();
        lines.push(format!("Total move count: {}", legal.len()));
        lines
    }

    fn board_listing(&self) -> Vec<String> {
        let mut lines: Vec<String> = render_game_state(&self.game_state)
            .lines()
            .map(str::to_owned)
            .collect();
        lines.push(format!("Fen: {}", self.game_state.get_fen()));
        if let Some(mv) = self.game_state.last_move() {
            lines.push(format!("Last move: {mv}"));
        }
        lines
    }

    fn bitboard_listing(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for piece in Piece::all() {
            let bitboard = self.game_state.bitboards[piece.index()];
            lines.push(format!(
                "{} ({:?} {:?}): {}",
                piece.to_fen_char(),
                piece.color(),
                piece.kind(),
                bitboard_to_squares(bitboard).join(" ")
            ));
            lines.extend(render_bitboard(bitboard).lines().map(str::to_owned));
        }
        lines
    }
}

fn parse_depth_arg(cmd: &str, args: &[&str]) -> EngineResult<u8> {
    let [depth] = args else {
        return Err(EngineError::InvalidCommand(format!("expected {cmd} <depth>")));
    };
    depth
        .parse::<u8>()
        .map_err(|_| EngineError::InvalidCommand(format!("invalid depth '{depth}'")))
}

fn timing_line(nodes: u64, elapsed_ms: i64) -> String {
    let nps = if elapsed_ms > 0 {
        nodes.saturating_mul(1000) / elapsed_ms as u64
    } else {
        0
    };
    format!("info string nodes {nodes} time {elapsed_ms} ms nps {nps}")
}

/// Only `depth` is honoured; clock and mode tokens are accepted and ignored.
fn parse_go_params(args: &[&str]) -> EngineResult<GoParams> {
    let mut params = GoParams::default();
    let mut tokens = args.iter();
    while let Some(tok) = tokens.next() {
        if *tok == "depth" {
            let value = tokens
                .next()
                .ok_or_else(|| EngineError::InvalidCommand("go depth needs a value".to_owned()))?;
            let depth = value
                .parse::<u8>()
                .map_err(|_| EngineError::InvalidCommand(format!("invalid depth '{value}'")))?;
            params.depth = Some(depth);
        }
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: &mut UciState, line: &str) -> String {
        let mut out = Vec::new();
        state
            .handle_command(line, &mut out)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("output is UTF-8")
    }

    #[test]
    fn uci_handshake() {
        let mut state = UciState::new();
        let reply = run(&mut state, "uci");
        assert!(reply.starts_with("id name Dualboard\n"));
        assert!(reply.contains("option name Depth type spin default 4 min 1 max 32"));
        assert!(reply.ends_with("uciok\n"));
        assert_eq!(run(&mut state, "isready"), "readyok\n");
    }

    #[test]
    fn position_startpos_with_moves_updates_state() {
        let mut state = UciState::new();
        assert_eq!(run(&mut state, "position startpos moves e2e4 e7e5 g1f3"), "");

        assert_eq!(state.game_state.side_to_move, Color::Black);
        assert_eq!(state.game_state.history_len(), 3);
        assert_eq!(
            state.game_state.get_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }

    #[test]
    fn position_fen_accepts_four_fields() {
        let mut state = UciState::new();
        run(&mut state, "position fen 4k3/8/8/8/8/8/4P3/4K3 w - -");
        assert_eq!(state.game_state.get_fen(), "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    }

    #[test]
    fn malformed_commands_leave_state_unchanged() {
        let mut state = UciState::new();
        run(&mut state, "position startpos moves e2e4");
        let before = state.game_state.clone();

        for (line, expected) in [
            ("position fen 8/8/8 w - - 0 1", "info string position error: invalid FEN"),
            ("position fen 4k3/4Q3/8/8/8/8/8/4K3 w - - 0 1", "info string position error: invalid FEN"),
            ("position startpos moves e2e4 e2e4", "info string position error: illegal move: e2e4"),
            ("position sideways", "info string position error: invalid command"),
            ("move e7e9", "info string move error: invalid move text: e7e9"),
            ("move e2e4", "info string move error: illegal move: e2e4"),
            ("moves e7e5 g1f3 a1a8", "info string moves error: illegal move: a1a8"),
            ("perft many", "info string perft error: invalid command"),
            ("setoption name Depth value lots", "info string setoption error: invalid option"),
            ("frobnicate", "info string unknown command: frobnicate"),
        ] {
            let reply = run(&mut state, line);
            assert!(reply.starts_with(expected), "{line}: {reply}");
            assert_eq!(state.game_state, before, "{line} changed the position");
        }
    }

    #[test]
    fn undo_with_empty_history_reports_error() {
        let mut state = UciState::new();
        assert_eq!(
            run(&mut state, "undo"),
            "info string undo error: no moves to undo\n"
        );

        run(&mut state, "move e2e4");
        run(&mut state, "undo");
        assert_eq!(state.game_state, GameState::new_game());
    }

    #[test]
    fn go_reports_a_legal_best_move_without_moving() {
        let mut state = UciState::new();
        run(&mut state, "position fen 6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
        let before = state.game_state.clone();

        let reply = run(&mut state, "go depth 2");
        assert!(reply.ends_with("bestmove a1a8\n"), "{reply}");
        assert_eq!(state.game_state, before);

        let reply = run(&mut state, "go depth x");
        assert!(reply.starts_with("info string go error:"));
        assert!(reply.ends_with("bestmove 0000\n"));
    }

    #[test]
    fn go_without_legal_moves_answers_null_move() {
        let mut state = UciState::new();
        run(&mut state, "position fen 7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(run(&mut state, "go").ends_with("bestmove 0000\n"));
    }

    #[test]
    fn perft_and_divide_commands() {
        let mut state = UciState::new();
        assert_eq!(run(&mut state, "perft 3"), "8902\n");

        let reply = run(&mut state, "divide 2");
        assert!(reply.contains("e2e4: 20\n"));
        assert!(reply.ends_with("Total nodes: 400\n"));

        run(&mut state, "debug on");
        let reply = run(&mut state, "perft 1");
        assert!(reply.starts_with("20\ninfo string nodes 20 time "));
    }

    #[test]
    fn listing_commands() {
        let mut state = UciState::new();
        assert!(run(&mut state, "getmoves").ends_with("Total move count: 20\n"));
        assert!(run(&mut state, "get moves").ends_with("Total move count: 20\n"));
        assert_eq!(run(&mut state, "iswhite"), "Is white: true\n");
        assert!(run(&mut state, "d").contains("Fen: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));

        assert!(!run(&mut state, "print").contains("Last move"));

        let dump = run(&mut state, "bitboards");
        assert_eq!(dump.lines().count(), 12 * 11);
        assert!(dump.starts_with("P (White Pawn): a2 b2 c2 d2 e2 f2 g2 h2\n"));

        run(&mut state, "move e2e4");
        assert!(run(&mut state, "print").contains("Last move: e2e4\n"));
    }

    #[test]
    fn setoption_updates_search_config_across_engine_switches() {
        let mut state = UciState::new();
        run(&mut state, "setoption name Depth value 2");
        run(&mut state, "setoption name Quiescence value true");
        run(&mut state, "setoption name Engine value random");
        assert_eq!(state.engine_kind, EngineKind::Random);
        assert_eq!(state.engine.name(), "random");

        run(&mut state, "setoption name Engine value alphabeta");
        assert_eq!(state.engine.name(), "alphabeta");
        assert_eq!(state.search_config.max_depth, 2);
        assert!(state.search_config.quiescence);

        let reply = run(&mut state, "setoption name Engine value stockfish");
        assert!(reply.starts_with("info string setoption error: invalid option"));
        assert_eq!(state.engine_kind, EngineKind::AlphaBeta);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut state = UciState::new();
        let mut out = Vec::new();
        assert!(state.handle_command("quit", &mut out).expect("no io error"));
        assert!(!state.handle_command("isready", &mut out).expect("no io error"));
    }
}

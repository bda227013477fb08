//! FEN-to-GameState parser.
//!
//! Builds a fully-populated position (bitboards, mailbox, occupancy, rights,
//! clocks) from Forsyth-Edwards Notation and rejects positions that would
//! break the board invariants.

use crate::chess_errors::{EngineError, EngineResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::board_masks::{RANK_1, RANK_8};
use crate::utils::algebraic::algebraic_to_square;

fn invalid(msg: impl Into<String>) -> EngineError {
    EngineError::InvalidFen(msg.into())
}

pub fn parse_fen(fen: &str) -> EngineResult<GameState> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    parse_fen_fields(&fields)
}

/// Parse already-split FEN fields. The two clock fields are optional and
/// default to `0 1`.
pub fn parse_fen_fields(fields: &[&str]) -> EngineResult<GameState> {
    if !(4..=6).contains(&fields.len()) {
        return Err(invalid(format!(
            "expected 4 to 6 fields, got {}",
            fields.len()
        )));
    }

    let mut game_state = GameState::new_empty();

    parse_board(fields[0], &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(fields[1])?;
    game_state.castling_rights = parse_castling_rights(fields[2])?;
    game_state.en_passant_square = parse_en_passant_square(fields[3])?;
    if let Some(halfmove) = fields.get(4) {
        game_state.halfmove_clock = halfmove
            .parse::<u16>()
            .map_err(|_| invalid(format!("halfmove clock {halfmove}")))?;
    }
    if let Some(fullmove) = fields.get(5) {
        game_state.fullmove_number = fullmove
            .parse::<u16>()
            .map_err(|_| invalid(format!("fullmove number {fullmove}")))?;
    }

    game_state.refresh_occupancy();
    validate_pawn_ranks(&game_state)?;
    game_state.validate().map_err(invalid)?;

    let waiting = game_state.side_to_move.opposite();
    if is_king_in_check(&game_state, waiting) {
        return Err(invalid(format!("{waiting:?} king is in check off move")));
    }

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> EngineResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid(format!("rank '{rank_str}' has more than 8 files")));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(format!("piece character '{ch}'")))?;
            if file >= 8 {
                return Err(invalid(format!("rank '{rank_str}' has more than 8 files")));
            }

            game_state.place(piece, board_rank * 8 + file);
            file += 1;
        }

        if file != 8 {
            return Err(invalid(format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> EngineResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("side-to-move field {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> EngineResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        let right = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid(format!("castling rights character {ch}"))),
        };
        if rights & right != 0 {
            return Err(invalid(format!("repeated castling right {ch}")));
        }
        rights |= right;
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> EngineResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(format!("en-passant square {en_passant_part}")))
}

fn validate_pawn_ranks(game_state: &GameState) -> EngineResult<()> {
    let pawns = game_state.pieces(Color::White, PieceKind::Pawn)
        | game_state.pieces(Color::Black, PieceKind::Pawn);
    if pawns & (RANK_1 | RANK_8) != 0 {
        return Err(invalid("pawn on the first or last rank"));
    }
    Ok(())
}

//! In-place move application and reversal.
//!
//! `make_move` mutates the position and pushes a full snapshot on
//! `GameState::history`; `undo_move` pops it and restores every field
//! verbatim. Castling and en passant are recognised from the board geometry,
//! not from move flags.

use crate::game_state::chess_rules::{both_rights, castling_lane_for, corner_right};
use crate::game_state::{chess_types::*, game_state::GameState};

/// Board-derived facts about a move, computed before it is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveClass {
    /// Kind of the piece removed by the move, if any (a pawn for en passant).
    pub captured: Option<PieceKind>,
    pub en_passant: bool,
    pub castle: bool,
    pub promotion: bool,
}

impl MoveClass {
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }
}

/// Inspect `mv` against the current placement without changing it.
pub fn classify_move(game_state: &GameState, mv: Move) -> MoveClass {
    let Some(piece) = game_state.piece_at(mv.from) else {
        return MoveClass::default();
    };

    let mut class = MoveClass {
        captured: game_state.piece_at(mv.to).map(Piece::kind),
        promotion: mv.promotion.is_some(),
        ..MoveClass::default()
    };

    match piece.kind() {
        PieceKind::Pawn => {
            if class.captured.is_none() && game_state.en_passant_square == Some(mv.to) {
                class.captured = Some(PieceKind::Pawn);
                class.en_passant = true;
            }
        }
        PieceKind::King => {
            class.castle = castling_lane_for(piece.color(), mv.from, mv.to).is_some();
        }
        _ => {}
    }

    class
}

/// Apply a pseudo-legal `mv` for the side to move.
///
/// Panics if `mv.from` is empty. Does not check that the move is legal.
pub fn make_move(game_state: &mut GameState, mv: Move) {
    game_state.history.push(UndoState::capture(game_state, mv));

    let Some(piece) = game_state.piece_at(mv.from) else {
        panic!("make_move {mv}: no piece on origin square");
    };
    let color = piece.color();
    let kind = piece.kind();

    // Castling rights: any king move drops both, any touch of a rook corner drops that corner.
    if kind == PieceKind::King {
        game_state.castling_rights &= !both_rights(color);
    }
    game_state.castling_rights &= !(corner_right(mv.from) | corner_right(mv.to));

    // Castling rook relocation.
    if kind == PieceKind::King {
        if let Some(lane) = castling_lane_for(color, mv.from, mv.to) {
            if let Some(rook) = game_state.clear(lane.rook_from) {
                game_state.place(rook, lane.rook_to);
            }
        }
    }

    // Handle captures.
    let mut captured = game_state.clear(mv.to).is_some();
    if !captured && kind == PieceKind::Pawn && game_state.en_passant_square == Some(mv.to) {
        let victim = match color {
            Color::White => mv.to - 8,
            Color::Black => mv.to + 8,
        };
        captured = game_state.clear(victim).is_some();
    }

    // Move (or promote) the piece.
    game_state.clear(mv.from);
    let arriving = mv
        .promotion
        .map_or(piece, |promoted| Piece::new(color, promoted));
    game_state.place(arriving, mv.to);

    game_state.refresh_occupancy();

    // Update clocks.
    game_state.side_to_move = color.opposite();
    game_state.ply = game_state.ply.saturating_add(1);
    if kind == PieceKind::Pawn || captured {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if color == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    // Update en-passant square.
    game_state.en_passant_square = if kind == PieceKind::Pawn && mv.from.abs_diff(mv.to) == 16 {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };

    debug_assert_eq!(game_state.validate(), Ok(()), "after make_move {mv}");
}

/// Revert the most recent `make_move`.
///
/// Panics when there is nothing to undo; front-ends check
/// `GameState::ensure_can_undo` first.
pub fn undo_move(game_state: &mut GameState) {
    let undo = game_state
        .history
        .pop()
        .expect("undo_move called with empty history");
    undo.restore(game_state);

    debug_assert_eq!(game_state.validate(), Ok(()), "after undo_move");
}

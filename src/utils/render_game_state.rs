//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for the `print` and `bitboards`
//! debug commands and for test diagnostics.

use crate::game_state::{chess_types::*, game_state::GameState};

const FILE_LABELS: &str = "  a b c d e f g h";

/// Render the board to a Unicode string for terminal output.
///
/// Assumes square indexing where `0 == a1`, `7 == h1`, and `63 == h8`.
pub fn render_game_state(game_state: &GameState) -> String {
    render_grid(|square| {
        game_state
            .piece_at(square)
            .map_or('·', piece_to_unicode)
    })
}

/// Render a single mask, `1` for set squares and `·` for clear ones.
pub fn render_bitboard(bitboard: Bitboard) -> String {
    render_grid(|square| {
        if bitboard & (1u64 << square) != 0 {
            '1'
        } else {
            '·'
        }
    })
}

fn render_grid(cell: impl Fn(Square) -> char) -> String {
    let mut out = String::new();
    out.push_str(FILE_LABELS);
    out.push('\n');

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            out.push(cell(rank * 8 + file));
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str(FILE_LABELS);
    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color(), piece.kind()) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

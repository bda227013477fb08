use crate::game_state::chess_types::*;

/// Full pre-move snapshot pushed by `make_move` and restored by `undo_move`.
///
/// Every mutable field of `GameState` except the history itself is copied,
/// so restoring is a verbatim overwrite rather than an inverse computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub bitboards: [Bitboard; Piece::COUNT],
    pub mailbox: [Option<Piece>; 64],
    pub occupancy: [Bitboard; 2],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub ply: u16,
}

impl UndoState {
    pub fn capture(game_state: &GameState, mv: Move) -> Self {
        Self {
            mv,
            bitboards: game_state.bitboards,
            mailbox: game_state.mailbox,
            occupancy: game_state.occupancy,
            side_to_move: game_state.side_to_move,
            castling_rights: game_state.castling_rights,
            en_passant_square: game_state.en_passant_square,
            halfmove_clock: game_state.halfmove_clock,
            fullmove_number: game_state.fullmove_number,
            ply: game_state.ply,
        }
    }

    pub fn restore(self, game_state: &mut GameState) {
        game_state.bitboards = self.bitboards;
        game_state.mailbox = self.mailbox;
        game_state.occupancy = self.occupancy;
        game_state.side_to_move = self.side_to_move;
        game_state.castling_rights = self.castling_rights;
        game_state.en_passant_square = self.en_passant_square;
        game_state.halfmove_clock = self.halfmove_clock;
        game_state.fullmove_number = self.fullmove_number;
        game_state.ply = self.ply;
    }
}

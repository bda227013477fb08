//! Core incremental board state representation.
//!
//! `GameState` is the central model for the engine. It keeps two views of the
//! same placement: one bitboard per colored piece and a 64-entry mailbox. The
//! per-color occupancy masks are caches derived from the bitboards. Make/undo
//! push and pop full snapshots on `history`.

use crate::chess_errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::{CASTLING_LANES, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::{parse_fen, parse_fen_fields};

/// Mutable position optimized for in-place make/undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Dual placement ---
    // Indexed by `Piece::index()`.
    pub bitboards: [Bitboard; Piece::COUNT],
    pub mailbox: [Option<Piece>; 64],

    // Occupancy caches, indexed by `Color::index()`.
    pub occupancy: [Bitboard; 2],

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub ply: u16,

    // --- Make/undo stack ---
    pub history: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            bitboards: [0; Piece::COUNT],
            mailbox: [None; 64],
            occupancy: [0; 2],

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
            ply: 0,

            history: Vec::with_capacity(64),
        }
    }
}

impl GameState {
    /// Empty board, white to move. Not a valid position until pieces are placed.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        parse_fen(fen)
    }

    /// Load a position from 4 to 6 already-split FEN fields
    /// (placement, side, castling, en passant, [halfmove, fullmove]).
    #[inline]
    pub fn load_position(fields: &[&str]) -> EngineResult<Self> {
        parse_fen_fields(fields)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square as usize]
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.bitboards[Piece::new(color, kind).index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> Bitboard {
        self.occupancy[0] | self.occupancy[1]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// Number of applied, not-yet-undone moves.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|undo| undo.mv)
    }

    /// Set `square` to `piece` in bitboard and mailbox. Occupancy is not touched.
    #[inline]
    pub(crate) fn place(&mut self, piece: Piece, square: Square) {
        self.bitboards[piece.index()] |= 1u64 << square;
        self.mailbox[square as usize] = Some(piece);
    }

    /// Empty `square` in bitboard and mailbox, returning what stood there.
    #[inline]
    pub(crate) fn clear(&mut self, square: Square) -> Option<Piece> {
        let piece = self.mailbox[square as usize].take()?;
        self.bitboards[piece.index()] &= !(1u64 << square);
        Some(piece)
    }

    /// Rebuild both occupancy caches from the piece bitboards.
    #[inline]
    pub(crate) fn refresh_occupancy(&mut self) {
        let mut occupancy = [0u64; 2];
        for (index, bb) in self.bitboards.iter().enumerate() {
            occupancy[index & 1] |= bb;
        }
        self.occupancy = occupancy;
    }

    /// Check the structural invariants of the position.
    ///
    /// Covers mailbox/bitboard agreement, occupancy caches, one king per side,
    /// en-passant consistency, and castling rights backed by king and rook on
    /// their home squares.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = 0u64;
        for piece in Piece::all() {
            let bb = self.bitboards[piece.index()];
            if bb & seen != 0 {
                return Err(format!("square shared by two pieces ({piece:?})"));
            }
            seen |= bb;
        }

        for square in 0..64u8 {
            let mask = 1u64 << square;
            match self.mailbox[square as usize] {
                Some(piece) if self.bitboards[piece.index()] & mask == 0 => {
                    return Err(format!("mailbox has {piece:?} on {square} but bitboard does not"));
                }
                None if seen & mask != 0 => {
                    return Err(format!("bitboard occupies {square} but mailbox is empty"));
                }
                _ => {}
            }
        }

        for color in Color::BOTH {
            let union = PieceKind::ALL
                .iter()
                .fold(0u64, |acc, kind| acc | self.pieces(color, *kind));
            if union != self.occupancy[color.index()] {
                return Err(format!("{color:?} occupancy cache is stale"));
            }
            let kings = self.pieces(color, PieceKind::King).count_ones();
            if kings != 1 {
                return Err(format!("{color:?} has {kings} kings"));
            }
        }

        if let Some(ep) = self.en_passant_square {
            self.validate_en_passant(ep)?;
        }

        for lane in CASTLING_LANES {
            if self.castling_rights & lane.right == 0 {
                continue;
            }
            let king = Piece::new(lane.color, PieceKind::King);
            let rook = Piece::new(lane.color, PieceKind::Rook);
            if self.piece_at(lane.king_from) != Some(king)
                || self.piece_at(lane.rook_from) != Some(rook)
            {
                return Err(format!(
                    "castling right {:#06b} without king and rook on home squares",
                    lane.right
                ));
            }
        }

        Ok(())
    }

    fn validate_en_passant(&self, ep: Square) -> Result<(), String> {
        if ep > 63 {
            return Err(format!("en-passant square {ep} is off the board"));
        }
        // The pawn that just advanced belongs to the side that is not to move.
        let (expected_rank, pawn_square, origin_square) = match self.side_to_move {
            Color::White => (5, ep.wrapping_sub(8), ep.wrapping_add(8)),
            Color::Black => (2, ep.wrapping_add(8), ep.wrapping_sub(8)),
        };
        if ep / 8 != expected_rank {
            return Err(format!("en-passant square {ep} is on the wrong rank"));
        }
        if self.piece_at(ep).is_some() || self.piece_at(origin_square).is_some() {
            return Err(format!("en-passant square {ep} or the pawn origin is occupied"));
        }
        let pawn = Piece::new(self.side_to_move.opposite(), PieceKind::Pawn);
        if self.piece_at(pawn_square) != Some(pawn) {
            return Err(format!("no double-advanced pawn behind en-passant square {ep}"));
        }
        Ok(())
    }

    /// Fails with `NothingToUndo` instead of panicking; used by front-ends.
    pub fn ensure_can_undo(&self) -> EngineResult<()> {
        if self.history.is_empty() {
            Err(EngineError::NothingToUndo)
        } else {
            Ok(())
        }
    }
}

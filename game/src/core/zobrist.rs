//! Provides position hashing compatible with the Polyglot opening book format.
//!
//! The keys are the fixed Polyglot random numbers, so a board hash can be used
//! directly to probe `.bin` opening books.
//!
//! See [Zobrist Hashing](https://www.chessprogramming.org/Zobrist_Hashing)
//! for more information.
use super::{Castling, Color, Piece, Square};
use crate::board::Board;

include!(concat!(env!("OUT_DIR"), "/zobrist.rs"));

/// Represents an *almost* unique hash key encoded as a 64-bit unsigned integer.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq)]
#[repr(transparent)]
pub struct Zobrist(pub u64);

impl Zobrist {
    /// Generates a new `Zobrist` hash key from scratch for the `Board`.
    ///
    /// The en passant file is hashed only when a pawn of the side to move can
    /// actually capture en passant, per the Polyglot definition.
    pub(crate) fn new(board: &Board) -> Self {
        let mut hash = Zobrist::default();

        for piece in 0..Piece::NUM {
            let piece = Piece::from(piece as u8);

            for square in board.of(piece, Color::White) {
                hash.update_piece(piece, Color::White, square);
            }

            for square in board.of(piece, Color::Black) {
                hash.update_piece(piece, Color::Black, square);
            }
        }

        hash.update_castling(board.state().castling);

        if let Some(file) = board.en_passant_hash_file() {
            hash.update_en_passant_file(file);
        }

        if board.turn == Color::White {
            hash.update_side();
        }

        hash
    }

    #[inline(always)]
    pub(crate) fn update_piece(&mut self, piece: Piece, color: Color, square: Square) {
        self.0 ^= PIECE_KEYS[color][piece][square.0 as usize];
    }

    #[inline(always)]
    pub(crate) fn update_side(&mut self) {
        self.0 ^= SIDE_KEY;
    }

    /// Toggles the key of every right set in the mask.
    ///
    /// Calling this with the old and the new rights in turn applies the difference.
    #[inline(always)]
    pub(crate) fn update_castling(&mut self, castling: Castling) {
        let mut bits = castling.bits();
        while bits != 0 {
            self.0 ^= CASTLING_KEYS[bits.trailing_zeros() as usize];
            bits &= bits - 1;
        }
    }

    #[inline(always)]
    pub(crate) fn update_en_passant_file(&mut self, file: u8) {
        self.0 ^= EN_PASSANT_KEYS[file as usize];
    }
}

impl std::fmt::Display for Zobrist {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

//! Accessors over the attack and mask tables generated by the build script.

use crate::core::{Bitboard, Color, Square};

include!(concat!(env!("OUT_DIR"), "/lookup.rs"));

#[inline(always)]
pub fn king_attacks(square: Square) -> Bitboard {
    Bitboard(KING_MAP[square.0 as usize])
}

#[inline(always)]
pub fn knight_attacks(square: Square) -> Bitboard {
    Bitboard(KNIGHT_MAP[square.0 as usize])
}

#[inline(always)]
pub fn pawn_attacks(square: Square, color: Color) -> Bitboard {
    Bitboard(PAWN_MAP[color as usize * 64 + square.0 as usize])
}

#[inline(always)]
pub fn rook_attacks(square: Square, occupancies: Bitboard) -> Bitboard {
    let entry = &ROOK_MAGICS[square.0 as usize];
    Bitboard(ROOK_MAP[magic_index(occupancies, entry) as usize])
}

#[inline(always)]
pub fn bishop_attacks(square: Square, occupancies: Bitboard) -> Bitboard {
    let entry = &BISHOP_MAGICS[square.0 as usize];
    Bitboard(BISHOP_MAP[magic_index(occupancies, entry) as usize])
}

#[inline(always)]
pub fn queen_attacks(square: Square, occupancies: Bitboard) -> Bitboard {
    rook_attacks(square, occupancies) | bishop_attacks(square, occupancies)
}

/// Returns the squares strictly between two aligned squares, empty when not aligned.
#[inline(always)]
pub fn between(a: Square, b: Square) -> Bitboard {
    Bitboard(BETWEEN[a.0 as usize * 64 + b.0 as usize])
}

/// Returns the squares between two aligned squares plus the target square itself.
#[inline(always)]
pub fn ray(a: Square, b: Square) -> Bitboard {
    Bitboard(RAYS[a.0 as usize * 64 + b.0 as usize])
}

#[inline(always)]
pub fn file_mask(file: u8) -> Bitboard {
    Bitboard(FILES[file as usize])
}

#[inline(always)]
pub fn adjacent_files(file: u8) -> Bitboard {
    Bitboard(ADJACENT_FILES[file as usize])
}

/// Returns the front span of the pawn over its own and adjacent files; a pawn with
/// no enemy pawn in this span is passed. The opposite color's mask doubles as the
/// rear span used by the backward pawn test.
#[inline(always)]
pub fn passed_pawn_mask(color: Color, square: Square) -> Bitboard {
    Bitboard(PASSED_PAWN_MASKS[color as usize * 64 + square.0 as usize])
}

#[inline(always)]
fn magic_index(occupancies: Bitboard, entry: &MagicEntry) -> u32 {
    let mut hash = occupancies.0 & entry.mask;
    hash = hash.wrapping_mul(entry.magic) >> entry.shift;
    hash as u32 + entry.offset
}

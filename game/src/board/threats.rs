use crate::core::{Bitboard, Piece};
use crate::lookup;

use super::Board;

/// The pin and check cache of the side to move, recomputed in one pass after
/// every make. `check_mask` holds the squares a non-king move can land on to
/// resolve a single check and is full when not in check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Threats {
    pub pinned: Bitboard,
    pub checkers: Bitboard,
    pub check_mask: Bitboard,
    pub double_check: bool,
}

impl Default for Threats {
    fn default() -> Self {
        Self {
            pinned: Bitboard::EMPTY,
            checkers: Bitboard::EMPTY,
            check_mask: Bitboard::FULL,
            double_check: false,
        }
    }
}

impl Board {
    /// Computes the pieces checking the king of the side to move, the own pieces
    /// absolutely pinned to it, and the mask of check-resolving squares.
    ///
    /// Each enemy slider that would attack the king on an empty board is walked:
    /// no blockers on the line makes it a checker, exactly one friendly blocker
    /// makes that blocker pinned. Knight and pawn checkers are added by lookup.
    pub(super) fn compute_threats(&self) -> Threats {
        let mut threats = Threats {
            check_mask: Bitboard::EMPTY,
            ..Threats::default()
        };

        let us = self.turn;
        let them = us.opposite();
        let king = self.king(us);
        let occupancies = self.occupancies();
        let friendly = self.us();

        let orthogonal = self.of(Piece::Rook, them) | self.of(Piece::Queen, them);
        let diagonal = self.of(Piece::Bishop, them) | self.of(Piece::Queen, them);

        let sliders = (lookup::rook_attacks(king, Bitboard::EMPTY) & orthogonal)
            | (lookup::bishop_attacks(king, Bitboard::EMPTY) & diagonal);

        for attacker in sliders {
            let blockers = lookup::between(king, attacker) & occupancies;

            match blockers.count() {
                0 => {
                    threats.checkers.set(attacker);
                    threats.check_mask |= lookup::ray(king, attacker);
                }
                1 if !(blockers & friendly).is_empty() => threats.pinned |= blockers,
                _ => (),
            }
        }

        threats.checkers |= lookup::knight_attacks(king) & self.of(Piece::Knight, them);
        threats.checkers |= lookup::pawn_attacks(king, us) & self.of(Piece::Pawn, them);

        threats.check_mask |= threats.checkers;
        if threats.checkers.is_empty() {
            threats.check_mask = Bitboard::FULL;
        }

        threats.double_check = threats.checkers.count() > 1;

        threats
    }
}

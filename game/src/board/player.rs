use crate::core::{Color, Move, MoveKind, Piece, Square};

use super::change::Change;
use super::Board;

#[derive(Debug, Clone, Copy)]
pub struct IllegalMoveError;

impl Board {
    /// Updates the board representation by making the specified `Move`, keeping
    /// the hash key in sync incrementally with every side effect.
    ///
    /// # Errors
    ///
    /// This function will return an error if the `Move` is not allowed by the
    /// rules of chess; the board is left untouched in that case.
    pub fn make_move(&mut self, mv: Move) -> Result<(), IllegalMoveError> {
        let mut change = Change {
            mv,
            state: self.state,
            capture: None,
            hash: self.hash,
            threats: self.threats,
        };

        // The en passant and castling contributions are removed up front and
        // re-added in their updated form below
        if let Some(file) = self.en_passant_hash_file() {
            self.hash.update_en_passant_file(file);
        }
        self.hash.update_castling(self.state.castling);

        let from = mv.from();
        let to = mv.to();
        let us = self.turn;
        let them = us.opposite();

        let piece = self.get_piece(from).unwrap();

        let capture = match mv.kind() {
            MoveKind::EnPassant => Some(Piece::Pawn),
            _ if mv.is_capture() => self.get_piece(to),
            _ => None,
        };
        change.capture = capture;

        self.state.halfmove_clock = match piece == Piece::Pawn || capture.is_some() {
            true => 0,
            false => self.state.halfmove_clock + 1,
        };

        match mv.kind() {
            MoveKind::Quiet | MoveKind::DoublePush => self.move_piece(piece, us, from, to),
            MoveKind::Capture => {
                self.remove_piece(capture.unwrap(), them, to);
                self.move_piece(piece, us, from, to);
            }
            MoveKind::EnPassant => {
                self.move_piece(piece, us, from, to);
                self.remove_piece(Piece::Pawn, them, to.shift(-us.offset()));
            }
            MoveKind::Castling => {
                self.move_piece(piece, us, from, to);

                let (rook_from, rook_to) = castling_rook_squares(to);
                self.move_piece(Piece::Rook, us, rook_from, rook_to);
            }
            // The remaining kinds are promotions
            _ => {
                self.remove_piece(Piece::Pawn, us, from);
                if let Some(captured) = capture {
                    self.remove_piece(captured, them, to);
                }
                self.add_piece(mv.promotion_piece().unwrap(), us, to);
            }
        }

        self.state.en_passant = match mv.kind() == MoveKind::DoublePush {
            true => Some(from.shift(us.offset())),
            false => None,
        };

        self.state.castling.update_for_square(from);
        self.state.castling.update_for_square(to);
        self.hash.update_castling(self.state.castling);

        self.turn.reverse();
        self.hash.update_side();
        if self.turn == Color::White {
            self.fullmove_number += 1;
        }

        // The new en passant contribution depends on the new side to move
        if let Some(file) = self.en_passant_hash_file() {
            self.hash.update_en_passant_file(file);
        }

        self.threats = self.compute_threats();
        self.history.push(change);

        // The move is illegal if it exposes the own king to an attack after it has been made
        if self.is_square_attacked(self.king(us), self.turn) {
            self.undo_move();
            return Err(IllegalMoveError);
        }

        #[cfg(debug_assertions)]
        self.assert_consistent();

        Ok(())
    }

    /// Restores the board to the previous state before the last move made.
    ///
    /// # Panics
    ///
    /// Panics if there is no previous `Move` for the current `Board`.
    pub fn undo_move(&mut self) {
        let change = self.history.pop().expect("no move to undo");
        let mv = change.mv;

        self.turn.reverse();
        if self.turn == Color::Black {
            self.fullmove_number -= 1;
        }

        let us = self.turn;
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();

        if mv.is_promotion() {
            self.remove_piece(mv.promotion_piece().unwrap(), us, to);
            self.add_piece(Piece::Pawn, us, from);

            if let Some(captured) = change.capture {
                self.add_piece(captured, them, to);
            }
        } else {
            let piece = self.get_piece(to).unwrap();
            self.move_piece(piece, us, to, from);

            match mv.kind() {
                MoveKind::Capture => self.add_piece(change.capture.unwrap(), them, to),
                MoveKind::EnPassant => self.add_piece(Piece::Pawn, them, to.shift(-us.offset())),
                MoveKind::Castling => {
                    let (rook_from, rook_to) = castling_rook_squares(to);
                    self.move_piece(Piece::Rook, us, rook_to, rook_from);
                }
                _ => (),
            }
        }

        self.state = change.state;
        self.threats = change.threats;
        self.hash = change.hash;
    }

    /// Passes the turn to the opponent without moving a piece, which only flips
    /// the side to move and clears the en passant square.
    pub fn make_null_move(&mut self) {
        self.history.push(Change {
            mv: Move::NULL,
            state: self.state,
            capture: None,
            hash: self.hash,
            threats: self.threats,
        });

        if let Some(file) = self.en_passant_hash_file() {
            self.hash.update_en_passant_file(file);
        }
        self.state.en_passant = None;

        self.turn.reverse();
        self.hash.update_side();

        self.threats = self.compute_threats();
    }

    /// Restores the board to the state before the last null move.
    ///
    /// # Panics
    ///
    /// Panics if there is no previous null `Move` for the current `Board`.
    pub fn undo_null_move(&mut self) {
        let change = self.history.pop().expect("no move to undo");

        self.turn.reverse();
        self.state = change.state;
        self.threats = change.threats;
        self.hash = change.hash;
    }
}

/// Maps the king's castling destination to the rook relocation of that castle.
fn castling_rook_squares(king_target: Square) -> (Square, Square) {
    match king_target {
        Square::G1 => (Square::H1, Square::F1),
        Square::C1 => (Square::A1, Square::D1),
        Square::G8 => (Square::H8, Square::F8),
        Square::C8 => (Square::A8, Square::D8),
        _ => unreachable!("invalid castling destination"),
    }
}

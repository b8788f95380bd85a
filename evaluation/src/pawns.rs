use game::{lookup, Bitboard, Board, Color, Piece, Square};

use crate::params::{TaperedScore, WEIGHTS};
use crate::{pst, relative_rank};

/// Evaluates material, placement and structure of the pawns of both sides.
pub(crate) fn evaluate(board: &Board) -> TaperedScore {
    evaluate_color(board, Color::White) - evaluate_color(board, Color::Black)
}

fn evaluate_color(board: &Board, color: Color) -> TaperedScore {
    let mut score = TaperedScore::default();

    let us = board.of(Piece::Pawn, color);
    let them = board.of(Piece::Pawn, color.opposite());

    for square in us {
        score += WEIGHTS.material[Piece::Pawn];
        score += pst(Piece::Pawn, color, square);

        // Passed pawns are rewarded by how far they have advanced
        if (lookup::passed_pawn_mask(color, square) & them).is_empty() {
            score += WEIGHTS.passed_pawn[relative_rank(color, square) as usize];
        }

        // Connected, supported by an own pawn from behind
        if !(lookup::pawn_attacks(square, color.opposite()) & us).is_empty() {
            score += WEIGHTS.connected_pawn;
        }

        if (lookup::adjacent_files(square.file()) & us).is_empty() {
            score += WEIGHTS.isolated_pawn;
        } else if is_backward(color, square, us, them) {
            score += WEIGHTS.backward_pawn;
        }
    }

    // Doubled pawns, penalized per extra pawn on a file
    for file in 0..8 {
        let pawns = (lookup::file_mask(file) & us).count() as i32;
        if pawns > 1 {
            score += WEIGHTS.doubled_pawn * (pawns - 1);
        }
    }

    score
}

/// A pawn is backward when no own pawn stands beside or behind it on the own or
/// adjacent files while its stop square is guarded by an enemy pawn.
fn is_backward(color: Color, square: Square, us: Bitboard, them: Bitboard) -> bool {
    let rear_span = lookup::passed_pawn_mask(color.opposite(), square);
    if !(rear_span & us).is_empty() {
        return false;
    }

    let stop = square.shift(color.offset());
    !(lookup::pawn_attacks(stop, color) & them).is_empty()
}

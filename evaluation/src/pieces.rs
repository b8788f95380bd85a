use game::{lookup, Board, Color, Piece};

use crate::params::{TaperedScore, WEIGHTS};
use crate::{pst, relative_rank};

/// Evaluates material and placement of the minor and major pieces, together with
/// their structural bonuses.
pub(crate) fn evaluate(board: &Board) -> TaperedScore {
    evaluate_color(board, Color::White) - evaluate_color(board, Color::Black)
}

fn evaluate_color(board: &Board, color: Color) -> TaperedScore {
    let mut score = TaperedScore::default();

    let own_pawns = board.of(Piece::Pawn, color);
    let enemy_pawns = board.of(Piece::Pawn, color.opposite());
    let occupancies = board.occupancies();

    for square in board.of(Piece::Knight, color) {
        score += WEIGHTS.material[Piece::Knight];
        score += pst(Piece::Knight, color, square);

        // An outpost knight is anchored by an own pawn behind it
        if !(lookup::pawn_attacks(square, color.opposite()) & own_pawns).is_empty() {
            score += WEIGHTS.knight_outpost;
        }
    }

    let bishops = board.of(Piece::Bishop, color);
    for square in bishops {
        score += WEIGHTS.material[Piece::Bishop];
        score += pst(Piece::Bishop, color, square);
    }
    if bishops.count() >= 2 {
        score += WEIGHTS.bishop_pair;
    }

    let rooks = board.of(Piece::Rook, color);
    for square in rooks {
        score += WEIGHTS.material[Piece::Rook];
        score += pst(Piece::Rook, color, square);

        if relative_rank(color, square) == 6 {
            score += WEIGHTS.rook_on_seventh;
        }

        let file = lookup::file_mask(square.file());
        if (file & own_pawns).is_empty() {
            match (file & enemy_pawns).is_empty() {
                true => score += WEIGHTS.rook_on_open_file,
                false => score += WEIGHTS.rook_on_semi_open_file,
            }
        }

        // Rooks defending each other along a rank or file
        if !(lookup::rook_attacks(square, occupancies) & rooks).is_empty() {
            score += WEIGHTS.rook_connected;
        }
    }

    for square in board.of(Piece::Queen, color) {
        score += WEIGHTS.material[Piece::Queen];
        score += pst(Piece::Queen, color, square);
    }

    score
}

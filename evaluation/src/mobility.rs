use game::{lookup, Bitboard, Board, Color, Piece, Square};

use crate::params::{TaperedScore, WEIGHTS};

/// Evaluates the mobility difference between the two players.
///
/// The player's mobility depends on the number of squares that their pieces can
/// move to. It can also be thought of as a square control.
pub(crate) fn evaluate(board: &Board) -> TaperedScore {
    evaluate_color(board, Color::White) - evaluate_color(board, Color::Black)
}

fn evaluate_color(board: &Board, color: Color) -> TaperedScore {
    let occupancies = board.occupancies();
    let mut score = TaperedScore::default();

    for (index, piece) in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
        .into_iter()
        .enumerate()
    {
        for square in board.of(piece, color) {
            let reachable = get_attacks(square, piece, occupancies).count() as i32;
            score += WEIGHTS.mobility[index] * reachable;
        }
    }

    score
}

fn get_attacks(square: Square, piece: Piece, occupancies: Bitboard) -> Bitboard {
    match piece {
        Piece::Knight => lookup::knight_attacks(square),
        Piece::Bishop => lookup::bishop_attacks(square, occupancies),
        Piece::Rook => lookup::rook_attacks(square, occupancies),
        Piece::Queen => lookup::queen_attacks(square, occupancies),
        _ => panic!("Invalid piece"),
    }
}

#[cfg(test)]
mod tests {
    use game::Board;

    use super::evaluate;

    #[test]
    fn open_lines_increase_mobility() {
        let cornered = Board::new("4k3/8/8/8/8/8/PP6/BK6 w - - 0 1").unwrap();
        let centered = Board::new("4k3/8/8/3B4/8/8/PP6/1K6 w - - 0 1").unwrap();

        assert!(evaluate(&centered).mg > evaluate(&cornered).mg);
    }
}

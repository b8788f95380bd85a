mod king;
mod mobility;
mod params;
mod pawns;
mod pieces;

use game::{Board, Color, Piece, Score, Square, TOTAL_PHASE};

pub use params::{TaperedScore, Weights, WEIGHTS};

/// Returns a statically evaluated `Score` relative to the white side,
/// regardless of the color of the player who is currently making a move.
///
/// Positive values indicate an advantage for white, negative values
/// indicate an advantage for black.
pub fn evaluate_absolute_score(board: &Board) -> Score {
    let mut total = TaperedScore::default();

    total += pawns::evaluate(board);
    total += pieces::evaluate(board);
    total += king::evaluate(board);
    total += mobility::evaluate(board);

    let phase = board.phase();
    Score((total.mg * phase + total.eg * (TOTAL_PHASE - phase)) / TOTAL_PHASE)
}

/// Returns a statically evaluated `Score` relative to the color
/// of the player who is currently making a move.
pub fn evaluate(board: &Board) -> Score {
    match board.turn {
        Color::White => evaluate_absolute_score(board),
        Color::Black => -evaluate_absolute_score(board),
    }
}

/// Reads the piece-square bonus; black looks up the vertically flipped square.
pub(crate) fn pst(piece: Piece, color: Color, square: Square) -> TaperedScore {
    let square = match color {
        Color::White => square,
        Color::Black => square.flip(),
    };

    WEIGHTS.psts[piece][square.0 as usize]
}

/// Returns the rank as seen from the moving side, `0` being its back rank.
pub(crate) fn relative_rank(color: Color, square: Square) -> u8 {
    match color {
        Color::White => square.rank(),
        Color::Black => 7 - square.rank(),
    }
}

#[cfg(test)]
mod tests {
    use game::Board;

    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        let board = Board::starting_position();
        assert_eq!(evaluate_absolute_score(&board), Score::new(0));
        assert_eq!(evaluate(&board), Score::new(0));
    }

    #[test]
    fn relative_sign_flips_with_the_turn() {
        // White is a queen up
        let board = Board::new("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let white_view = evaluate(&board);
        assert!(white_view > Score::new(0));

        let board = Board::new("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
        assert_eq!(evaluate(&board), -white_view);
    }

    #[test]
    fn material_advantage_dominates() {
        // White has an extra rook
        let board = Board::new("1nbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQk - 0 1").unwrap();
        assert!(evaluate_absolute_score(&board) > Score::new(300));
    }
}

use game::{lookup, Board, Color, Piece, Square};

use crate::params::{TaperedScore, WEIGHTS};
use crate::pst;

/// Evaluates king placement, the pawn shield and attacks on the king zone, plus
/// king activity terms that only matter in the endgame.
pub(crate) fn evaluate(board: &Board) -> TaperedScore {
    evaluate_color(board, Color::White) - evaluate_color(board, Color::Black)
}

fn evaluate_color(board: &Board, color: Color) -> TaperedScore {
    let king = board.king(color);

    let mut score = pst(Piece::King, color, king);
    score += shield(board, color, king);
    score += attack_zone(board, color, king);
    score += activity(board, color, king);

    score
}

/// Scores the three pawns in front of the king by how far each has strayed from
/// its home rank; a file with no own pawn at all is penalized separately.
fn shield(board: &Board, color: Color, king: Square) -> TaperedScore {
    let mut score = TaperedScore::default();
    let pawns = board.of(Piece::Pawn, color);
    let home_rank = match color {
        Color::White => 1,
        Color::Black => 6,
    };

    let king_file = king.file() as i32;
    for file in king_file - 1..=king_file + 1 {
        if !(0..8).contains(&file) {
            continue;
        }

        let on_file = lookup::file_mask(file as u8) & pawns;
        let shield_pawn = match color {
            Color::White => on_file.lsb(),
            Color::Black => on_file.msb(),
        };

        match shield_pawn {
            None => score += WEIGHTS.open_king_file,
            Some(pawn) => {
                let advancement = (pawn.rank() as i32 - home_rank).abs().min(2);
                score += WEIGHTS.pawn_shield[advancement as usize];
            }
        }
    }

    score
}

/// Sums per-piece attack weights over the squares around the king and maps the
/// total through the saturating safety table.
fn attack_zone(board: &Board, color: Color, king: Square) -> TaperedScore {
    let enemy = color.opposite();

    let mut attack_score = 0;
    for square in lookup::king_attacks(king) {
        for attacker in board.attackers_to(square, enemy) {
            let piece = board.get_piece(attacker).unwrap();
            attack_score += WEIGHTS.king_attack_weights[piece];
        }
    }

    let index = (attack_score as usize).min(WEIGHTS.king_safety.len() - 1);
    WEIGHTS.king_safety[index]
}

/// In the endgame a king is penalized for hiding in the corner, and the side
/// with the stronger material is rewarded for walking towards the enemy king.
fn activity(board: &Board, color: Color, king: Square) -> TaperedScore {
    let rank = king.rank() as i32;
    let file = king.file() as i32;

    let center_distance = (3 - rank).max(rank - 4) + (3 - file).max(file - 4);
    let mut score = WEIGHTS.king_centralisation * center_distance;

    if board.non_pawn_material(color) > board.non_pawn_material(color.opposite()) + 200 {
        let enemy_king = board.king(color.opposite());
        let between = (rank - enemy_king.rank() as i32).abs() + (file - enemy_king.file() as i32).abs();
        score += WEIGHTS.king_proximity * (14 - between);
    }

    score
}

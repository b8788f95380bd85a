//! Board mutation invariants: every make followed by an unmake restores the
//! exact previous state, occupancies and the mailbox always agree, and moves
//! leaving the own king attacked never survive `make_move`.

mod common;

use game::{Bitboard, Board, Color, Piece, Square};

const FIXTURES: [&str; 6] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "rnbqkbnr/ppp1pppp/8/8/3pP3/5N2/PPPP1PPP/RNBQKBNR b KQkq e3 0 3",
];

fn assert_consistent(board: &Board) {
    let mut union = Bitboard::EMPTY;
    for piece in 0..Piece::NUM {
        for color in [Color::White, Color::Black] {
            union |= board.of(Piece::from(piece as u8), color);
        }
    }
    assert_eq!(union, board.occupancies());

    for square in 0..Square::NUM as u8 {
        let square = Square(square);
        let piece = board.get_piece(square);
        assert_eq!(piece.is_some(), board.occupancies().contains(square));

        if let Some(piece) = piece {
            let color = match board.pieces_of(Color::White).contains(square) {
                true => Color::White,
                false => Color::Black,
            };
            assert!(board.of(piece, color).contains(square));
        }
    }
}

#[test]
fn make_and_unmake_restore_the_board_exactly() {
    for fen in FIXTURES {
        let original = Board::new(fen).unwrap();

        for mv in original.generate_moves() {
            let mut board = original.clone();
            if board.make_move(mv).is_err() {
                continue;
            }

            board.undo_move();
            assert!(board == original, "round trip of {} broke '{}'", mv, fen);
        }
    }
}

#[test]
fn occupancies_and_mailbox_agree_along_games() {
    for fen in FIXTURES {
        let mut board = Board::new(fen).unwrap();
        assert_consistent(&board);

        for mv in board.clone().generate_moves() {
            if board.make_move(mv).is_ok() {
                assert_consistent(&board);
                assert_eq!(board.hash, board.generate_hash_key(), "after {}", mv);
                board.undo_move();
            }
        }
    }
}

#[test]
fn surviving_moves_never_leave_the_king_attacked() {
    for fen in FIXTURES {
        let original = Board::new(fen).unwrap();
        let us = original.turn;

        for mv in original.generate_moves() {
            let mut board = original.clone();

            match board.make_move(mv) {
                Ok(()) => {
                    assert!(
                        !board.is_square_attacked(board.king(us), board.turn),
                        "{} left the king attacked in '{}'",
                        mv,
                        fen
                    );
                    board.undo_move();
                }
                // A rejected move must leave no trace
                Err(_) => assert!(board == original, "{} mutated the board in '{}'", mv, fen),
            }
        }
    }
}

#[test]
fn null_moves_only_flip_the_side() {
    let mut board = Board::new(FIXTURES[5]).unwrap();
    let original = board.clone();

    board.make_null_move();
    assert_eq!(board.turn, original.turn.opposite());
    assert_eq!(board.state().en_passant, None);
    assert_eq!(board.occupancies(), original.occupancies());
    assert_eq!(board.hash, board.generate_hash_key());

    board.undo_null_move();
    assert!(board == original);
}

#[test]
fn repetition_is_detected_within_the_clock_window() {
    let mut board = Board::starting_position();

    // Shuffle the knights back and forth twice to repeat the start position
    for uci_move in [
        "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
    ] {
        assert!(!board.is_repetition());
        common::make(&mut board, uci_move);
    }

    assert!(board.is_repetition());
}

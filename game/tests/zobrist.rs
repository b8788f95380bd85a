//! The board hash must match the Polyglot book hashing bit for bit, stay in
//! sync under incremental updates, and be independent of the move order that
//! reached a position.

mod common;

use common::make;
use game::Board;

/// The official Polyglot test vectors.
///
/// See [the book format specification](http://hgm.nubati.net/book_format.html).
const POLYGLOT_VECTORS: [(&str, u64); 9] = [
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        0x463b96181691fc9c,
    ),
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
        0x823c9b50fd114196,
    ),
    (
        "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
        0x0756b94461c50fb0,
    ),
    (
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2",
        0x662fafb965db29d4,
    ),
    (
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        0x22a48b5a8e47ff78,
    ),
    (
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPPKPPP/RNBQ1BNR b kq - 0 3",
        0x652a607ca3f242c1,
    ),
    (
        "rnbq1bnr/ppp1pkpp/8/3pPp2/8/8/PPPPKPPP/RNBQ1BNR w - - 0 4",
        0x00fdd303c946bdd9,
    ),
    (
        "rnbqkbnr/p1pppppp/8/8/PpP4P/8/1P1PPPP1/RNBQKBNR b KQkq c3 0 3",
        0x3c8123ea7b067637,
    ),
    (
        "rnbqkbnr/p1pppppp/8/8/P6P/R1p5/1P1PPPP1/1NBQKBNR b Kkq - 0 4",
        0x5c3f9b829b279560,
    ),
];

#[test]
fn polyglot_parity() {
    for (fen, expected) in POLYGLOT_VECTORS {
        let board = Board::new(fen).unwrap();
        assert_eq!(board.hash.0, expected, "hash mismatch for '{}'", fen);
    }
}

#[test]
fn make_and_unmake_are_symmetric() {
    let mut board = Board::starting_position();
    let initial = board.hash;

    make(&mut board, "e2e4");
    assert_ne!(board.hash, initial);

    board.undo_move();
    assert_eq!(board.hash, initial);
}

#[test]
fn incremental_updates_match_the_recomputation() {
    let lines: [&[&str]; 3] = [
        // Castling both ways, captures and a check
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "g8f6", "e1g1", "f6e4", "d2d4", "e4d6", "b5c6", "d7c6"],
        // En passant captures on both wings
        &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6", "c7d6", "a2a4", "h7h5", "a4a5", "b7b5", "a5b6"],
        // Promotions
        &["a2a4", "b7b5", "a4b5", "a7a6", "b5a6", "c7c6", "a6a7", "c6c5", "a7b8q"],
    ];

    for line in lines {
        let mut board = Board::starting_position();
        for uci_move in line {
            make(&mut board, uci_move);
            assert_eq!(board.hash, board.generate_hash_key(), "after {}", uci_move);
        }
    }
}

#[test]
fn transpositions_share_the_hash() {
    let mut first = Board::starting_position();
    for uci_move in ["e2e4", "e7e5", "g1f3", "b8c6"] {
        make(&mut first, uci_move);
    }

    let mut second = Board::starting_position();
    for uci_move in ["g1f3", "b8c6", "e2e4", "e7e5"] {
        make(&mut second, uci_move);
    }

    assert_eq!(first.hash, second.hash);
}

#[test]
fn en_passant_is_hashed_only_when_capturable() {
    // Identical structure, but no pawn can take en passant after h7h5
    let mut board = Board::starting_position();
    make(&mut board, "h2h4");
    make(&mut board, "h7h5");

    let reference = Board::new("rnbqkbnr/ppppppp1/8/7p/7P/8/PPPPPPP1/RNBQKBNR w KQkq - 0 2").unwrap();
    assert_eq!(board.hash, reference.hash);
}

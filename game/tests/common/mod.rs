use game::Board;

/// Counts the leaf nodes of the legal move tree to the given depth.
#[allow(dead_code)]
pub fn perft(depth: usize, board: &mut Board) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in board.generate_moves() {
        if board.make_move(mv).is_ok() {
            nodes += perft(depth - 1, board);
            board.undo_move();
        }
    }

    nodes
}

/// Makes the move given in UCI notation, which must be legal in the position.
#[allow(dead_code)]
pub fn make(board: &mut Board, uci_move: &str) {
    let mv = board
        .generate_moves()
        .into_iter()
        .find(|mv| mv.to_string() == uci_move)
        .unwrap_or_else(|| panic!("no move '{}' in this position", uci_move));

    board.make_move(mv).unwrap();
}

use std::time::Instant;

use game::Board;

/// Runs a divide-style perft, printing the node count behind every root move.
pub fn run_perft(depth: usize, board: &mut Board) {
    let stopwatch = Instant::now();
    let mut total = 0;

    for mv in board.generate_moves() {
        if board.make_move(mv).is_err() {
            continue;
        }

        let nodes = perft(depth.saturating_sub(1), board);
        board.undo_move();

        println!("{}: {}", mv, nodes);
        total += nodes;
    }

    let seconds = stopwatch.elapsed().as_secs_f32();
    println!();
    println!("nodes {} time {:.3}s nps {:.0}", total, seconds, total as f32 / seconds);
}

/// Counts the leaf nodes of the legal move tree to the given depth.
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

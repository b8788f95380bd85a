use std::time::Instant;

use crossbeam::channel::unbounded;

use game::{Board, Move, Score};

use crate::negamax::negamax_search;
use crate::{Bound, CacheEntry, SearchParams, SearchThread, ThreadPool};

const WINDOW_MARGIN: Score = Score(50);

/// Runs an iterative deepening search until the time budget expires or the
/// depth ceiling is reached, publishing an `info` line per completed depth and
/// a final `bestmove`. Returns the best move of the last completed iteration.
pub fn iterative_search(mut board: Board, mut thread: SearchThread, pool: &ThreadPool) -> Move {
    thread.deadline = thread
        .tc
        .budget(board.phase())
        .map(|budget| thread.start_time + budget);

    let mut best_move = Move::NULL;
    let mut last_score = Score::DRAW;

    let mut depth = 1;
    'deepening: while depth <= thread.tc.get_max_depth() {
        if thread.is_time_over() || thread.get_terminator() {
            break;
        }

        // From depth five on the search starts with a window around the last
        // score; a failure reopens the failed side and repeats the same depth
        let (mut alpha, mut beta) = match depth > 4 {
            true => (last_score - WINDOW_MARGIN, last_score + WINDOW_MARGIN),
            false => (-Score::INFINITY, Score::INFINITY),
        };

        thread.nodes = 0;
        let stopwatch = Instant::now();

        let score = loop {
            let result = search_root(&mut board, &mut thread, pool, alpha, beta, depth, best_move);
            let Some((score, mv)) = result else {
                // The iteration was cancelled; its partial result is discarded
                break 'deepening;
            };

            if score <= alpha {
                alpha = -Score::INFINITY;
                continue;
            }
            if score >= beta {
                beta = Score::INFINITY;
                continue;
            }

            if !mv.is_null() {
                best_move = mv;
            }
            break score;
        };

        last_score = score;

        let entry = CacheEntry::new(board.hash, depth, score, Bound::Exact, best_move);
        thread.cache.write(entry, 0);

        report_search_result(&mut board, &thread, depth, score, stopwatch);

        depth += 1;
    }

    println!("bestmove {}", best_move);
    best_move
}

/// Searches all root moves at the given depth. The first legal move runs
/// sequentially to establish a lower bound; the remaining moves are dispatched
/// to the worker pool, each task operating on its own board copy and sharing
/// only the transposition table and the stop flag.
///
/// Returns `None` when the search was stopped, in which case the caller keeps
/// the best move of the previous completed iteration.
fn search_root(
    board: &mut Board,
    thread: &mut SearchThread,
    pool: &ThreadPool,
    mut alpha: Score,
    beta: Score,
    depth: i32,
    previous_best: Move,
) -> Option<(Score, Move)> {
    let mut moves: Vec<Move> = board.generate_moves().into_iter().collect();

    // The best move of the previous iteration is searched first
    if let Some(index) = moves.iter().position(|&mv| mv == previous_best) {
        moves[..=index].rotate_right(1);
    }

    let mut best_move = Move::NULL;

    let mut first = None;
    for (index, &mv) in moves.iter().enumerate() {
        if board.make_move(mv).is_ok() {
            let params = SearchParams::new(board, -beta, -alpha, depth - 1, 1);
            let score = -negamax_search(params, thread);
            board.undo_move();

            if thread.get_terminator() {
                return None;
            }

            if score > alpha {
                alpha = score;
                best_move = mv;
            }

            first = Some(index);
            break;
        }
    }

    let Some(first) = first else {
        // No legal move exists, so the root is already decided
        let score = match board.is_in_check() {
            true => -Score::CHECKMATE,
            false => Score::DRAW,
        };
        return Some((score, Move::NULL));
    };

    let (results, collected) = unbounded();

    for &mv in &moves[first + 1..] {
        let mut copy = board.clone();
        if copy.make_move(mv).is_err() {
            continue;
        }

        let mut worker = thread.clone_for_worker();
        let results = results.clone();

        pool.execute(move || {
            let params = SearchParams::new(&mut copy, -beta, -alpha, depth - 1, 1);
            let score = -negamax_search(params, &mut worker);
            let _ = results.send((mv, score, worker.nodes));
        });
    }
    drop(results);

    // The channel closes once every dispatched task has reported back
    for (mv, score, nodes) in collected.iter() {
        thread.nodes += nodes;

        // Results delivered after a stop may carry sentinel scores
        if thread.get_terminator() {
            continue;
        }

        if score > alpha {
            alpha = score;
            best_move = mv;
        }
    }

    if thread.get_terminator() {
        return None;
    }

    Some((alpha, best_move))
}

fn report_search_result(board: &mut Board, thread: &SearchThread, depth: i32, score: Score, stopwatch: Instant) {
    let duration = stopwatch.elapsed();
    let nps = thread.nodes as f32 / duration.as_secs_f32();
    let ms = duration.as_millis();

    let score = match score.checkmate_in() {
        Some(moves) => format!("mate {}", moves),
        None => format!("cp {}", score),
    };

    let pv = thread.get_principal_variation(board, depth);

    print!(
        "info depth {} score {} nodes {} time {} nps {:.0} pv",
        depth, score, thread.nodes, ms, nps
    );
    pv.iter().for_each(|mv| print!(" {}", mv));
    println!();
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use game::Board;

    use super::iterative_search;
    use crate::{Cache, SearchThread, ThreadPool, TimeControl};

    #[test]
    fn fixed_depth_search_returns_a_legal_move() {
        let board = Board::starting_position();
        let thread = SearchThread::new(
            TimeControl::FixedDepth(3),
            Arc::new(AtomicBool::new(false)),
            Arc::new(Cache::new(2)),
        );

        let pool = ThreadPool::new(2);
        let best = iterative_search(board.clone(), thread, &pool);

        assert!(board.generate_moves().into_iter().any(|mv| mv == best));
    }

    #[test]
    fn stop_keeps_the_last_completed_iteration() {
        let terminator = Arc::new(AtomicBool::new(false));
        let stop = terminator.clone();

        let handle = std::thread::spawn(move || {
            let board = Board::starting_position();
            let thread = SearchThread::new(TimeControl::Infinite, terminator, Arc::new(Cache::new(2)));
            let pool = ThreadPool::new(2);

            iterative_search(board, thread, &pool)
        });

        // Give the search time to complete at least the first iteration
        std::thread::sleep(Duration::from_millis(200));
        stop.store(true, Ordering::Release);

        let best = handle.join().unwrap();
        assert!(!best.is_null());
    }
}

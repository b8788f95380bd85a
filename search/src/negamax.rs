use game::{Move, Score, MAX_SEARCH_DEPTH};

use crate::ordering::Ordering;
use crate::quiescence::quiescence_search;
use crate::{Bound, CacheEntry, SearchParams, SearchThread};

/// How many nodes are searched between two checks of the time budget.
const TIME_CHECK_NODES: u64 = 1024;

/// The depth reduction of the null move search.
const NULL_MOVE_REDUCTION: i32 = 3;

/// Performs a `negamax` search with alpha-beta pruning in a fail-hard environment.
///
/// See [Negamax](https://www.chessprogramming.org/Negamax) for more information.
pub(crate) fn negamax_search(mut p: SearchParams, thread: &mut SearchThread) -> Score {
    thread.nodes += 1;

    if thread.nodes % TIME_CHECK_NODES == 0 && thread.is_time_over() {
        thread.set_terminator(true);
    }

    // The stop flag cancels the search; the sentinel is discarded by the root
    if thread.get_terminator() {
        return Score::INVALID;
    }

    if p.ply > 0 && p.board.state().halfmove_clock >= 100 {
        return Score::DRAW;
    }

    if p.ply > 0 && p.board.is_repetition() {
        return Score::DRAW;
    }

    if p.ply >= MAX_SEARCH_DEPTH {
        return evaluation::evaluate(p.board);
    }

    // Static evaluation is unreliable when the king is under check,
    // so increase the search depth in this case
    let in_check = p.board.is_in_check();
    if in_check {
        p.depth += 1;
    }

    if p.depth <= 0 {
        return quiescence_search(p, thread);
    }

    // A cached result from a deep enough search either answers the node
    // directly or tightens the window
    let entry = thread.cache.read(p.board.hash, p.ply);
    if let Some(entry) = &entry {
        if entry.depth as i32 >= p.depth {
            match entry.bound {
                Bound::Exact => return entry.score,
                Bound::Lower => p.alpha = p.alpha.max(entry.score),
                Bound::Upper => p.beta = p.beta.min(entry.score),
            }

            if p.alpha >= p.beta {
                return p.beta;
            }
        }
    }
    let tt_move = entry.map(|entry| entry.mv).filter(|mv| !mv.is_null());

    // Giving the opponent a free move and still exceeding beta with a reduced
    // search proves the position too good to be reachable; skipped when low on
    // material, where zugzwang would make the proof unsound
    if p.allow_nmp
        && !in_check
        && p.ply > 0
        && p.depth > 2
        && p.board.non_pawn_material(p.board.turn) > 3000
    {
        let score = null_move_pruning(&mut p, thread);
        if score >= p.beta {
            return p.beta;
        }
    }

    let original_alpha = p.alpha;
    let mut best_move = Move::NULL;
    let mut legal_moves = 0;

    let mut ordering = Ordering::normal(p.board, p.ply, thread, tt_move);
    while let Some(mv) = ordering.next() {
        if p.board.make_move(mv).is_err() {
            continue;
        }

        legal_moves += 1;

        // Late quiet moves are probed with a reduced depth and a null window;
        // only a probe that unexpectedly beats alpha is re-searched in full
        let mut score;
        if legal_moves > 5 && p.depth > 4 && mv.is_normal() {
            let reduction = (1 + p.depth / 5).min(4);

            let params = SearchParams::new(p.board, -p.alpha - 1, -p.alpha, p.depth - 1 - reduction, p.ply + 1);
            score = -negamax_search(params, thread);

            if score > p.alpha {
                score = dive(&mut p, thread);
            }
        } else {
            score = dive(&mut p, thread);
        }

        p.board.undo_move();

        if thread.get_terminator() {
            return Score::INVALID;
        }

        // The move is too good for the opponent, making the position not
        // interesting for us, so we can perform a beta cutoff
        if score >= p.beta {
            // The killer heuristic is intended only for ordering quiet moves
            if mv.is_quiet() {
                thread.killers.add(mv, p.ply);
            }

            let entry = CacheEntry::new(p.board.hash, p.depth, score, Bound::Lower, mv);
            write_cache_entry(entry, p.ply, thread);

            return p.beta;
        }

        // Found a better move that raises alpha
        if score > p.alpha {
            p.alpha = score;
            best_move = mv;

            // The history heuristic is intended only for ordering quiet moves
            if mv.is_quiet() {
                thread.history.store(mv.from(), mv.to(), p.depth);
            }
        }
    }

    if legal_moves == 0 {
        // Adding the ply makes the engine prefer the shortest path to a mate
        let score = match in_check {
            true => -Score::CHECKMATE + p.ply as i32,
            false => Score::DRAW,
        };

        let entry = CacheEntry::new(p.board.hash, MAX_SEARCH_DEPTH as i32, score, Bound::Exact, Move::NULL);
        write_cache_entry(entry, p.ply, thread);

        return score;
    }

    let bound = match p.alpha > original_alpha {
        true => Bound::Exact,
        false => Bound::Upper,
    };

    let entry = CacheEntry::new(p.board.hash, p.depth, p.alpha, bound, best_move);
    write_cache_entry(entry, p.ply, thread);

    p.alpha
}

#[inline(always)]
fn dive(p: &mut SearchParams, thread: &mut SearchThread) -> Score {
    let params = SearchParams::new(p.board, -p.beta, -p.alpha, p.depth - 1, p.ply + 1);
    -negamax_search(params, thread)
}

fn null_move_pruning(p: &mut SearchParams, thread: &mut SearchThread) -> Score {
    p.board.make_null_move();

    let mut params = SearchParams::new(
        p.board,
        -p.beta,
        -p.beta + 1,
        p.depth - 1 - NULL_MOVE_REDUCTION,
        p.ply + 1,
    );
    params.allow_nmp = false;

    let score = -negamax_search(params, thread);
    p.board.undo_null_move();

    score
}

/// Writes the entry unless the search has been cancelled, since entries
/// produced after the stop flag is up may contain sentinel scores.
#[inline(always)]
pub(crate) fn write_cache_entry(entry: CacheEntry, ply: usize, thread: &SearchThread) {
    if !thread.get_terminator() {
        thread.cache.write(entry, ply);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use game::{Board, Move, Score};

    use super::negamax_search;
    use crate::{Cache, SearchParams, SearchThread, TimeControl};

    fn fresh_thread() -> SearchThread {
        SearchThread::new(
            TimeControl::Infinite,
            Arc::new(AtomicBool::new(false)),
            Arc::new(Cache::new(1)),
        )
    }

    fn negamax(board: &mut Board, depth: i32) -> Score {
        let thread = &mut fresh_thread();
        negamax_search(
            SearchParams::new(board, -Score::INFINITY, Score::INFINITY, depth, 0),
            thread,
        )
    }

    /// Picks the root move maximizing the negamax score of the children,
    /// breaking ties towards the earlier generated move.
    fn negamax_root(board: &mut Board, depth: i32) -> (Score, Move) {
        let thread = &mut fresh_thread();
        let mut best = (-Score::INFINITY, Move::NULL);

        for mv in board.generate_moves() {
            if board.make_move(mv).is_err() {
                continue;
            }
            let params = SearchParams::new(board, -Score::INFINITY, Score::INFINITY, depth - 1, 1);
            let score = -negamax_search(params, thread);
            board.undo_move();

            if score > best.0 {
                best = (score, mv);
            }
        }

        best
    }

    /// A reference searcher without pruning, ordering or caching: plain minimax
    /// over the same move set, with the same check extension and the same
    /// captures-only resolution at the horizon.
    fn minimax(board: &mut Board, mut depth: i32, ply: i32) -> Score {
        if board.is_in_check() {
            depth += 1;
        }
        if depth <= 0 {
            return minimax_captures(board);
        }

        let mut best = -Score::INFINITY;
        let mut legal_moves = 0;

        for mv in board.generate_moves() {
            if board.make_move(mv).is_err() {
                continue;
            }
            legal_moves += 1;

            let score = -minimax(board, depth - 1, ply + 1);
            board.undo_move();

            best = best.max(score);
        }

        if legal_moves == 0 {
            return match board.is_in_check() {
                true => -Score::CHECKMATE + ply,
                false => Score::DRAW,
            };
        }

        best
    }

    fn minimax_captures(board: &mut Board) -> Score {
        let mut best = evaluation::evaluate(board);

        for mv in board.generate_capture_moves() {
            if board.make_move(mv).is_err() {
                continue;
            }
            let score = -minimax_captures(board);
            board.undo_move();

            best = best.max(score);
        }

        best
    }

    fn minimax_root(board: &mut Board, depth: i32) -> (Score, Move) {
        let mut best = (-Score::INFINITY, Move::NULL);

        for mv in board.generate_moves() {
            if board.make_move(mv).is_err() {
                continue;
            }
            let score = -minimax(board, depth - 1, 1);
            board.undo_move();

            if score > best.0 {
                best = (score, mv);
            }
        }

        best
    }

    #[test]
    fn alphabeta_matches_minimax() {
        let positions = [
            "k7/8/8/8/8/8/1q6/1R5K w - - 0 1",
            "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];

        for fen in positions {
            let mut board = Board::new(fen).unwrap();
            let (reference_score, reference_move) = minimax_root(&mut board, 2);
            let (score, mv) = negamax_root(&mut board, 2);

            assert_eq!(score, reference_score, "score differs for {}", fen);
            assert_eq!(mv, reference_move, "move differs for {}", fen);
        }
    }

    #[test]
    fn checkmate_is_scored_by_distance() {
        // Rook mates on h8 next move
        let mut board = Board::new("k7/8/1K6/8/8/8/8/7R w - - 0 1").unwrap();
        let score = negamax(&mut board, 4);

        assert_eq!(score, Score::CHECKMATE - 1);
    }

    #[test]
    fn stalemate_is_a_draw() {
        let mut board = Board::new("k7/8/1Q6/8/8/8/8/7K b - - 0 1").unwrap();
        assert_eq!(negamax(&mut board, 4), Score::DRAW);
    }

    #[test]
    fn shorter_mate_is_preferred() {
        // Mate in one is available next to slower mates
        let mut board = Board::new("6k1/5ppp/8/8/8/8/8/1Q2R1K1 w - - 0 1").unwrap();
        let (score, mv) = negamax_root(&mut board, 5);

        assert_eq!(score, Score::CHECKMATE - 1);
        assert_eq!(mv.to_string(), "e1e8");
    }
}

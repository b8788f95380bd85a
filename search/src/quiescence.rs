use game::{Move, Score, MAX_SEARCH_DEPTH};

use crate::negamax::write_cache_entry;
use crate::ordering::Ordering;
use crate::{Bound, CacheEntry, SearchParams, SearchThread};

/// Resolves captures at the horizon until the position becomes stable enough to
/// evaluate statically. This minimizes the horizon effect for volatile positions
/// where threats and opportunities beyond the fixed depth of the search would
/// otherwise remain undetected.
///
/// The returned score is never worse than the stand-pat evaluation.
///
/// See [Quiescence Search](https://www.chessprogramming.org/Quiescence_Search)
/// for more information.
pub(crate) fn quiescence_search(mut p: SearchParams, thread: &mut SearchThread) -> Score {
    thread.nodes += 1;

    if thread.get_terminator() {
        return Score::INVALID;
    }

    if p.ply >= MAX_SEARCH_DEPTH {
        return evaluation::evaluate(p.board);
    }

    // Only exact entries are usable here; depth bounds would cause bad cutoffs
    let entry = thread.cache.read(p.board.hash, p.ply);
    if let Some(entry) = &entry {
        if entry.bound == Bound::Exact {
            return entry.score;
        }
    }
    let tt_move = entry.map(|entry| entry.mv).filter(|mv| !mv.is_null());

    let stand_pat = evaluation::evaluate(p.board);
    if stand_pat >= p.beta {
        return p.beta;
    }

    let original_alpha = p.alpha;
    if stand_pat > p.alpha {
        p.alpha = stand_pat;
    }

    let mut best_move = Move::NULL;

    let mut ordering = Ordering::quiescence(p.board, p.ply, thread, tt_move);
    while let Some(mv) = ordering.next() {
        if p.board.make_move(mv).is_err() {
            continue;
        }

        let params = SearchParams::new(p.board, -p.beta, -p.alpha, 0, p.ply + 1);
        let score = -quiescence_search(params, thread);

        p.board.undo_move();

        // Cutoffs are deliberately not cached here to avoid polluting the table
        if score >= p.beta {
            return p.beta;
        }

        if score > p.alpha {
            p.alpha = score;
            best_move = mv;
        }
    }

    // Only scores that landed strictly inside the window are truly exact;
    // fail-low results are not cached since bounds are useless here anyway
    if p.alpha > original_alpha {
        let entry = CacheEntry::new(p.board.hash, 0, p.alpha, Bound::Exact, best_move);
        write_cache_entry(entry, p.ply, thread);
    }

    p.alpha
}

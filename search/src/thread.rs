use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use game::{Board, Move};

use crate::{Cache, HistoryMoves, KillerMoves, TimeControl};

/// The per-thread search state. The transposition table and the stop flag are
/// shared between all threads; everything else is owned.
pub struct SearchThread {
    pub tc: TimeControl,
    pub terminator: Arc<AtomicBool>,
    pub cache: Arc<Cache>,
    pub start_time: Instant,
    pub deadline: Option<Instant>,
    pub nodes: u64,
    pub killers: KillerMoves,
    pub history: HistoryMoves,
}

impl SearchThread {
    pub fn new(tc: TimeControl, terminator: Arc<AtomicBool>, cache: Arc<Cache>) -> Self {
        Self {
            tc,
            terminator,
            cache,
            start_time: Instant::now(),
            deadline: None,
            nodes: 0,
            killers: KillerMoves::default(),
            history: HistoryMoves::default(),
        }
    }

    /// Creates a worker clone for a root move task. The worker shares the cache
    /// and the stop flag and starts from a snapshot of the ordering heuristics.
    pub fn clone_for_worker(&self) -> Self {
        Self {
            tc: self.tc.clone(),
            terminator: self.terminator.clone(),
            cache: self.cache.clone(),
            start_time: self.start_time,
            deadline: self.deadline,
            nodes: 0,
            killers: self.killers.clone(),
            history: self.history.clone(),
        }
    }

    /// Extracts the principal variation from the transposition table, limited to
    /// the given depth.
    pub fn get_principal_variation(&self, board: &mut Board, depth: i32) -> Vec<Move> {
        let mut pv_line = Vec::new();

        while (pv_line.len() as i32) < depth {
            let Some(entry) = self.cache.read(board.hash, 0) else { break };
            if entry.mv.is_null() || board.make_move(entry.mv).is_err() {
                break;
            }

            pv_line.push(entry.mv);
        }

        pv_line.iter().for_each(|_| board.undo_move());
        pv_line
    }

    #[inline(always)]
    pub fn get_terminator(&self) -> bool {
        self.terminator.load(Ordering::Acquire)
    }

    #[inline(always)]
    pub fn set_terminator(&self, value: bool) {
        self.terminator.store(value, Ordering::Release);
    }

    #[inline(always)]
    pub fn is_time_over(&self) -> bool {
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

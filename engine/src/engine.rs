use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use game::Board;
use search::{iterative_search, Cache, SearchThread, ThreadPool, TimeControl, MAX_CACHE_SIZE, MIN_CACHE_SIZE};

use crate::book::OpeningBook;
use crate::perft::run_perft;

/// Book moves are only played in the early game.
const BOOK_MOVE_LIMIT: u16 = 10;

pub struct Engine {
    pub board: Board,
    cache: Arc<Cache>,
    terminator: Arc<AtomicBool>,
    pool: Arc<ThreadPool>,
    book: Option<OpeningBook>,
}

impl Engine {
    /// Creates a new `Engine` with the initial position set, a worker pool sized
    /// to the hardware, and the default opening book if one sits next to the binary.
    pub fn new() -> Self {
        Self {
            board: Board::starting_position(),
            cache: Arc::new(Cache::default()),
            terminator: Default::default(),
            pool: Arc::new(ThreadPool::with_hardware_threads()),
            book: OpeningBook::open("book.bin").ok(),
        }
    }

    /// Requests the current search to stop; the searcher answers with the best
    /// move of its last completed iteration.
    pub fn stop(&mut self) {
        self.write_terminator(true);
    }

    /// Resets the `Engine` to its original state for a new game.
    pub fn reset(&mut self) {
        self.board = Board::starting_position();
        self.write_terminator(false);
        self.cache.clear();
    }

    /// Replaces the transposition table with a newly sized one.
    pub fn set_cache_size(&mut self, megabytes: usize) {
        self.cache = Arc::new(Cache::new(megabytes.clamp(MIN_CACHE_SIZE, MAX_CACHE_SIZE)));
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn load_book(&mut self, path: &str) {
        match OpeningBook::open(path) {
            Ok(book) => self.book = Some(book),
            Err(error) => eprintln!("Failed to load book '{}': {}", path, error),
        }
    }

    /// Makes the specified UCI move on the board. Moves with no legal match are
    /// ignored without mutating the board.
    pub fn make_uci_move(&mut self, uci_move: &str) {
        for mv in self.board.generate_moves() {
            if mv.to_string() == uci_move && self.board.make_move(mv).is_ok() {
                return;
            }
        }
    }

    /// Answers with a book move when one exists, otherwise runs an iterative
    /// deepening search on a separate thread.
    pub fn search(&mut self, time_control: TimeControl) {
        if let Some(book_move) = self.book_move() {
            println!("bestmove {}", book_move);
            return;
        }

        self.write_terminator(false);

        let board = self.board.clone();
        let thread = SearchThread::new(time_control, self.terminator.clone(), self.cache.clone());
        let pool = self.pool.clone();

        thread::spawn(move || {
            iterative_search(board, thread, &pool);
        });
    }

    /// Looks up the current position in the opening book. The book keys use the
    /// same Polyglot hashing as the board, so the board hash probes it directly.
    fn book_move(&self) -> Option<String> {
        if self.board.fullmove_number >= BOOK_MOVE_LIMIT {
            return None;
        }

        let uci_move = self.book.as_ref()?.pick_move(self.board.hash.0)?;

        // Play the book move only if it maps to a legal move of the position
        let mut board = self.board.clone();
        self.board
            .generate_moves()
            .into_iter()
            .find(|mv| mv.to_string() == uci_move && board.make_move(*mv).is_ok())
            .map(|mv| mv.to_string())
    }

    /// Runs a node enumeration performance test for the current position.
    pub fn perft(&mut self, depth: usize) {
        run_perft(depth, &mut self.board);
    }

    /// Statically evaluates the current position and reports the white-relative score.
    pub fn evaluate(&self) {
        println!("evaluation {}", evaluation::evaluate_absolute_score(&self.board));
    }

    fn write_terminator(&mut self, value: bool) {
        self.terminator.store(value, Ordering::Release);
    }
}

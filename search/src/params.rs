use game::{Board, Score};

/// The per-node parameters of a search call.
pub struct SearchParams<'a> {
    pub board: &'a mut Board,
    pub alpha: Score,
    pub beta: Score,
    pub depth: i32,
    pub ply: usize,
    pub allow_nmp: bool,
}

impl<'a> SearchParams<'a> {
    pub fn new(board: &'a mut Board, alpha: Score, beta: Score, depth: i32, ply: usize) -> Self {
        Self {
            board,
            alpha,
            beta,
            depth,
            ply,
            allow_nmp: true,
        }
    }
}

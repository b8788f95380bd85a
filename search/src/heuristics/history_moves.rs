use game::Square;

/// The history heuristic keeps track of how successful a quiet move has been in
/// the past, with cutoffs near the root weighted more heavily.
///
/// See [History Heuristic](https://www.chessprogramming.org/History_Heuristic) for more information.
#[derive(Clone)]
pub struct HistoryMoves {
    table: [[u32; Square::NUM]; Square::NUM],
}

impl HistoryMoves {
    /// Increases the score of a move quadratically with the remaining depth.
    pub fn store(&mut self, from: Square, to: Square, depth: i32) {
        self.table[from.0 as usize][to.0 as usize] += (depth * depth) as u32;
    }

    /// Returns the accumulated score of a move.
    pub fn get_score(&self, from: Square, to: Square) -> u32 {
        self.table[from.0 as usize][to.0 as usize]
    }
}

impl Default for HistoryMoves {
    fn default() -> Self {
        Self {
            table: [[0; Square::NUM]; Square::NUM],
        }
    }
}

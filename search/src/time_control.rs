use std::time::Duration;

use game::{MAX_SEARCH_DEPTH, TOTAL_PHASE};

#[derive(Debug, Clone, PartialEq)]
pub enum TimeControl {
    Infinite,
    FixedDepth(i32),
    FixedTime(u64),
    Incremental(u64, u64),
    Tournament(u64, u64, u64),
}

/// The default number of moves left when the opponent's clock does not say otherwise.
/// This results in slower play at the beginning and faster towards the end.
const MOVES_TO_GO: u64 = 25;

/// Safe margin for move time overhead.
const TIME_MARGIN_MS: u64 = 50;

impl TimeControl {
    /// Returns the maximum `depth` for the current `TimeControl`. The depth value
    /// can take the specified value or the search ceiling if no depth limit is specified.
    #[inline(always)]
    pub fn get_max_depth(&self) -> i32 {
        match self {
            Self::FixedDepth(depth) => *depth,
            _ => MAX_SEARCH_DEPTH as i32,
        }
    }

    /// Computes the time budget for one move, or `None` when the search is not
    /// bounded by time.
    ///
    /// The base allocation spreads the remaining time over the expected number
    /// of moves plus the increment, capped by game-phase bands so the opening
    /// does not burn time a long endgame will need, and degraded further when
    /// the clock runs low. The budget always leaves a safety margin of the
    /// remaining time.
    pub fn budget(&self, phase: i32) -> Option<Duration> {
        let (main, inc, moves) = match *self {
            Self::Infinite | Self::FixedDepth(_) => return None,
            Self::FixedTime(time) => return Some(Duration::from_millis(time)),
            Self::Incremental(main, inc) => (main, inc, MOVES_TO_GO),
            Self::Tournament(main, inc, moves) => (main, inc, moves.max(1)),
        };

        let mut time = main / moves + inc;

        let fraction = phase as f64 / TOTAL_PHASE as f64;
        time = time.min(match fraction {
            f if f > 0.15 => 3500,
            f if f > 0.05 => 8000,
            _ => 15000,
        });

        if main < 3 * 60 * 1000 {
            time = time.min(3000);
        }
        if main < 60 * 1000 {
            time = time.min(1000);
        }

        time = time.min(main.saturating_sub(TIME_MARGIN_MS)).max(1);

        Some(Duration::from_millis(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_controls_have_no_budget() {
        assert_eq!(TimeControl::Infinite.budget(TOTAL_PHASE), None);
        assert_eq!(TimeControl::FixedDepth(7).budget(TOTAL_PHASE), None);
    }

    #[test]
    fn fixed_time_is_taken_directly() {
        let budget = TimeControl::FixedTime(750).budget(0).unwrap();
        assert_eq!(budget, Duration::from_millis(750));
    }

    #[test]
    fn opening_band_caps_the_budget() {
        // Plenty of time on the clock, but the opening cap kicks in
        let budget = TimeControl::Incremental(30 * 60 * 1000, 0).budget(TOTAL_PHASE).unwrap();
        assert_eq!(budget, Duration::from_millis(3500));

        // The same clock late in the game allows a longer think
        let budget = TimeControl::Incremental(30 * 60 * 1000, 0).budget(0).unwrap();
        assert_eq!(budget, Duration::from_millis(15000));
    }

    #[test]
    fn low_clock_degrades_the_budget() {
        let budget = TimeControl::Incremental(2 * 60 * 1000, 1000).budget(0).unwrap();
        assert_eq!(budget, Duration::from_millis(3000));

        let budget = TimeControl::Incremental(30 * 1000, 1000).budget(0).unwrap();
        assert_eq!(budget, Duration::from_millis(1000));
    }

    #[test]
    fn budget_never_exceeds_the_clock() {
        let budget = TimeControl::FixedTime(40).budget(0).unwrap();
        assert_eq!(budget, Duration::from_millis(40));

        let budget = TimeControl::Incremental(120, 10_000).budget(0).unwrap();
        assert_eq!(budget, Duration::from_millis(70));
    }
}

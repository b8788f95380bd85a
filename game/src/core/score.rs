use super::macros::{impl_assign_op, impl_binary_op, impl_unary_op};
use crate::MAX_SEARCH_DEPTH;

/// Represents a value in centipawns that determines the odds of winning or losing.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    /// The sentinel returned by an aborted search; never a meaningful evaluation.
    pub const INVALID: Self = Self(0);

    pub const INFINITY: Self = Self(50000);
    pub const CHECKMATE: Self = Self(48000);
    pub const DRAW: Self = Self(0);

    /// Creates a new `Score`.
    pub const fn new(score: i32) -> Self {
        Self(score)
    }

    /// Returns `true` if the score indicates a forced mate delivered by the side to move.
    #[inline(always)]
    pub const fn is_mating(self) -> bool {
        self.0 > Self::CHECKMATE.0 - 2 * MAX_SEARCH_DEPTH as i32
    }

    /// Returns `true` if the score indicates a forced mate against the side to move.
    #[inline(always)]
    pub const fn is_getting_mated(self) -> bool {
        self.0 < -Self::CHECKMATE.0 + 2 * MAX_SEARCH_DEPTH as i32
    }

    /// Returns the number of full moves to the checkmate, negative when losing.
    pub const fn checkmate_in(self) -> Option<i32> {
        if self.is_mating() {
            let plies = Self::CHECKMATE.0 - self.0;
            return Some((plies + 1) / 2);
        }

        if self.is_getting_mated() {
            let plies = Self::CHECKMATE.0 + self.0;
            return Some(-(plies + 1) / 2);
        }

        None
    }
}

impl_unary_op!(Score, Neg, neg);
impl_binary_op!(Score, Add, add);
impl_binary_op!(Score, Sub, sub);
impl_assign_op!(Score, AddAssign, add_assign);
impl_assign_op!(Score, SubAssign, sub_assign);

impl std::ops::Add<i32> for Score {
    type Output = Score;

    #[inline(always)]
    fn add(self, rhs: i32) -> Self::Output {
        Score(self.0 + rhs)
    }
}

impl std::ops::Sub<i32> for Score {
    type Output = Score;

    #[inline(always)]
    fn sub(self, rhs: i32) -> Self::Output {
        Score(self.0 - rhs)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

use crate::core::{Move, Piece, Zobrist};

use super::state::State;
use super::threats::Threats;

/// Contains the information required to unmake a move.
#[derive(Clone, Copy, PartialEq)]
pub(super) struct Change {
    pub mv: Move,
    pub state: State,
    pub capture: Option<Piece>,
    pub hash: Zobrist,
    pub threats: Threats,
}

use crate::core::{Castling, Square};

/// Contains the irreversible aspects of a chess position that cannot be restored
/// by unmaking a move and therefore have to be snapshotted before every make.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub castling: Castling,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u16,
}

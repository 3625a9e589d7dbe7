//! Turn and round cursor.

use serde::{Deserialize, Serialize};

/// Position in the turn order.
///
/// `current_turn` indexes canonical order; `round` counts completed passes.
/// Both are 0-based, any "+1 for display" is the caller's business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCursor {
    pub current_turn: usize,
    pub round: u32,
}

impl TurnCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combat counts as started once the cursor has left `(0, 0)`.
    pub fn is_started(&self) -> bool {
        self.current_turn != 0 || self.round != 0
    }

    /// Move to the next participant, rolling into a new round at the end.
    ///
    /// With no participants this does nothing at all, the round included.
    pub fn advance(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.current_turn = (self.current_turn + 1) % len;
        if self.current_turn == 0 {
            self.round += 1;
        }
    }

    /// Move back one participant. Stepping back from the top of a round goes
    /// to the last participant of the previous round; at the very start of
    /// combat it stays put.
    pub fn retreat(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.current_turn > 0 {
            self.current_turn -= 1;
        } else if self.round > 0 {
            self.round -= 1;
            self.current_turn = len - 1;
        }
    }

    /// Send a `current_turn` past the end back to the top of the order.
    /// The round is not touched.
    pub(crate) fn fit(&mut self, len: usize) {
        if self.current_turn >= len {
            self.current_turn = 0;
        }
    }
}

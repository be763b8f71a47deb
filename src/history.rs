//! Game histories: every board state a move sequence passes through.
//!
//! `GameHistory::build` replays a token list from the standard starting
//! position and keeps each intermediate board, so jumping to an arbitrary
//! ply is a slice lookup. Histories are rebuilt wholesale; there is no
//! incremental patching, and a rebuild of the same tokens always yields
//! the same states.

use thiserror::Error;

use crate::apply;
use crate::notation::MoveRecord;
use crate::types::{Board, Color};

/// Errors from history lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The requested ply does not exist in this history.
    #[error("ply {ply} is out of range for a history of {len} states")]
    OutOfRange { ply: usize, len: usize },
}

/// All positions of one game, index 0 being the starting position.
///
/// For a game of `n` move tokens the history holds `n + 1` states:
/// state `i` is the position after the first `i` plies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameHistory {
    states: Vec<Board>,
}

impl GameHistory {
    /// Replays `moves` from the starting position, White moving first and
    /// colors alternating per ply.
    ///
    /// Never fails: a token that cannot be parsed at all carries the
    /// previous position forward unchanged (with a warning), so the
    /// resulting history always has `moves.len() + 1` states.
    pub fn build<S: AsRef<str>>(moves: &[S]) -> GameHistory {
        let mut states = Vec::with_capacity(moves.len() + 1);
        states.push(Board::starting_position());

        let mut mover = Color::White;
        for (i, token) in moves.iter().enumerate() {
            let token = token.as_ref();
            let next = match MoveRecord::parse(token) {
                Some(record) => apply::apply_move(&states[i], &record, mover),
                None => {
                    log::warn!(
                        "Unparseable move token '{}' at ply {}; carrying the position forward",
                        token,
                        i + 1
                    );
                    states[i].clone()
                }
            };
            states.push(next);
            mover = mover.opponent();
        }

        GameHistory { states }
    }

    /// Returns the position after `ply` moves. Ply 0 is the starting
    /// position. Plies past the end fail with [`HistoryError::OutOfRange`];
    /// plies before the start are unrepresentable.
    pub fn state_at(&self, ply: usize) -> Result<&Board, HistoryError> {
        self.states.get(ply).ok_or(HistoryError::OutOfRange {
            ply,
            len: self.states.len(),
        })
    }

    /// Number of stored states (always one more than the move count).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when the history holds no states. Built histories always
    /// contain at least the starting position.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All stored states in ply order.
    pub fn states(&self) -> &[Board] {
        &self.states
    }
}

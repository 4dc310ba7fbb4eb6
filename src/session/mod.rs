//! Exclusive edit sessions and the board facade.
//!
//! [`EditSession`] is the draft state machine; [`TaskBoard`] wires it to
//! the row store, the taxonomy resolver, and the table model over one
//! gateway.

mod board;
mod edit;

pub use board::{BoardError, BoardResult, TaskBoard};
pub use edit::{
    DEFAULT_SAVE_TIMEOUT, EditSession, SaveOutcome, SessionError, SessionResult, SessionStatus,
};

#[cfg(test)]
mod tests;

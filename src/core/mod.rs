//! Core engine types.
//!
//! This module contains the whole of the execution engine:
//! - Guard and action capabilities attached to transitions
//! - Transition records and the ordered table
//! - The [`Fsm`] handle and its guarded fire protocol
//! - Caller-driven fire diagnostics
//!
//! The engine is synchronous and non-reentrant; see the crate docs for the
//! threading contract.

mod guard;
mod history;
mod machine;
mod transition;

pub use guard::{Action, Guard};
pub use history::{FireLog, FireRecord};
pub use machine::{FireOutcome, Fsm};
pub use transition::{StateId, Transition, TransitionTable, INVALID_STATE, MAX_TRANSITIONS};

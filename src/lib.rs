//! Ratchet: a minimal guarded-transition state machine engine.
//!
//! Ratchet is built for embedding by composition: a machine is nothing but
//! a borrowed transition table and a current state, driven by repeated
//! calls to [`Fsm::fire`]. Each fire scans the table in order, takes the
//! first entry whose origin matches and whose guard passes, then runs the
//! entry's action with the machine already in its new state.
//!
//! # Core Concepts
//!
//! - **Transition table**: ordered, caller-owned sequence of
//!   `(origin, guard, destination, action)` records; order decides who
//!   fires first
//! - **Guards**: predicates over the machine handle that gate transitions;
//!   an absent guard is unconditionally true
//! - **Actions**: procedures invoked after the state change, observing the
//!   new state
//! - **Three-way fire outcome**: [`FireOutcome::Transitioned`] /
//!   [`FireOutcome::NoMatch`] (guards said no this tick) /
//!   [`FireOutcome::NoState`] (the table has no path out of here — a
//!   configuration smell)
//! - **Injected allocation**: the heap lifecycle ([`FsmBox`]) draws from a
//!   replaceable [`Allocator`], defaulting to the platform allocator
//!
//! The engine is synchronous and non-reentrant: no locking, no suspension
//! points. Tables are read-only shared data — several machines may run
//! over one table with independent state — but a single handle must not be
//! mutated from multiple threads without external synchronization.
//!
//! # Example
//!
//! ```rust
//! use ratchet::{transition_table, FireOutcome, Fsm};
//!
//! const IDLE: i32 = 0;
//! const RUNNING: i32 = 1;
//! const DONE: i32 = 2;
//!
//! let table = transition_table! {
//!     IDLE => RUNNING, when |fsm: &Fsm| fsm.current_state() == IDLE;
//!     RUNNING => DONE;
//! };
//!
//! let mut fsm = Fsm::new(&table).expect("valid table");
//!
//! assert_eq!(fsm.fire(), FireOutcome::Transitioned);
//! assert_eq!(fsm.fire(), FireOutcome::Transitioned);
//! assert_eq!(fsm.current_state(), DONE);
//!
//! // DONE has no outgoing transitions: a dead state by configuration
//! assert_eq!(fsm.fire(), FireOutcome::NoState);
//! ```

pub mod alloc;
pub mod builder;
pub mod core;

// Re-export commonly used types
pub use alloc::{Allocator, FsmBox, System};
pub use builder::{BuildError, TableBuilder};
pub use core::{
    Action, FireLog, FireOutcome, FireRecord, Fsm, Guard, StateId, Transition, TransitionTable,
    INVALID_STATE, MAX_TRANSITIONS,
};

//! Guard and action capabilities attached to transitions.
//!
//! Guards are boolean predicates evaluated against the machine handle to
//! decide whether a transition fires. Actions are procedures invoked after a
//! successful transition, observing the machine in its new state. Both are
//! optional on a transition: an absent guard is unconditionally true, an
//! absent action does nothing.

use super::machine::Fsm;

/// Predicate that decides whether a transition may fire.
///
/// The predicate receives the machine handle as its sole argument and must
/// not retain it. Guards are evaluated on the calling thread with the
/// machine in its *current* (pre-transition) state.
///
/// # Example
///
/// ```rust
/// use ratchet::{Fsm, Guard, Transition, TransitionTable};
///
/// let table = TransitionTable::new(vec![Transition::new(0, 1)]);
/// let fsm = Fsm::new(&table).expect("valid table");
///
/// let at_start = Guard::new(|fsm: &Fsm| fsm.current_state() == 0);
///
/// assert!(at_start.check(&fsm));
/// ```
pub struct Guard {
    predicate: Box<dyn Fn(&Fsm) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a predicate over the machine handle.
    ///
    /// The predicate must be `Send + Sync` so tables holding guards can be
    /// shared across threads (the table is read-only data; see the crate
    /// docs for the handle's own threading contract).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Fsm) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against the machine handle.
    pub fn check(&self, fsm: &Fsm<'_>) -> bool {
        (self.predicate)(fsm)
    }
}

impl std::fmt::Debug for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Guard")
    }
}

/// Procedure invoked after a transition has been taken.
///
/// The procedure receives the machine handle *after* the state mutation, so
/// it observes the destination state. It may mutate the machine further
/// (e.g. through [`Fsm::set_state`]), which is the escape hatch the engine
/// deliberately leaves open.
///
/// # Example
///
/// ```rust
/// use ratchet::{Action, Fsm, Transition, TransitionTable};
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let observed = Arc::new(AtomicI32::new(-1));
/// let probe = Arc::clone(&observed);
/// let record = Action::new(move |fsm: &mut Fsm| {
///     probe.store(fsm.current_state(), Ordering::Relaxed);
/// });
///
/// let table = TransitionTable::new(vec![Transition::new(0, 1)]);
/// let mut fsm = Fsm::new(&table).expect("valid table");
/// record.call(&mut fsm);
///
/// assert_eq!(observed.load(Ordering::Relaxed), 0);
/// ```
pub struct Action {
    procedure: Box<dyn Fn(&mut Fsm) + Send + Sync>,
}

impl Action {
    /// Create an action from a procedure over the machine handle.
    pub fn new<F>(procedure: F) -> Self
    where
        F: Fn(&mut Fsm) + Send + Sync + 'static,
    {
        Action {
            procedure: Box::new(procedure),
        }
    }

    /// Invoke the action with the machine handle.
    pub fn call(&self, fsm: &mut Fsm<'_>) {
        (self.procedure)(fsm)
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Action")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Transition, TransitionTable};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn single_entry_table() -> TransitionTable {
        TransitionTable::new(vec![Transition::new(0, 1)])
    }

    #[test]
    fn guard_reads_current_state() {
        let table = single_entry_table();
        let mut fsm = Fsm::new(&table).unwrap();
        let at_start = Guard::new(|fsm: &Fsm| fsm.current_state() == 0);

        assert!(at_start.check(&fsm));
        fsm.set_state(7);
        assert!(!at_start.check(&fsm));
    }

    #[test]
    fn guard_is_deterministic() {
        let table = single_entry_table();
        let fsm = Fsm::new(&table).unwrap();
        let guard = Guard::new(|fsm: &Fsm| fsm.current_state() < 10);

        assert_eq!(guard.check(&fsm), guard.check(&fsm));
    }

    #[test]
    fn action_may_mutate_the_machine() {
        let table = single_entry_table();
        let mut fsm = Fsm::new(&table).unwrap();
        let reset = Action::new(|fsm: &mut Fsm| fsm.set_state(99));

        reset.call(&mut fsm);

        assert_eq!(fsm.current_state(), 99);
    }

    #[test]
    fn action_invocations_are_observable() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let bump = Action::new(move |_fsm: &mut Fsm| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let table = single_entry_table();
        let mut fsm = Fsm::new(&table).unwrap();
        bump.call(&mut fsm);
        bump.call(&mut fsm);

        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }
}

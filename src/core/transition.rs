//! Transition records and the ordered transition table.
//!
//! A table is an explicit-length, ordered sequence of transitions. Order is
//! load-bearing: `fire` scans from the first entry and takes the first
//! matching entry whose guard passes, continuing past entries whose guard
//! fails. Tables are plain data owned by the caller; the engine only ever
//! borrows them.

use super::guard::{Action, Guard};
use super::machine::Fsm;

/// Integer identifier of a state.
pub type StateId = i32;

/// Reserved non-state. No real state may use this value; construction
/// checks reject transitions that name it.
pub const INVALID_STATE: StateId = -1;

/// Upper bound on the number of transitions a table may hold. Tables longer
/// than this are rejected by [`Fsm::init`](crate::Fsm::init) and by the
/// heap construction path.
pub const MAX_TRANSITIONS: usize = 128;

/// A single guarded transition between two states.
///
/// Guard and action are optional: no guard means the transition always
/// fires when its origin matches, no action means nothing runs after the
/// state change.
///
/// # Example
///
/// ```rust
/// use ratchet::{Fsm, Transition};
///
/// let entry = Transition::new(0, 1)
///     .when(|fsm: &Fsm| fsm.current_state() == 0)
///     .then(|fsm: &mut Fsm| println!("now in {}", fsm.current_state()));
///
/// assert_eq!(entry.origin(), 0);
/// assert_eq!(entry.destination(), 1);
/// ```
#[derive(Debug)]
pub struct Transition {
    origin: StateId,
    guard: Option<Guard>,
    destination: StateId,
    action: Option<Action>,
}

impl Transition {
    /// Create a transition from `origin` to `destination` with no guard and
    /// no action.
    pub fn new(origin: StateId, destination: StateId) -> Self {
        Self {
            origin,
            guard: None,
            destination,
            action: None,
        }
    }

    /// Attach a guard predicate.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&Fsm) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Attach a pre-built guard.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Attach an action procedure.
    pub fn then<F>(self, procedure: F) -> Self
    where
        F: Fn(&mut Fsm) + Send + Sync + 'static,
    {
        self.action(Action::new(procedure))
    }

    /// Attach a pre-built action.
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// The state this transition leaves from.
    pub fn origin(&self) -> StateId {
        self.origin
    }

    /// The state this transition enters.
    pub fn destination(&self) -> StateId {
        self.destination
    }

    /// The guard, if one is attached.
    pub fn guard_ref(&self) -> Option<&Guard> {
        self.guard.as_ref()
    }

    /// The action, if one is attached.
    pub fn action_ref(&self) -> Option<&Action> {
        self.action.as_ref()
    }
}

/// Ordered sequence of transitions.
///
/// `TransitionTable::new` performs no validation; the engine validates on
/// [`Fsm::init`](crate::Fsm::init) and on heap construction, and the
/// [`TableBuilder`](crate::builder::TableBuilder) offers a checked
/// construction path with typed errors.
///
/// # Example
///
/// ```rust
/// use ratchet::{Fsm, FireOutcome, Transition, TransitionTable};
///
/// let table = TransitionTable::new(vec![
///     Transition::new(0, 1),
///     Transition::new(1, 0),
/// ]);
///
/// let mut fsm = Fsm::new(&table).expect("valid table");
/// assert_eq!(fsm.fire(), FireOutcome::Transitioned);
/// assert_eq!(fsm.current_state(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    /// Create a table from transitions in scan order.
    pub fn new(transitions: Vec<Transition>) -> Self {
        Self { transitions }
    }

    /// All transitions in scan order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of transitions in the table.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether the table holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl FromIterator<Transition> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_defaults_to_no_guard_no_action() {
        let entry = Transition::new(3, 4);

        assert_eq!(entry.origin(), 3);
        assert_eq!(entry.destination(), 4);
        assert!(entry.guard_ref().is_none());
        assert!(entry.action_ref().is_none());
    }

    #[test]
    fn fluent_attachment_sets_guard_and_action() {
        let entry = Transition::new(0, 1)
            .when(|_fsm: &Fsm| true)
            .then(|_fsm: &mut Fsm| {});

        assert!(entry.guard_ref().is_some());
        assert!(entry.action_ref().is_some());
    }

    #[test]
    fn table_preserves_scan_order() {
        let table = TransitionTable::new(vec![
            Transition::new(0, 1),
            Transition::new(0, 2),
            Transition::new(1, 0),
        ]);

        let origins: Vec<_> = table.transitions().iter().map(|t| t.origin()).collect();
        let destinations: Vec<_> = table
            .transitions()
            .iter()
            .map(|t| t.destination())
            .collect();

        assert_eq!(origins, vec![0, 0, 1]);
        assert_eq!(destinations, vec![1, 2, 0]);
    }

    #[test]
    fn table_collects_from_iterator() {
        let table: TransitionTable = (0..3).map(|i| Transition::new(i, i + 1)).collect();

        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
    }
}

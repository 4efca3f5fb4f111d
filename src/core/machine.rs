//! The state machine engine.
//!
//! An [`Fsm`] is a handle made for embedding by composition: a borrowed
//! transition table plus a current state, driven by repeated calls to
//! [`Fsm::fire`]. The engine never allocates, never suspends, and never
//! touches the table beyond reading it.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::transition::{StateId, TransitionTable, MAX_TRANSITIONS};

/// Result of a single [`Fsm::fire`] call.
///
/// `NoState` and `NoMatch` are deliberately distinct: the first means the
/// table has no path out of the current state at all (a likely
/// configuration bug worth surfacing by the embedding application), the
/// second is an ordinary tick on which every candidate guard said no.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireOutcome {
    /// A transition was taken; the state changed and any action ran.
    Transitioned,
    /// At least one entry matched the current state but every guard
    /// evaluated false.
    NoMatch,
    /// No entry in the table originates from the current state.
    NoState,
}

/// A live state machine: a borrowed transition table and a current state.
///
/// The table is owned by the caller and shared read-only; several machines
/// may run over the same table with fully independent state. Construct on
/// the stack with [`Fsm::new`], or on the heap through an allocator with
/// [`FsmBox::new`](crate::FsmBox::new).
///
/// # Example
///
/// A two-state toggle driven by a polling loop:
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
///
/// for _ in 0..4 {
///     assert_eq!(fsm.fire(), FireOutcome::Transitioned);
/// }
/// assert_eq!(fsm.current_state(), 0);
/// ```
pub struct Fsm<'t> {
    table: &'t TransitionTable,
    current: StateId,
}

impl<'t> Fsm<'t> {
    /// Create a machine bound to `table`, starting in the origin state of
    /// the table's first entry.
    ///
    /// Returns `None` when the table is empty or longer than
    /// [`MAX_TRANSITIONS`]. This is the caller-allocated lifecycle; the
    /// heap path with its stricter first-entry checks lives on
    /// [`FsmBox`](crate::FsmBox).
    pub fn new(table: &'t TransitionTable) -> Option<Self> {
        let first = table.transitions().first()?;
        if table.len() > MAX_TRANSITIONS {
            return None;
        }
        Some(Self {
            table,
            current: first.origin(),
        })
    }

    /// Re-initialize the machine over `table`, returning the number of
    /// transitions bound, or 0 on failure.
    ///
    /// Fails when the table is empty or longer than [`MAX_TRANSITIONS`].
    /// On failure the machine is left exactly as it was: an existing valid
    /// table/state binding survives a rejected re-init (no partial commit).
    /// On success the current state is reset to the origin of the new
    /// table's first entry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ratchet::{Fsm, Transition, TransitionTable};
    ///
    /// let first = TransitionTable::new(vec![Transition::new(0, 1)]);
    /// let second = TransitionTable::new(vec![
    ///     Transition::new(5, 6),
    ///     Transition::new(6, 5),
    /// ]);
    ///
    /// let mut fsm = Fsm::new(&first).expect("valid table");
    /// assert_eq!(fsm.init(&second), 2);
    /// assert_eq!(fsm.current_state(), 5);
    /// ```
    pub fn init(&mut self, table: &'t TransitionTable) -> usize {
        let Some(first) = table.transitions().first() else {
            return 0;
        };
        let count = table.len();
        if count > MAX_TRANSITIONS {
            return 0;
        }
        self.table = table;
        self.current = first.origin();
        count
    }

    /// The current state. No validation, no side effects.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Unconditionally overwrite the current state.
    ///
    /// The value is not checked against the table; this is the escape
    /// hatch for manual correction and for tests.
    pub fn set_state(&mut self, state: StateId) {
        self.current = state;
    }

    /// Evaluate the table once and transition if a guard allows it.
    ///
    /// Entries are scanned in table order. For each entry whose origin is
    /// the current state, the guard is consulted (an absent guard is
    /// unconditionally true). The first entry whose guard passes wins: the
    /// state is set to its destination and then its action, if any, runs
    /// with the machine already in the new state. Entries whose guard
    /// fails do not stop the scan; later entries with the same origin stay
    /// eligible on this same call.
    ///
    /// Completes in time bounded by the table length, with no suspension
    /// points; guards and actions run on the calling thread.
    pub fn fire(&mut self) -> FireOutcome {
        let table = self.table;
        let mut found = false;

        for transition in table.transitions() {
            if transition.origin() != self.current {
                continue;
            }
            found = true;

            if let Some(guard) = transition.guard_ref() {
                if !guard.check(self) {
                    continue;
                }
            }

            let from = self.current;
            let to = transition.destination();
            self.current = to;
            if let Some(action) = transition.action_ref() {
                action.call(self);
            }
            trace!(from, to, "transition taken");
            return FireOutcome::Transitioned;
        }

        if found {
            FireOutcome::NoMatch
        } else {
            debug!(state = self.current, "no transition from current state");
            FireOutcome::NoState
        }
    }
}

impl std::fmt::Debug for Fsm<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsm")
            .field("current_state", &self.current)
            .field("transitions", &self.table.len())
            .finish()
    }
}

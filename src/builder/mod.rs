//! Validated table construction.
//!
//! [`TransitionTable::new`] accepts any transitions without question and
//! leaves validation to the engine. This module is the checked alternative:
//! a fluent builder that enforces the table invariants up front and names
//! what is wrong, plus the [`transition_table!`](crate::transition_table)
//! literal macro.

pub mod error;
pub mod macros;

pub use error::BuildError;

use crate::core::{Transition, TransitionTable, INVALID_STATE, MAX_TRANSITIONS};

/// Fluent builder producing a validated [`TransitionTable`].
///
/// `build` enforces the table invariants: at least one transition, no more
/// than [`MAX_TRANSITIONS`], a guarded first entry, and no transition
/// naming the reserved invalid state.
///
/// # Example
///
/// ```rust
/// use ratchet::builder::TableBuilder;
/// use ratchet::{Fsm, Transition};
///
/// let table = TableBuilder::new()
///     .transition(Transition::new(0, 1).when(|fsm: &Fsm| fsm.current_state() == 0))
///     .transition(Transition::new(1, 0))
///     .build()
///     .expect("table invariants hold");
///
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Default)]
pub struct TableBuilder {
    transitions: Vec<Transition>,
}

impl TableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append one transition in scan order.
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Append multiple transitions in scan order.
    pub fn transitions<I>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = Transition>,
    {
        self.transitions.extend(transitions);
        self
    }

    /// Validate the table invariants and produce the table.
    pub fn build(self) -> Result<TransitionTable, BuildError> {
        let first = self.transitions.first().ok_or(BuildError::NoTransitions)?;

        if self.transitions.len() > MAX_TRANSITIONS {
            return Err(BuildError::TooManyTransitions {
                count: self.transitions.len(),
                max: MAX_TRANSITIONS,
            });
        }

        if first.guard_ref().is_none() {
            return Err(BuildError::UnguardedFirstTransition);
        }

        for (index, transition) in self.transitions.iter().enumerate() {
            if transition.origin() == INVALID_STATE {
                return Err(BuildError::ReservedOrigin { index });
            }
            if transition.destination() == INVALID_STATE {
                return Err(BuildError::ReservedDestination { index });
            }
        }

        Ok(TransitionTable::new(self.transitions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Fsm;

    #[test]
    fn build_requires_at_least_one_transition() {
        let result = TableBuilder::new().build();

        assert!(matches!(result, Err(BuildError::NoTransitions)));
    }

    #[test]
    fn build_enforces_the_transition_limit() {
        let result = TableBuilder::new()
            .transitions(
                (0..=MAX_TRANSITIONS as i32)
                    .map(|i| Transition::new(i, i + 1).when(|_fsm: &Fsm| true)),
            )
            .build();

        assert!(matches!(
            result,
            Err(BuildError::TooManyTransitions { count, max })
                if count == MAX_TRANSITIONS + 1 && max == MAX_TRANSITIONS
        ));
    }

    #[test]
    fn build_requires_a_guarded_first_entry() {
        let result = TableBuilder::new()
            .transition(Transition::new(0, 1))
            .build();

        assert!(matches!(result, Err(BuildError::UnguardedFirstTransition)));
    }

    #[test]
    fn build_rejects_reserved_origins() {
        let result = TableBuilder::new()
            .transition(Transition::new(0, 1).when(|_fsm: &Fsm| true))
            .transition(Transition::new(INVALID_STATE, 2))
            .build();

        assert!(matches!(result, Err(BuildError::ReservedOrigin { index: 1 })));
    }

    #[test]
    fn build_rejects_reserved_destinations() {
        let result = TableBuilder::new()
            .transition(Transition::new(0, INVALID_STATE).when(|_fsm: &Fsm| true))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::ReservedDestination { index: 0 })
        ));
    }

    #[test]
    fn built_table_drives_the_engine() {
        let table = TableBuilder::new()
            .transition(Transition::new(3, 4).when(|_fsm: &Fsm| true))
            .transition(Transition::new(4, 3))
            .build()
            .unwrap();

        let fsm = Fsm::new(&table).unwrap();

        assert_eq!(fsm.current_state(), 3);
    }
}

//! Macros for table literals.

/// Build a [`TransitionTable`](crate::TransitionTable) from entry literals.
///
/// Each entry is `origin => destination`, optionally followed by
/// `, when <guard closure>` and `, then <action closure>`; entries are
/// separated by `;` and kept in scan order. Expands to the unchecked
/// [`TransitionTable::new`](crate::TransitionTable::new) path; run the
/// result through the engine (or [`TableBuilder`](crate::builder::TableBuilder))
/// for validation.
///
/// # Example
///
/// ```rust
/// use ratchet::{transition_table, FireOutcome, Fsm};
///
/// let table = transition_table! {
///     0 => 1, when |fsm: &Fsm| fsm.current_state() == 0;
///     1 => 2, then |fsm: &mut Fsm| assert_eq!(fsm.current_state(), 2);
///     2 => 0;
/// };
///
/// let mut fsm = Fsm::new(&table).expect("valid table");
/// assert_eq!(fsm.fire(), FireOutcome::Transitioned);
/// assert_eq!(fsm.fire(), FireOutcome::Transitioned);
/// assert_eq!(fsm.current_state(), 2);
/// ```
#[macro_export]
macro_rules! transition_table {
    ($($origin:expr => $destination:expr $(, when $guard:expr)? $(, then $action:expr)?);* $(;)?) => {
        $crate::core::TransitionTable::new(::std::vec![
            $(
                $crate::core::Transition::new($origin, $destination)
                    $(.when($guard))?
                    $(.then($action))?
            ),*
        ])
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{FireOutcome, Fsm};

    #[test]
    fn macro_builds_entries_in_scan_order() {
        let table = transition_table! {
            0 => 1;
            1 => 2;
            2 => 0
        };

        assert_eq!(table.len(), 3);
        assert_eq!(table.transitions()[1].origin(), 1);
        assert_eq!(table.transitions()[1].destination(), 2);
    }

    #[test]
    fn macro_attaches_guards_and_actions() {
        let table = transition_table! {
            0 => 1, when |fsm: &Fsm| fsm.current_state() == 0, then |fsm: &mut Fsm| fsm.set_state(9);
            1 => 0
        };

        assert!(table.transitions()[0].guard_ref().is_some());
        assert!(table.transitions()[0].action_ref().is_some());
        assert!(table.transitions()[1].guard_ref().is_none());

        let mut fsm = Fsm::new(&table).unwrap();
        assert_eq!(fsm.fire(), FireOutcome::Transitioned);
        assert_eq!(fsm.current_state(), 9);
    }

    #[test]
    fn macro_accepts_an_empty_body() {
        let table = transition_table! {};

        assert!(table.is_empty());
        assert!(Fsm::new(&table).is_none());
    }
}

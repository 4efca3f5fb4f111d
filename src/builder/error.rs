//! Build errors for the validated table construction path.

use thiserror::Error;

/// Errors reported by [`TableBuilder::build`](crate::builder::TableBuilder::build).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Table has {count} transitions, the limit is {max}")]
    TooManyTransitions { count: usize, max: usize },

    #[error("First transition has no guard. Attach one with .when() or .guard()")]
    UnguardedFirstTransition,

    #[error("Transition {index} uses the reserved invalid state as its origin")]
    ReservedOrigin { index: usize },

    #[error("Transition {index} uses the reserved invalid state as its destination")]
    ReservedDestination { index: usize },
}

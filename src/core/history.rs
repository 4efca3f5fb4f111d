//! Caller-driven fire diagnostics.
//!
//! The engine itself keeps no record of past fires. Embedders driving a
//! polling loop can keep a [`FireLog`] alongside the machine to spot dead
//! states and reconstruct the path taken. The log is immutable: `record`
//! returns a new log and leaves the old one untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::machine::FireOutcome;
use super::transition::StateId;

/// Record of a single fire call.
///
/// For a [`FireOutcome::Transitioned`] record, `from` and `to` differ (or
/// reflect whatever the action left behind); for `NoMatch` and `NoState`
/// the state did not move and `from == to`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FireRecord {
    /// State before the fire call.
    pub from: StateId,
    /// State after the fire call.
    pub to: StateId,
    /// What the fire call reported.
    pub outcome: FireOutcome,
    /// When the fire call happened.
    pub at: DateTime<Utc>,
}

/// Ordered log of fire calls.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use ratchet::{FireLog, FireOutcome, FireRecord, Fsm, Transition, TransitionTable};
///
/// let table = TransitionTable::new(vec![Transition::new(0, 1)]);
/// let mut fsm = Fsm::new(&table).expect("valid table");
/// let mut log = FireLog::new();
///
/// for _ in 0..2 {
///     let from = fsm.current_state();
///     let outcome = fsm.fire();
///     log = log.record(FireRecord {
///         from,
///         to: fsm.current_state(),
///         outcome,
///         at: Utc::now(),
///     });
/// }
///
/// assert_eq!(log.path(), vec![0, 1]);
/// assert_eq!(log.dead_states(), vec![1]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FireLog {
    records: Vec<FireRecord>,
}

impl FireLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning a new log. The existing log is unchanged.
    pub fn record(&self, record: FireRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// States actually visited: the first record's starting state followed
    /// by the landing state of every transitioned record. Empty for an
    /// empty log.
    pub fn path(&self) -> Vec<StateId> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        for record in &self.records {
            if record.outcome == FireOutcome::Transitioned {
                path.push(record.to);
            }
        }
        path
    }

    /// States that produced [`FireOutcome::NoState`], in first-seen order.
    ///
    /// A non-empty result usually means the table is missing transitions:
    /// the machine reached a state the configuration has no path out of.
    pub fn dead_states(&self) -> Vec<StateId> {
        let mut dead = Vec::new();
        for record in &self.records {
            if record.outcome == FireOutcome::NoState && !dead.contains(&record.from) {
                dead.push(record.from);
            }
        }
        dead
    }

    /// Elapsed time between the first and last record, `None` for an empty
    /// log.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.at.signed_duration_since(first.at).to_std().ok()
    }

    /// All records in order.
    pub fn records(&self) -> &[FireRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: StateId, to: StateId, outcome: FireOutcome) -> FireRecord {
        FireRecord {
            from,
            to,
            outcome,
            at: Utc::now(),
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log = FireLog::new();

        assert!(log.records().is_empty());
        assert!(log.path().is_empty());
        assert!(log.dead_states().is_empty());
        assert!(log.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let log = FireLog::new();
        let grown = log.record(record(0, 1, FireOutcome::Transitioned));

        assert_eq!(log.records().len(), 0);
        assert_eq!(grown.records().len(), 1);
    }

    #[test]
    fn path_follows_transitioned_records_only() {
        let log = FireLog::new()
            .record(record(0, 1, FireOutcome::Transitioned))
            .record(record(1, 1, FireOutcome::NoMatch))
            .record(record(1, 2, FireOutcome::Transitioned));

        assert_eq!(log.path(), vec![0, 1, 2]);
    }

    #[test]
    fn dead_states_deduplicate_in_first_seen_order() {
        let log = FireLog::new()
            .record(record(3, 3, FireOutcome::NoState))
            .record(record(3, 3, FireOutcome::NoState))
            .record(record(7, 7, FireOutcome::NoState));

        assert_eq!(log.dead_states(), vec![3, 7]);
    }

    #[test]
    fn duration_spans_first_to_last_record() {
        let start = Utc::now();
        let later = start + chrono::Duration::milliseconds(250);

        let log = FireLog::new()
            .record(FireRecord {
                from: 0,
                to: 1,
                outcome: FireOutcome::Transitioned,
                at: start,
            })
            .record(FireRecord {
                from: 1,
                to: 2,
                outcome: FireOutcome::Transitioned,
                at: later,
            });

        assert_eq!(log.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn log_round_trips_through_json() {
        let log = FireLog::new()
            .record(record(0, 1, FireOutcome::Transitioned))
            .record(record(1, 1, FireOutcome::NoState));

        let json = serde_json::to_string(&log).unwrap();
        let back: FireLog = serde_json::from_str(&json).unwrap();

        assert_eq!(back.records(), log.records());
    }
}

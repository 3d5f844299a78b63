use thiserror::Error;

use crate::deadline::{Priority, Severity, Status};

/// Reasons a single candidate cannot be normalized.
///
/// These never abort a batch: the normalizer logs and skips the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("candidate has an empty {0}")]
    EmptyField(&'static str),

    #[error("unparseable {field}: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

/// A unified record that breaks one of the derivation rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("severity {severity:?} does not mirror priority {priority:?}")]
    SeverityMismatch { priority: Priority, severity: Severity },

    #[error("terminal status {status:?} carries priority {priority:?}, expected LOW")]
    TerminalPriority { status: Status, priority: Priority },

    #[error("completion fields set on non-terminal status {0:?}")]
    CompletionOnOpen(Status),

    #[error("stale classification: have {have:?}, expected {expected:?}")]
    StaleClassification {
        have: (Status, Priority),
        expected: (Status, Priority),
    },
}

//! Deadline unification and risk scoring.
//!
//! Pure computation over already-fetched candidates. Every entry point takes
//! `now` explicitly; nothing here reads the system clock or does I/O.

pub mod candidate;
pub mod classify;
pub mod deadline;
mod error;
pub mod merge;
pub mod next_step;
pub mod normalize;
pub mod pipeline;
pub mod score;
pub mod summary;

pub use candidate::{
    CandidateSet, CourtCandidate, DomainCandidate, HousingCandidate, LimitationCandidate,
    ManualCandidate,
};
pub use classify::{Classification, classify, classify_all, days_remaining};
pub use deadline::{Category, DeadlineSource, Priority, Severity, Status, UnifiedDeadline};
pub use error::{InvariantViolation, NormalizeError};
pub use merge::{deadline_order, merge};
pub use next_step::{NextStep, StepPriority, synthesize};
pub use normalize::{normalize, normalize_one};
pub use pipeline::{Evaluation, evaluate};
pub use score::score;
pub use summary::DeadlineSummary;

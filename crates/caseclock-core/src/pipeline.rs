//! One evaluation: normalise → classify → merge → score → next steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::candidate::{CandidateSet, DomainCandidate};
use crate::classify::classify_all;
use crate::deadline::UnifiedDeadline;
use crate::merge::merge;
use crate::next_step::{NextStep, synthesize};
use crate::normalize::normalize;
use crate::score::score;
use crate::summary::DeadlineSummary;

/// Everything one evaluation produces, all relative to `evaluated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub evaluated_at: DateTime<Utc>,
    pub deadlines: Vec<UnifiedDeadline>,
    pub risk_score: u8,
    pub next_steps: Vec<NextStep>,
    pub summary: DeadlineSummary,
}

impl Evaluation {
    /// Whether any deadline survived normalisation.
    ///
    /// A score of 100 with no deadlines is not evidence of a healthy case.
    pub fn has_deadlines(&self) -> bool {
        !self.deadlines.is_empty()
    }
}

/// Run the whole pipeline against a single captured `now`.
///
/// Domain lists are merged in court, housing, limitation, manual order; that
/// order decides ties. Identical inputs and `now` give identical output.
pub fn evaluate(candidates: CandidateSet, now: DateTime<Utc>) -> Evaluation {
    let CandidateSet {
        court,
        housing,
        limitation,
        manual,
    } = candidates;

    let mut lists = [
        normalize(court.into_iter().map(DomainCandidate::Court), now),
        normalize(housing.into_iter().map(DomainCandidate::Housing), now),
        normalize(limitation.into_iter().map(DomainCandidate::Limitation), now),
        normalize(manual.into_iter().map(DomainCandidate::Manual), now),
    ];
    for list in &mut lists {
        classify_all(list, now);
    }

    let deadlines = merge(lists);
    debug_assert!(
        deadlines.iter().all(|d| d.check_invariants(now).is_ok()),
        "classified deadlines must satisfy derivation invariants"
    );

    let risk_score = score(&deadlines);
    let next_steps = synthesize(&deadlines);
    let summary = DeadlineSummary::from_deadlines(&deadlines);

    debug!(
        deadlines = deadlines.len(),
        overdue = summary.overdue,
        risk_score,
        next_steps = next_steps.len(),
        "evaluated deadlines"
    );

    Evaluation {
        evaluated_at: now,
        deadlines,
        risk_score,
        next_steps,
        summary,
    }
}

//! The unified deadline record and its closed vocabularies.
//!
//! Every domain's urgency and status strings end up as one of the enums
//! below. Only [`crate::normalize`] translates domain-native strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{Classification, classify};
use crate::error::InvariantViolation;

/// Origin domain of a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Court,
    Housing,
    Limitation,
    Manual,
}

impl Category {
    /// All categories, in the order their lists are merged.
    pub const ALL: [Category; 4] = [
        Category::Court,
        Category::Housing,
        Category::Limitation,
        Category::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Court => "court",
            Self::Housing => "housing",
            Self::Limitation => "limitation",
            Self::Manual => "manual",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: CRITICAL(0) < HIGH(1) < MEDIUM(2) < LOW(3).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// Four-level severity, kept alongside [`Priority`] for consumers that bind
/// to the older vocabulary. Always equal to the record's priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl From<Priority> for Severity {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Critical => Self::Critical,
            Priority::High => Self::High,
            Priority::Medium => Self::Medium,
            Priority::Low => Self::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Upcoming,
    DueToday,
    DueSoon,
    Overdue,
    Completed,
    Cancelled,
}

impl Status {
    /// Terminal statuses are never reclassified from the clock.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "UPCOMING",
            Self::DueToday => "DUE_TODAY",
            Self::DueSoon => "DUE_SOON",
            Self::Overdue => "OVERDUE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Provenance of a deadline. Informational; never used in scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeadlineSource {
    AutoCalculated,
    Manual,
    CourtOrder,
}

/// A deadline from any domain, in the one schema the engine reasons about.
///
/// Materialized fresh on every evaluation; `days_remaining`, `status` and
/// `priority` are only meaningful relative to the `now` of that evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedDeadline {
    pub id: String,
    /// Empty for domain-global deadlines.
    pub case_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    pub due_date: DateTime<Utc>,
    pub days_remaining: i64,
    pub priority: Priority,
    pub status: Status,
    pub severity: Severity,
    pub source: DeadlineSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UnifiedDeadline {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Overwrite the derived fields with a classifier result.
    ///
    /// Severity is rewritten from priority so the two never drift apart.
    pub fn apply(&mut self, c: Classification) {
        self.status = c.status;
        self.priority = c.priority;
        self.severity = c.priority.into();
        self.days_remaining = c.days_remaining;
    }

    /// Check the derivation rules against the `now` this record was classified at.
    pub fn check_invariants(&self, now: DateTime<Utc>) -> Result<(), InvariantViolation> {
        if Severity::from(self.priority) != self.severity {
            return Err(InvariantViolation::SeverityMismatch {
                priority: self.priority,
                severity: self.severity,
            });
        }

        if self.is_terminal() {
            if self.priority != Priority::Low {
                return Err(InvariantViolation::TerminalPriority {
                    status: self.status,
                    priority: self.priority,
                });
            }
            return Ok(());
        }

        if self.completed_at.is_some() || self.completed_by.is_some() {
            return Err(InvariantViolation::CompletionOnOpen(self.status));
        }

        let expected = classify(self.due_date, now, None);
        if (expected.status, expected.priority) != (self.status, self.priority) {
            return Err(InvariantViolation::StaleClassification {
                have: (self.status, self.priority),
                expected: (expected.status, expected.priority),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    pub(crate) fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 16, 9, 30, 0).unwrap()
    }

    /// A classified open deadline due `days` from [`fixed_now`].
    pub(crate) fn deadline(id: &str, days: i64) -> UnifiedDeadline {
        let now = fixed_now();
        let mut d = UnifiedDeadline {
            id: id.into(),
            case_id: "case-1".into(),
            title: format!("Deadline {id}"),
            description: None,
            category: Category::Manual,
            due_date: now + Duration::days(days),
            days_remaining: 0,
            priority: Priority::Medium,
            status: Status::Upcoming,
            severity: Severity::Medium,
            source: DeadlineSource::Manual,
            source_rule: None,
            completed_at: None,
            completed_by: None,
            notes: None,
        };
        d.apply(classify(d.due_date, now, None));
        d
    }

    #[test]
    fn severity_mirrors_every_priority() {
        for (p, s) in [
            (Priority::Critical, Severity::Critical),
            (Priority::High, Severity::High),
            (Priority::Medium, Severity::Medium),
            (Priority::Low, Severity::Low),
        ] {
            assert_eq!(Severity::from(p), s);
        }
    }

    #[test]
    fn priority_ranks_ascend() {
        assert!(Priority::Critical.rank() < Priority::High.rank());
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn only_completed_and_cancelled_are_terminal() {
        assert!(Status::Completed.is_terminal());
        assert!(Status::Cancelled.is_terminal());
        assert!(!Status::Overdue.is_terminal());
        assert!(!Status::DueToday.is_terminal());
    }

    #[test]
    fn enums_serialize_screaming_snake() {
        assert_eq!(serde_json::to_string(&Status::DueSoon).unwrap(), "\"DUE_SOON\"");
        assert_eq!(
            serde_json::to_string(&DeadlineSource::CourtOrder).unwrap(),
            "\"COURT_ORDER\""
        );
        assert_eq!(serde_json::to_string(&Category::Housing).unwrap(), "\"HOUSING\"");
    }

    #[test]
    fn classified_deadline_passes_invariants() {
        let d = deadline("a", 2);
        assert_eq!(d.status, Status::DueSoon);
        assert!(d.check_invariants(fixed_now()).is_ok());
    }

    #[test]
    fn detects_severity_drift() {
        let mut d = deadline("a", 2);
        d.severity = Severity::Low;
        assert!(matches!(
            d.check_invariants(fixed_now()),
            Err(InvariantViolation::SeverityMismatch { .. })
        ));
    }

    #[test]
    fn detects_stale_classification() {
        let d = deadline("a", 2);
        let later = fixed_now() + Duration::days(5);
        assert!(matches!(
            d.check_invariants(later),
            Err(InvariantViolation::StaleClassification { .. })
        ));
    }

    #[test]
    fn detects_completion_on_open_record() {
        let mut d = deadline("a", 10);
        d.completed_by = Some("jsmith".into());
        assert_eq!(
            d.check_invariants(fixed_now()),
            Err(InvariantViolation::CompletionOnOpen(Status::Upcoming))
        );
    }

    #[test]
    fn serializes_camel_case_and_omits_absent_options() {
        let d = deadline("a", 10);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["caseId"], "case-1");
        assert_eq!(json["daysRemaining"], 10);
        assert_eq!(json["status"], "UPCOMING");
        assert!(json.get("completedAt").is_none());
        assert!(json.get("sourceRule").is_none());
    }
}

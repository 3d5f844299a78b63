//! Normalisation of domain candidates into [`UnifiedDeadline`] records.
//!
//! This is the single translation boundary for domain vocabularies: nothing
//! downstream ever looks at an upstream urgency or status string.
//!
//! The status and priority produced here are the domain's own view. For open
//! deadlines they are provisional and get replaced by [`crate::classify`];
//! only terminal statuses survive classification.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

use crate::candidate::{
    CourtCandidate, DomainCandidate, HousingCandidate, LimitationCandidate, ManualCandidate,
};
use crate::classify::days_remaining;
use crate::deadline::{Category, DeadlineSource, Priority, Status, UnifiedDeadline};
use crate::error::NormalizeError;

/// Fixed per-domain lookup tables.
///
/// Matching ignores case, surrounding whitespace, and treats `-`, `_` and
/// spaces as the same separator.
pub mod vocab {
    use crate::deadline::{Category, DeadlineSource, Priority, Status};

    fn key(label: &str) -> String {
        label.trim().to_ascii_lowercase().replace(['-', ' '], "_")
    }

    pub fn housing_priority(label: &str) -> Option<Priority> {
        match key(label).as_str() {
            "urgent" => Some(Priority::Critical),
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn housing_status(label: &str) -> Option<Status> {
        match key(label).as_str() {
            "upcoming" => Some(Status::Upcoming),
            "due_today" => Some(Status::DueToday),
            "overdue" => Some(Status::Overdue),
            "passed" => Some(Status::Completed),
            _ => None,
        }
    }

    pub fn court_severity(label: &str) -> Option<Priority> {
        match key(label).as_str() {
            "critical" | "urgent" => Some(Priority::Critical),
            "high" => Some(Priority::High),
            "medium" | "normal" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Court statuses only matter when terminal; anything else is open.
    pub fn court_status(label: &str) -> Option<Status> {
        match key(label).as_str() {
            "completed" | "complete" | "done" | "complied" => Some(Status::Completed),
            "cancelled" | "canceled" | "vacated" | "withdrawn" => Some(Status::Cancelled),
            _ => None,
        }
    }

    pub fn court_source(label: &str) -> DeadlineSource {
        match key(label).as_str() {
            "court_order" => DeadlineSource::CourtOrder,
            "manual" => DeadlineSource::Manual,
            _ => DeadlineSource::AutoCalculated,
        }
    }

    /// Completion vocabulary shared by manual and limitation records.
    pub fn record_status(label: &str) -> Option<Status> {
        match key(label).as_str() {
            "completed" | "complete" | "done" => Some(Status::Completed),
            "cancelled" | "canceled" => Some(Status::Cancelled),
            _ => None,
        }
    }

    /// Category label on a manual deadline. Unknown labels are `None`.
    pub fn category(label: &str) -> Option<Category> {
        match key(label).as_str() {
            "court" | "cpr" => Some(Category::Court),
            "housing" | "disrepair" => Some(Category::Housing),
            "limitation" => Some(Category::Limitation),
            "manual" => Some(Category::Manual),
            _ => None,
        }
    }
}

/// Normalise a batch of candidates.
///
/// Total: a candidate that cannot be normalised is logged and skipped, and
/// the rest of the batch is still returned in input order.
pub fn normalize<I>(candidates: I, now: DateTime<Utc>) -> Vec<UnifiedDeadline>
where
    I: IntoIterator<Item = DomainCandidate>,
{
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let category = candidate.category();
            let id = candidate.id().to_string();
            match normalize_one(candidate, now) {
                Ok(d) => Some(d),
                Err(e) => {
                    warn!(
                        category = category.as_str(),
                        id = %id,
                        error = %e,
                        "skipping malformed deadline candidate"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Normalise one candidate, or explain why it cannot be.
pub fn normalize_one(
    candidate: DomainCandidate,
    now: DateTime<Utc>,
) -> Result<UnifiedDeadline, NormalizeError> {
    match candidate {
        DomainCandidate::Court(c) => from_court(c, now),
        DomainCandidate::Housing(c) => from_housing(c, now),
        DomainCandidate::Limitation(c) => from_limitation(c, now),
        DomainCandidate::Manual(c) => from_manual(c, now),
    }
}

fn from_housing(c: HousingCandidate, now: DateTime<Utc>) -> Result<UnifiedDeadline, NormalizeError> {
    require("id", &c.id)?;
    require("name", &c.name)?;
    let due_date = parse_timestamp("deadlineDate", &c.deadline_date)?;

    let status = c
        .status
        .as_deref()
        .and_then(vocab::housing_status)
        .unwrap_or(Status::Upcoming);
    let priority = c
        .priority
        .as_deref()
        .and_then(vocab::housing_priority)
        .unwrap_or(Priority::Medium);

    Ok(UnifiedDeadline {
        id: c.id,
        case_id: c.case_id,
        title: c.name,
        description: non_empty(c.description),
        category: Category::Housing,
        due_date,
        days_remaining: days_remaining(due_date, now),
        priority,
        status,
        severity: priority.into(),
        source: DeadlineSource::AutoCalculated,
        source_rule: non_empty(c.source),
        completed_at: None,
        completed_by: None,
        notes: non_empty(c.action_required),
    })
}

fn from_court(c: CourtCandidate, now: DateTime<Utc>) -> Result<UnifiedDeadline, NormalizeError> {
    require("id", &c.id)?;
    require("label", &c.label)?;
    let due_date = parse_timestamp("dueDate", &c.due_date)?;
    let completed_at = parse_optional_timestamp("completedAt", c.completed_at.as_deref())?;

    let stated = c.status.as_deref().and_then(vocab::court_status);
    let status = match (stated, completed_at, c.is_overdue) {
        (Some(s), _, _) => s,
        (None, Some(_), _) => Status::Completed,
        (None, None, Some(true)) => Status::Overdue,
        (None, None, _) => Status::Upcoming,
    };
    let priority = c
        .severity
        .as_deref()
        .and_then(vocab::court_severity)
        .unwrap_or(Priority::Medium);
    let (completed_at, completed_by) = completion(status, completed_at, c.completed_by);

    Ok(UnifiedDeadline {
        id: c.id,
        case_id: c.case_id,
        title: c.label,
        description: non_empty(c.description),
        category: Category::Court,
        due_date,
        days_remaining: days_remaining(due_date, now),
        priority,
        status,
        severity: priority.into(),
        source: c
            .source
            .as_deref()
            .map(vocab::court_source)
            .unwrap_or(DeadlineSource::AutoCalculated),
        source_rule: non_empty(c.cpr_rule),
        completed_at,
        completed_by,
        notes: non_empty(c.notes),
    })
}

fn from_manual(c: ManualCandidate, now: DateTime<Utc>) -> Result<UnifiedDeadline, NormalizeError> {
    require("id", &c.id)?;
    require("title", &c.title)?;
    let due_date = parse_timestamp("dueDate", &c.due_date)?;
    let completed_at = parse_optional_timestamp("completedAt", c.completed_at.as_deref())?;
    let status = record_status(c.status.as_deref(), completed_at);
    let (completed_at, completed_by) = completion(status, completed_at, c.completed_by);

    Ok(UnifiedDeadline {
        id: c.id,
        case_id: c.case_id,
        title: c.title,
        description: non_empty(c.description),
        category: c
            .category
            .as_deref()
            .and_then(vocab::category)
            .unwrap_or(Category::Manual),
        due_date,
        days_remaining: days_remaining(due_date, now),
        priority: Priority::Medium,
        status,
        severity: Priority::Medium.into(),
        source: DeadlineSource::Manual,
        source_rule: non_empty(c.source_rule),
        completed_at,
        completed_by,
        notes: non_empty(c.notes),
    })
}

fn from_limitation(
    c: LimitationCandidate,
    now: DateTime<Utc>,
) -> Result<UnifiedDeadline, NormalizeError> {
    require("id", &c.id)?;
    require("label", &c.label)?;
    let due_date = parse_timestamp("limitationDate", &c.limitation_date)?;
    let completed_at = parse_optional_timestamp("completedAt", c.completed_at.as_deref())?;
    let status = record_status(c.status.as_deref(), completed_at);
    let (completed_at, completed_by) = completion(status, completed_at, c.completed_by);

    Ok(UnifiedDeadline {
        id: c.id,
        case_id: c.case_id,
        title: c.label,
        description: non_empty(c.description),
        category: Category::Limitation,
        due_date,
        days_remaining: days_remaining(due_date, now),
        priority: Priority::Medium,
        status,
        severity: Priority::Medium.into(),
        source: DeadlineSource::AutoCalculated,
        source_rule: non_empty(c.basis),
        completed_at,
        completed_by,
        notes: non_empty(c.notes),
    })
}

// ── Helpers ──

fn record_status(label: Option<&str>, completed_at: Option<DateTime<Utc>>) -> Status {
    match (label.and_then(vocab::record_status), completed_at) {
        (Some(s), _) => s,
        (None, Some(_)) => Status::Completed,
        (None, None) => Status::Upcoming,
    }
}

/// Completion fields only travel with terminal records.
fn completion(
    status: Status,
    completed_at: Option<DateTime<Utc>>,
    completed_by: Option<String>,
) -> (Option<DateTime<Utc>>, Option<String>) {
    if status.is_terminal() {
        (completed_at, non_empty(completed_by))
    } else {
        (None, None)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), NormalizeError> {
    if value.trim().is_empty() {
        return Err(NormalizeError::EmptyField(field));
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_optional_timestamp(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, NormalizeError> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_timestamp(field, v).map(Some),
        _ => Ok(None),
    }
}

/// Parse an upstream date.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DD[T ]HH:MM:SS[.fff]` taken as UTC, or
/// a bare `YYYY-MM-DD` taken as midnight UTC.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, NormalizeError> {
    let s = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }

    Err(NormalizeError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::tests::fixed_now;
    use chrono::TimeZone;

    fn housing(id: &str, date: &str, priority: &str, status: &str) -> DomainCandidate {
        DomainCandidate::Housing(HousingCandidate {
            id: id.into(),
            name: format!("Housing {id}"),
            deadline_date: date.into(),
            priority: Some(priority.into()),
            status: Some(status.into()),
            source: Some("awaabs_law".into()),
            action_required: Some("Inspect property".into()),
            ..Default::default()
        })
    }

    fn manual(id: &str, date: &str) -> ManualCandidate {
        ManualCandidate {
            id: id.into(),
            case_id: "case-1".into(),
            title: format!("Manual {id}"),
            due_date: date.into(),
            ..Default::default()
        }
    }

    #[test]
    fn housing_vocabulary_maps_to_canonical_enums() {
        let d = normalize_one(housing("h-1", "2026-03-11", "urgent", "overdue"), fixed_now())
            .unwrap();
        assert_eq!(d.category, Category::Housing);
        assert_eq!(d.priority, Priority::Critical);
        assert_eq!(d.status, Status::Overdue);
        assert_eq!(d.title, "Housing h-1");
        assert_eq!(d.source_rule.as_deref(), Some("awaabs_law"));
        assert_eq!(d.notes.as_deref(), Some("Inspect property"));

        let passed =
            normalize_one(housing("h-2", "2026-03-11", "low", "passed"), fixed_now()).unwrap();
        assert_eq!(passed.status, Status::Completed);
    }

    #[test]
    fn vocabulary_ignores_case_and_separators() {
        assert_eq!(vocab::housing_status("Due-Today"), Some(Status::DueToday));
        assert_eq!(vocab::housing_status(" due today "), Some(Status::DueToday));
        assert_eq!(vocab::court_severity("HIGH"), Some(Priority::High));
        assert_eq!(vocab::court_source("Court-Order"), DeadlineSource::CourtOrder);
        assert_eq!(vocab::housing_priority("whenever"), None);
    }

    #[test]
    fn court_completion_is_terminal() {
        let c = CourtCandidate {
            id: "c-1".into(),
            case_id: "case-1".into(),
            label: "Serve witness statements".into(),
            due_date: "2026-02-01T12:00:00Z".into(),
            severity: Some("CRITICAL".into()),
            is_overdue: Some(true),
            completed_at: Some("2026-01-30T10:00:00Z".into()),
            completed_by: Some("jsmith".into()),
            cpr_rule: Some("CPR 32.4".into()),
            source: Some("court_order".into()),
            ..Default::default()
        };
        let d = normalize_one(DomainCandidate::Court(c), fixed_now()).unwrap();
        assert_eq!(d.status, Status::Completed);
        assert_eq!(d.source, DeadlineSource::CourtOrder);
        assert_eq!(d.source_rule.as_deref(), Some("CPR 32.4"));
        assert_eq!(
            d.completed_at,
            Some(Utc.with_ymd_and_hms(2026, 1, 30, 10, 0, 0).unwrap())
        );
        assert_eq!(d.completed_by.as_deref(), Some("jsmith"));
    }

    #[test]
    fn court_vacated_is_cancelled_and_overdue_flag_is_provisional() {
        let base = CourtCandidate {
            id: "c-2".into(),
            label: "Hearing".into(),
            due_date: "2026-03-01".into(),
            ..Default::default()
        };
        let vacated = CourtCandidate {
            status: Some("vacated".into()),
            ..base.clone()
        };
        let flagged = CourtCandidate {
            is_overdue: Some(true),
            ..base
        };
        let d = normalize_one(DomainCandidate::Court(vacated), fixed_now()).unwrap();
        assert_eq!(d.status, Status::Cancelled);
        let d = normalize_one(DomainCandidate::Court(flagged), fixed_now()).unwrap();
        assert_eq!(d.status, Status::Overdue);
        assert_eq!(d.source, DeadlineSource::AutoCalculated);
    }

    #[test]
    fn manual_category_defaults_to_manual() {
        let unknown = ManualCandidate {
            category: Some("tax".into()),
            ..manual("m-1", "2026-04-01")
        };
        let d = normalize_one(DomainCandidate::Manual(unknown), fixed_now()).unwrap();
        assert_eq!(d.category, Category::Manual);
        assert_eq!(d.source, DeadlineSource::Manual);

        let missing = manual("m-2", "2026-04-01");
        let d = normalize_one(DomainCandidate::Manual(missing), fixed_now()).unwrap();
        assert_eq!(d.category, Category::Manual);

        let court = ManualCandidate {
            category: Some("COURT".into()),
            ..manual("m-3", "2026-04-01")
        };
        let d = normalize_one(DomainCandidate::Manual(court), fixed_now()).unwrap();
        assert_eq!(d.category, Category::Court);
    }

    #[test]
    fn completion_fields_dropped_on_open_records() {
        let open = ManualCandidate {
            status: Some("in progress".into()),
            completed_by: Some("jsmith".into()),
            ..manual("m-1", "2026-04-01")
        };
        let d = normalize_one(DomainCandidate::Manual(open), fixed_now()).unwrap();
        assert_eq!(d.status, Status::Upcoming);
        assert!(d.completed_by.is_none());
    }

    #[test]
    fn limitation_basis_becomes_source_rule() {
        let c = LimitationCandidate {
            id: "l-1".into(),
            case_id: "case-1".into(),
            label: "Personal injury limitation".into(),
            limitation_date: "2027-01-15".into(),
            basis: Some("Limitation Act 1980 s.11".into()),
            ..Default::default()
        };
        let d = normalize_one(DomainCandidate::Limitation(c), fixed_now()).unwrap();
        assert_eq!(d.category, Category::Limitation);
        assert_eq!(d.source, DeadlineSource::AutoCalculated);
        assert_eq!(d.source_rule.as_deref(), Some("Limitation Act 1980 s.11"));
    }

    #[test]
    fn days_remaining_is_filled_from_now_not_upstream() {
        let c = DomainCandidate::from_json(
            Category::Housing,
            serde_json::json!({
                "id": "h-1",
                "name": "Repair works",
                "deadlineDate": "2026-03-21T09:30:00Z",
                "daysRemaining": 99.5
            }),
        )
        .unwrap();
        let d = normalize_one(c, fixed_now()).unwrap();
        assert_eq!(d.days_remaining, 5);
        assert_eq!(d.status, Status::Upcoming);
        assert_eq!(d.priority, Priority::Medium);
    }

    #[test]
    fn parses_supported_date_forms() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 20, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("d", "2026-03-20").unwrap(), expected);
        assert_eq!(parse_timestamp("d", "2026-03-20T00:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("d", "2026-03-20 00:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("d", "2026-03-20T00:00:00Z").unwrap(), expected);
        assert_eq!(
            parse_timestamp("d", "2026-03-20T01:00:00+01:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_timestamp("d", "2026-03-20T00:00:00.250").unwrap(),
            expected + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let batch = vec![
            housing("h-1", "2026-03-20", "high", "upcoming"),
            housing("h-2", "next tuesday", "high", "upcoming"),
            housing("", "2026-03-20", "high", "upcoming"),
            DomainCandidate::Manual(manual("m-1", "2026-03-25")),
        ];
        let out = normalize(batch, fixed_now());
        let ids: Vec<_> = out.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["h-1", "m-1"]);
    }

    #[test]
    fn reports_why_a_record_is_rejected() {
        assert_eq!(
            normalize_one(housing("", "2026-03-20", "high", "upcoming"), fixed_now()),
            Err(NormalizeError::EmptyField("id"))
        );
        assert_eq!(
            normalize_one(housing("h-1", "31/03/2026", "high", "upcoming"), fixed_now()),
            Err(NormalizeError::InvalidDate {
                field: "deadlineDate",
                value: "31/03/2026".into()
            })
        );
    }
}

//! Time-based classification of a single deadline.
//!
//! The only place status and priority are derived from the clock. `now` is
//! always passed in; nothing in this crate reads the system clock.

use chrono::{DateTime, Utc};

use crate::deadline::{Priority, Status, UnifiedDeadline};

const SECONDS_PER_DAY: i64 = 86_400;

/// Derived fields for one deadline at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: Status,
    pub priority: Priority,
    pub days_remaining: i64,
}

/// Whole days from `now` until `due`, rounded toward negative infinity.
///
/// One second past the due instant is already day -1.
pub fn days_remaining(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let delta = due - now;
    let mut secs = delta.num_seconds();
    // num_seconds truncates toward zero; step down for a negative fraction.
    if delta.subsec_nanos() < 0 {
        secs -= 1;
    }
    secs.div_euclid(SECONDS_PER_DAY)
}

/// Classify a deadline due at `due` as seen from `now`.
///
/// `terminal` carries the already-known status of a completed or cancelled
/// deadline. Such deadlines keep that status and drop to `LOW` priority;
/// a non-terminal value here is ignored.
pub fn classify(due: DateTime<Utc>, now: DateTime<Utc>, terminal: Option<Status>) -> Classification {
    let days = days_remaining(due, now);

    if let Some(status) = terminal
        && status.is_terminal()
    {
        return Classification {
            status,
            priority: Priority::Low,
            days_remaining: days,
        };
    }

    let (status, priority) = match days {
        d if d < 0 => (Status::Overdue, Priority::Critical),
        0 => (Status::DueToday, Priority::Critical),
        1..=3 => (Status::DueSoon, Priority::High),
        4..=7 => (Status::Upcoming, Priority::Medium),
        _ => (Status::Upcoming, Priority::Low),
    };

    Classification {
        status,
        priority,
        days_remaining: days,
    }
}

/// Reclassify every record in place against one `now`.
pub fn classify_all(deadlines: &mut [UnifiedDeadline], now: DateTime<Utc>) {
    for d in deadlines {
        let terminal = d.is_terminal().then_some(d.status);
        d.apply(classify(d.due_date, now, terminal));
    }
}

//! Case risk score: one 0–100 number folded from a deadline list.
//!
//! 100 means no deadline exposure. An empty list also scores 100; callers
//! that need to tell "no data" from "healthy" must check their sources.

use crate::deadline::{Priority, Status, UnifiedDeadline};

pub const MAX_SCORE: u8 = 100;

pub const OVERDUE_PENALTY: i64 = 30;
pub const DUE_TODAY_PENALTY: i64 = 20;
pub const DUE_SOON_PENALTY: i64 = 10;
/// Applied on top of any status penalty.
pub const CRITICAL_PENALTY: i64 = 15;

/// Points one deadline takes off the score.
pub fn penalty(d: &UnifiedDeadline) -> i64 {
    let status = match d.status {
        Status::Overdue => OVERDUE_PENALTY,
        Status::DueToday => DUE_TODAY_PENALTY,
        Status::DueSoon => DUE_SOON_PENALTY,
        _ => 0,
    };
    let critical = if d.priority == Priority::Critical {
        CRITICAL_PENALTY
    } else {
        0
    };
    status + critical
}

/// Score a deadline list, clamped to `[0, 100]`.
pub fn score(deadlines: &[UnifiedDeadline]) -> u8 {
    let total: i64 = deadlines
        .iter()
        .map(penalty)
        .fold(0i64, |acc, p| acc.saturating_add(p));
    let raw = i64::from(MAX_SCORE).saturating_sub(total);
    raw.clamp(0, i64::from(MAX_SCORE)) as u8
}

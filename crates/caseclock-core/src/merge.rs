//! Merging per-domain deadline lists into one globally ordered sequence.

use std::cmp::Ordering;

use crate::deadline::{Status, UnifiedDeadline};

/// The fixed deadline comparator.
///
/// 1. OVERDUE before everything else
/// 2. priority rank ascending (CRITICAL first)
/// 3. `days_remaining` ascending (soonest first)
///
/// Records equal on all three keys compare `Equal`; callers rely on a stable
/// sort to keep their input order. Ids and titles are never consulted.
pub fn deadline_order(a: &UnifiedDeadline, b: &UnifiedDeadline) -> Ordering {
    let a_overdue = a.status == Status::Overdue;
    let b_overdue = b.status == Status::Overdue;

    b_overdue
        .cmp(&a_overdue)
        .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
        .then_with(|| a.days_remaining.cmp(&b.days_remaining))
}

/// Concatenate `lists` in order and stable-sort with [`deadline_order`].
pub fn merge<I>(lists: I) -> Vec<UnifiedDeadline>
where
    I: IntoIterator<Item = Vec<UnifiedDeadline>>,
{
    let mut merged: Vec<UnifiedDeadline> = lists.into_iter().flatten().collect();
    // `sort_by` is stable.
    merged.sort_by(deadline_order);
    merged
}

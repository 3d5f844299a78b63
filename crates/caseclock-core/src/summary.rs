use serde::{Deserialize, Serialize};

use crate::deadline::{Priority, Status, UnifiedDeadline};

/// Per-status counts for case-health panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineSummary {
    pub total: usize,
    pub overdue: usize,
    pub due_today: usize,
    pub due_soon: usize,
    pub upcoming: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Open deadlines at CRITICAL priority.
    pub critical: usize,
}

impl DeadlineSummary {
    pub fn from_deadlines(deadlines: &[UnifiedDeadline]) -> Self {
        let mut s = Self {
            total: deadlines.len(),
            ..Self::default()
        };
        for d in deadlines {
            match d.status {
                Status::Overdue => s.overdue += 1,
                Status::DueToday => s.due_today += 1,
                Status::DueSoon => s.due_soon += 1,
                Status::Upcoming => s.upcoming += 1,
                Status::Completed => s.completed += 1,
                Status::Cancelled => s.cancelled += 1,
            }
            if !d.is_terminal() && d.priority == Priority::Critical {
                s.critical += 1;
            }
        }
        s
    }

    /// Deadlines still needing work.
    pub fn open(&self) -> usize {
        self.total - self.completed - self.cancelled
    }
}

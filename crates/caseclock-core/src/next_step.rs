//! Recommended next actions, one per open deadline.

use serde::{Deserialize, Serialize};

use crate::deadline::{Priority, Status, UnifiedDeadline};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepPriority {
    Urgent,
    High,
    Medium,
}

impl StepPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStep {
    pub action: String,
    pub priority: StepPriority,
    pub deadline_id: String,
}

/// Build next steps in the order given, skipping completed and cancelled
/// deadlines. Pass the merged list; no re-sorting happens here.
pub fn synthesize(deadlines: &[UnifiedDeadline]) -> Vec<NextStep> {
    deadlines
        .iter()
        .filter(|d| !d.is_terminal())
        .map(|d| NextStep {
            action: action_text(d),
            priority: step_priority(d),
            deadline_id: d.id.clone(),
        })
        .collect()
}

fn step_priority(d: &UnifiedDeadline) -> StepPriority {
    match d.status {
        Status::Overdue | Status::DueToday => StepPriority::Urgent,
        Status::DueSoon => StepPriority::High,
        _ if d.priority == Priority::Critical => StepPriority::High,
        _ => StepPriority::Medium,
    }
}

fn action_text(d: &UnifiedDeadline) -> String {
    let n = d.days_remaining;
    let mut text = match d.status {
        Status::Overdue => format!(
            "Overdue by {}: {}. Take immediate action",
            days(-n),
            d.title
        ),
        Status::DueToday => format!("Due today: {}. Complete before close of business", d.title),
        Status::DueSoon => format!("Due in {}: {}. Prepare now", days(n), d.title),
        _ => format!("Upcoming in {}: {}. Schedule the work", days(n), d.title),
    };
    if let Some(rule) = &d.source_rule {
        text.push_str(&format!(" ({rule})"));
    }
    text
}

fn days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

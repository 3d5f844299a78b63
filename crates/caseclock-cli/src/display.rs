//! Plain-text rendering of an evaluation.

use std::fmt;

use caseclock_core::{Evaluation, UnifiedDeadline};
use caseclock_sync::SourceFailure;

const MAX_TITLE: usize = 48;

/// Text report: header, source warnings, summary, ordered deadlines and
/// numbered next steps.
pub struct Report<'a> {
    eval: &'a Evaluation,
    failures: &'a [SourceFailure],
}

impl<'a> Report<'a> {
    pub fn new(eval: &'a Evaluation, failures: &'a [SourceFailure]) -> Self {
        Self { eval, failures }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let eval = self.eval;
        writeln!(f, "=== Deadline risk score: {}/100 ===", eval.risk_score)?;
        writeln!(f, "Evaluated at {}", eval.evaluated_at.to_rfc3339())?;
        writeln!(f)?;

        if !self.failures.is_empty() {
            writeln!(f, "Warnings")?;
            for failure in self.failures {
                writeln!(f, "  {:<26} {}", failure.name, failure.error)?;
            }
            if !eval.has_deadlines() {
                writeln!(f, "  no deadlines found; score reflects missing data")?;
            }
            writeln!(f)?;
        }

        let s = &eval.summary;
        writeln!(f, "Summary")?;
        for (label, n) in [
            ("total", s.total),
            ("open", s.open()),
            ("overdue", s.overdue),
            ("due_today", s.due_today),
            ("due_soon", s.due_soon),
            ("upcoming", s.upcoming),
            ("completed", s.completed),
            ("cancelled", s.cancelled),
            ("critical", s.critical),
        ] {
            writeln!(f, "  {label:<26} {n}")?;
        }
        writeln!(f)?;

        if eval.has_deadlines() {
            writeln!(f, "Deadlines")?;
            for d in &eval.deadlines {
                writeln!(f, "{}", deadline_line(d))?;
            }
            writeln!(f)?;
        }

        if !eval.next_steps.is_empty() {
            writeln!(f, "Next steps")?;
            for (i, step) in eval.next_steps.iter().enumerate() {
                writeln!(
                    f,
                    "  {:>2}. [{}] {}",
                    i + 1,
                    step.priority.as_str(),
                    step.action
                )?;
            }
        }
        Ok(())
    }
}

fn deadline_line(d: &UnifiedDeadline) -> String {
    let title = if d.title.chars().count() > MAX_TITLE {
        let short: String = d.title.chars().take(MAX_TITLE - 3).collect();
        format!("{short}...")
    } else {
        d.title.clone()
    };
    format!(
        "  {:<10} {:<9} {:>5}d  {:<10} {:<12} {}",
        d.status.as_str(),
        d.priority.as_str(),
        d.days_remaining,
        d.category.as_str(),
        d.id,
        title
    )
}

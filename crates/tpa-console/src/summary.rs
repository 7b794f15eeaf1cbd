//! Headline metrics over the collection

use serde::Serialize;
use std::fmt;
use tpa_model::{ProgramRecord, ProgramStatus};

/// Totals shown on the dashboard overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSummary {
    /// All programs
    pub total_programs: usize,
    /// Programs not yet started
    pub scheduled: usize,
    /// Programs running
    pub active: usize,
    /// Programs finished
    pub completed: usize,
    /// Sum of participant capacity
    pub total_capacity: u64,
    /// Sum of program costs
    pub total_budget: u64,
}

impl ProgramSummary {
    /// Summarize a set of records
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ProgramRecord>,
    {
        records.into_iter().fold(Self::default(), |mut acc, r| {
            acc.total_programs += 1;
            match r.status() {
                ProgramStatus::Scheduled => acc.scheduled += 1,
                ProgramStatus::Active => acc.active += 1,
                ProgramStatus::Completed => acc.completed += 1,
            }
            acc.total_capacity += u64::from(r.max_participants());
            acc.total_budget = acc.total_budget.saturating_add(r.program_cost());
            acc
        })
    }
}

impl fmt::Display for ProgramSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total programs: {}", self.total_programs)?;
        writeln!(
            f,
            "  Scheduled: {}  Active: {}  Completed: {}",
            self.scheduled, self.active, self.completed
        )?;
        writeln!(f, "Total capacity: {} participants", self.total_capacity)?;
        write!(f, "Total budget:   {}", crate::view::format_inr(self.total_budget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary() {
        let summary = ProgramSummary::from_records(std::iter::empty());
        assert_eq!(summary, ProgramSummary::default());
        assert!(summary.to_string().contains("Total budget:   ₹0"));
    }
}

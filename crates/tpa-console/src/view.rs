//! Display projection of program records
//!
//! Pure functions of state: a [`ProgramCard`] is everything a presentation
//! layer needs to draw one program, already formatted for an Indian English
//! locale.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tpa_model::{ProgramId, ProgramRecord};

/// Shown in place of the list when there is nothing to show
pub const EMPTY_MESSAGE: &str = "No programs found. Add your first program using the form above.";

/// Formatted, display-ready program
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCard {
    /// Program id, for edit/delete actions
    pub id: ProgramId,
    /// Program name
    pub name: String,
    /// Type label (`Soft Skills`)
    pub type_label: String,
    /// Department label
    pub department: String,
    /// Start date (`10 Jan 2025`)
    pub start_date: String,
    /// Duration (`4 weeks`)
    pub duration: String,
    /// Capacity (`20 participants`)
    pub capacity: String,
    /// Cost (`₹5,00,000`)
    pub cost: String,
    /// Capitalized status (`Scheduled`)
    pub status_label: String,
    /// Raw status, usable as a style class
    pub status_class: String,
}

impl From<&ProgramRecord> for ProgramCard {
    fn from(record: &ProgramRecord) -> Self {
        Self {
            id: record.id().clone(),
            name: record.name().to_string(),
            type_label: record.program_type().label().to_string(),
            department: record.department().as_str().to_string(),
            start_date: format_date(record.start_date()),
            duration: plural(record.duration(), "week"),
            capacity: plural(record.max_participants(), "participant"),
            cost: format_inr(record.program_cost()),
            status_label: record.status().label().to_string(),
            status_class: record.status().as_str().to_string(),
        }
    }
}

impl fmt::Display for ProgramCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.name, self.status_label)?;
        writeln!(f, "  Id:         {}", self.id)?;
        writeln!(f, "  Type:       {}", self.type_label)?;
        writeln!(f, "  Department: {}", self.department)?;
        writeln!(f, "  Start Date: {}", self.start_date)?;
        writeln!(f, "  Duration:   {}", self.duration)?;
        writeln!(f, "  Capacity:   {}", self.capacity)?;
        write!(f, "  Cost:       {}", self.cost)
    }
}

/// Projection of a list of records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ProgramListView {
    /// No records to show
    Empty {
        /// Placeholder text
        message: String,
    },
    /// Cards in collection order
    Cards {
        /// Projected cards
        cards: Vec<ProgramCard>,
    },
}

impl ProgramListView {
    /// Project records, keeping their order
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ProgramRecord>,
    {
        let cards: Vec<ProgramCard> = records.into_iter().map(ProgramCard::from).collect();
        if cards.is_empty() {
            Self::Empty {
                message: EMPTY_MESSAGE.to_string(),
            }
        } else {
            Self::Cards { cards }
        }
    }

    /// Cards shown (empty slice for the placeholder)
    #[must_use]
    pub fn cards(&self) -> &[ProgramCard] {
        match self {
            Self::Empty { .. } => &[],
            Self::Cards { cards } => cards,
        }
    }

    /// Number of cards
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards().len()
    }

    /// Check if this is the placeholder
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

impl fmt::Display for ProgramListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { message } => f.write_str(message),
            Self::Cards { cards } => {
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n\n")?;
                    }
                    write!(f, "{card}")?;
                }
                Ok(())
            }
        }
    }
}

/// `10 Jan 2025`
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Whole rupees with Indian digit grouping: `₹12,34,567`
#[must_use]
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    // lakh/crore grouping: pairs above the last three digits
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

//! Unvalidated program input
//!
//! A [`ProgramDraft`] is whatever a form or command line submitted. Nothing
//! about it is trusted until it passes [`crate::ProgramValidator`].

use crate::program::ProgramRecord;
use serde::{Deserialize, Serialize};

/// Raw program submission
///
/// Text fields may be empty; numeric fields are `None` when not supplied.
/// Deserializes from the same camelCase keys as a stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramDraft {
    /// Program name
    pub name: String,
    /// Program type wire name
    #[serde(rename = "type")]
    pub program_type: String,
    /// Department wire name
    pub department: String,
    /// Start date as `YYYY-MM-DD`
    pub start_date: String,
    /// Duration in weeks
    pub duration: Option<i64>,
    /// Participant capacity
    pub max_participants: Option<i64>,
    /// Cost in whole rupees
    pub program_cost: Option<i64>,
}

impl ProgramDraft {
    /// Start a draft with a name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// With program type
    #[inline]
    #[must_use]
    pub fn with_type(mut self, program_type: impl Into<String>) -> Self {
        self.program_type = program_type.into();
        self
    }

    /// With department
    #[inline]
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// With start date
    #[inline]
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = start_date.into();
        self
    }

    /// With duration in weeks
    #[inline]
    #[must_use]
    pub fn with_duration(mut self, weeks: i64) -> Self {
        self.duration = Some(weeks);
        self
    }

    /// With participant capacity
    #[inline]
    #[must_use]
    pub fn with_max_participants(mut self, max: i64) -> Self {
        self.max_participants = Some(max);
        self
    }

    /// With program cost
    #[inline]
    #[must_use]
    pub fn with_program_cost(mut self, cost: i64) -> Self {
        self.program_cost = Some(cost);
        self
    }
}

/// Prefill a draft from an existing record (edit mode)
impl From<&ProgramRecord> for ProgramDraft {
    fn from(record: &ProgramRecord) -> Self {
        Self {
            name: record.name().to_string(),
            program_type: record.program_type().as_str().to_string(),
            department: record.department().as_str().to_string(),
            start_date: record.start_date().format("%Y-%m-%d").to_string(),
            duration: Some(i64::from(record.duration())),
            max_participants: Some(i64::from(record.max_participants())),
            program_cost: i64::try_from(record.program_cost()).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_json_fields_default() {
        let draft: ProgramDraft = serde_json::from_str(r#"{"name":"AI"}"#).unwrap();
        assert_eq!(draft.name, "AI");
        assert!(draft.program_type.is_empty());
        assert_eq!(draft.duration, None);
    }

    #[test]
    fn json_uses_record_keys() {
        let draft: ProgramDraft = serde_json::from_str(
            r#"{"name":"AI Basics","type":"technical","department":"IT",
                "startDate":"2025-01-10","duration":4,"maxParticipants":20,"programCost":500000}"#,
        )
        .unwrap();
        assert_eq!(draft.program_type, "technical");
        assert_eq!(draft.start_date, "2025-01-10");
        assert_eq!(draft.max_participants, Some(20));
        assert_eq!(draft.program_cost, Some(500_000));
    }
}

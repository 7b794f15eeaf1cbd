//! Field validation for program submissions
//!
//! Turns a [`ProgramDraft`] into a [`ValidatedProgram`]. Every rule is
//! checked independently and all violations are reported together, in form
//! field order.

use crate::draft::ProgramDraft;
use crate::program::{Department, ProgramType};
use chrono::NaiveDate;
use std::fmt;

/// Form field a violation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Program name
    Name,
    /// Program type
    ProgramType,
    /// Department
    Department,
    /// Start date
    StartDate,
    /// Duration in weeks
    Duration,
    /// Participant capacity
    MaxParticipants,
    /// Program cost
    ProgramCost,
}

impl Field {
    /// Wire name of the field
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::ProgramType => "type",
            Field::Department => "department",
            Field::StartDate => "startDate",
            Field::Duration => "duration",
            Field::MaxParticipants => "maxParticipants",
            Field::ProgramCost => "programCost",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Field missing or blank
    Required,
    /// Text shorter than `min` characters
    TooShort {
        /// Minimum character count
        min: usize,
    },
    /// Not one of the allowed options
    UnknownOption,
    /// Not a `YYYY-MM-DD` calendar date
    InvalidDate,
    /// Number below `min`
    BelowMinimum {
        /// Smallest accepted value
        min: i64,
    },
    /// Number too large to store
    OutOfRange,
}

/// Single field-level violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Offending field
    pub field: Field,
    /// Rule that failed
    pub rule: Rule,
    /// User-facing message
    pub message: String,
}

impl FieldViolation {
    fn new(field: Field, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Non-empty, ordered list of violations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    /// All violations in field order
    #[inline]
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Number of violations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for errors produced by the validator
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether a field failed a given rule
    #[must_use]
    pub fn has(&self, field: Field, rule: Rule) -> bool {
        self.0.iter().any(|v| v.field == field && v.rule == rule)
    }

    /// Violations for one field
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter().filter(move |v| v.field == field)
    }

    /// First violation, the one a single-message form would show
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&FieldViolation> {
        self.0.first()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldViolation;
    type IntoIter = std::vec::IntoIter<FieldViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Program details that passed every rule
///
/// Only [`ProgramValidator`] constructs this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProgram {
    name: String,
    program_type: ProgramType,
    department: Department,
    start_date: NaiveDate,
    duration: u32,
    max_participants: u32,
    program_cost: u64,
}

impl ValidatedProgram {
    /// Trimmed name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Program category
    #[inline]
    #[must_use]
    pub fn program_type(&self) -> ProgramType {
        self.program_type
    }

    /// Owning department
    #[inline]
    #[must_use]
    pub fn department(&self) -> Department {
        self.department
    }

    /// Start date
    #[inline]
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Duration in weeks
    #[inline]
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Participant capacity
    #[inline]
    #[must_use]
    pub fn max_participants(&self) -> u32 {
        self.max_participants
    }

    /// Cost in whole rupees
    #[inline]
    #[must_use]
    pub fn program_cost(&self) -> u64 {
        self.program_cost
    }

    /// Take the name out
    #[inline]
    #[must_use]
    pub fn into_name(self) -> String {
        self.name
    }
}

/// Admission rules for program submissions
///
/// Pure: no I/O, no clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramValidator;

impl ProgramValidator {
    /// Minimum trimmed name length in characters
    pub const MIN_NAME_LEN: usize = 3;

    /// Create new validator instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate a draft
    ///
    /// # Errors
    /// Returns every violated rule, in field order
    pub fn validate(&self, draft: &ProgramDraft) -> Result<ValidatedProgram, ValidationErrors> {
        let mut violations = Vec::new();

        let name = Self::check_name(&draft.name, &mut violations);
        let program_type = Self::check_option::<ProgramType>(
            &draft.program_type,
            Field::ProgramType,
            "Please select a program type",
            "program type",
            &mut violations,
        );
        let department = Self::check_option::<Department>(
            &draft.department,
            Field::Department,
            "Please select a department",
            "department",
            &mut violations,
        );
        let start_date = Self::check_date(&draft.start_date, &mut violations);
        let duration = Self::check_count(
            draft.duration,
            Field::Duration,
            "Duration",
            "Duration must be at least 1 week",
            &mut violations,
        );
        let max_participants = Self::check_count(
            draft.max_participants,
            Field::MaxParticipants,
            "Maximum participants",
            "Maximum participants must be at least 1",
            &mut violations,
        );
        let program_cost = Self::check_cost(draft.program_cost, &mut violations);

        match (
            name,
            program_type,
            department,
            start_date,
            duration,
            max_participants,
            program_cost,
        ) {
            (
                Some(name),
                Some(program_type),
                Some(department),
                Some(start_date),
                Some(duration),
                Some(max_participants),
                Some(program_cost),
            ) if violations.is_empty() => Ok(ValidatedProgram {
                name,
                program_type,
                department,
                start_date,
                duration,
                max_participants,
                program_cost,
            }),
            _ => Err(ValidationErrors(violations)),
        }
    }

    fn check_name(raw: &str, violations: &mut Vec<FieldViolation>) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            violations.push(FieldViolation::new(
                Field::Name,
                Rule::Required,
                "Program name is required",
            ));
            return None;
        }
        if trimmed.chars().count() < Self::MIN_NAME_LEN {
            violations.push(FieldViolation::new(
                Field::Name,
                Rule::TooShort {
                    min: Self::MIN_NAME_LEN,
                },
                format!(
                    "Program name must be at least {} characters long",
                    Self::MIN_NAME_LEN
                ),
            ));
            return None;
        }
        Some(trimmed.to_string())
    }

    fn check_option<T>(
        raw: &str,
        field: Field,
        required_message: &str,
        noun: &str,
        violations: &mut Vec<FieldViolation>,
    ) -> Option<T>
    where
        T: std::str::FromStr,
    {
        if raw.trim().is_empty() {
            violations.push(FieldViolation::new(field, Rule::Required, required_message));
            return None;
        }
        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                violations.push(FieldViolation::new(
                    field,
                    Rule::UnknownOption,
                    format!("Unknown {noun} '{raw}'"),
                ));
                None
            }
        }
    }

    fn check_date(raw: &str, violations: &mut Vec<FieldViolation>) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            violations.push(FieldViolation::new(
                Field::StartDate,
                Rule::Required,
                "Please select a start date",
            ));
            return None;
        }
        match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                violations.push(FieldViolation::new(
                    Field::StartDate,
                    Rule::InvalidDate,
                    format!("Start date '{trimmed}' is not a valid calendar date"),
                ));
                None
            }
        }
    }

    fn check_count(
        raw: Option<i64>,
        field: Field,
        label: &str,
        minimum_message: &str,
        violations: &mut Vec<FieldViolation>,
    ) -> Option<u32> {
        let Some(value) = raw else {
            violations.push(FieldViolation::new(
                field,
                Rule::Required,
                format!("{label} is required"),
            ));
            return None;
        };
        if value < 1 {
            violations.push(FieldViolation::new(
                field,
                Rule::BelowMinimum { min: 1 },
                minimum_message,
            ));
            return None;
        }
        match u32::try_from(value) {
            Ok(v) => Some(v),
            Err(_) => {
                violations.push(FieldViolation::new(
                    field,
                    Rule::OutOfRange,
                    format!("{label} is too large"),
                ));
                None
            }
        }
    }

    fn check_cost(raw: Option<i64>, violations: &mut Vec<FieldViolation>) -> Option<u64> {
        let Some(value) = raw else {
            violations.push(FieldViolation::new(
                Field::ProgramCost,
                Rule::Required,
                "Program cost is required",
            ));
            return None;
        };
        // zero is a valid (free) program
        match u64::try_from(value) {
            Ok(v) => Some(v),
            Err(_) => {
                violations.push(FieldViolation::new(
                    Field::ProgramCost,
                    Rule::BelowMinimum { min: 0 },
                    "Program cost cannot be negative",
                ));
                None
            }
        }
    }
}

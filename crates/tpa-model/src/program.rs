//! Program record types
//!
//! Defines the persisted [`ProgramRecord`] and the closed sets it draws
//! from:
//! - [`ProgramType`] program categories
//! - [`Department`] owning departments
//! - [`ProgramStatus`] lifecycle states

use crate::validation::ValidatedProgram;
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Opaque program identifier
///
/// Freshly created records get a ULID; identifiers read back from storage
/// are accepted as any string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(String);

impl ProgramId {
    /// Wrap an existing identifier
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Identifier derived from a ULID
    #[inline]
    #[must_use]
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid.to_string())
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProgramId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProgramId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Unknown value for one of the closed program enumerations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseEnumError {
    /// Enumeration being parsed ("program type", "department", ...)
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Program category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgramType {
    /// Technical skills
    Technical,
    /// Leadership development
    Leadership,
    /// Communication and other soft skills
    SoftSkills,
    /// Regulatory and policy compliance
    Compliance,
    /// New-hire onboarding
    Onboarding,
}

impl ProgramType {
    /// Every program type, in form order
    pub const ALL: [ProgramType; 5] = [
        ProgramType::Technical,
        ProgramType::Leadership,
        ProgramType::SoftSkills,
        ProgramType::Compliance,
        ProgramType::Onboarding,
    ];

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramType::Technical => "technical",
            ProgramType::Leadership => "leadership",
            ProgramType::SoftSkills => "soft-skills",
            ProgramType::Compliance => "compliance",
            ProgramType::Onboarding => "onboarding",
        }
    }

    /// Human-readable label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ProgramType::Technical => "Technical",
            ProgramType::Leadership => "Leadership",
            ProgramType::SoftSkills => "Soft Skills",
            ProgramType::Compliance => "Compliance",
            ProgramType::Onboarding => "Onboarding",
        }
    }
}

impl fmt::Display for ProgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("program type", s))
    }
}

/// Department that owns a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    /// Information technology
    #[serde(rename = "IT")]
    It,
    /// Human resources
    #[serde(rename = "HR")]
    Hr,
    /// Finance
    Finance,
    /// Marketing
    Marketing,
    /// Management
    Management,
    /// Operations
    Operations,
    /// Sales
    Sales,
}

impl Department {
    /// Every department, in form order
    pub const ALL: [Department; 7] = [
        Department::It,
        Department::Hr,
        Department::Finance,
        Department::Marketing,
        Department::Management,
        Department::Operations,
        Department::Sales,
    ];

    /// Wire name (also the display label)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::It => "IT",
            Department::Hr => "HR",
            Department::Finance => "Finance",
            Department::Marketing => "Marketing",
            Department::Management => "Management",
            Department::Operations => "Operations",
            Department::Sales => "Sales",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("department", s))
    }
}

/// Program lifecycle state
///
/// Programs start `Scheduled` and only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramStatus {
    /// Not yet started
    Scheduled,
    /// Running
    Active,
    /// Finished
    Completed,
}

impl ProgramStatus {
    /// Every status, in lifecycle order
    pub const ALL: [ProgramStatus; 3] = [
        ProgramStatus::Scheduled,
        ProgramStatus::Active,
        ProgramStatus::Completed,
    ];

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramStatus::Scheduled => "scheduled",
            ProgramStatus::Active => "active",
            ProgramStatus::Completed => "completed",
        }
    }

    /// Capitalized label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ProgramStatus::Scheduled => "Scheduled",
            ProgramStatus::Active => "Active",
            ProgramStatus::Completed => "Completed",
        }
    }

    /// Check if moving to `next` is a forward lifecycle step
    #[inline]
    #[must_use]
    pub fn can_advance_to(&self, next: ProgramStatus) -> bool {
        next > *self
    }
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("status", s))
    }
}

/// Persisted training program
///
/// # Invariants
/// - `id` and `created_at` never change after construction
/// - all detail fields came through [`ValidatedProgram`]
/// - `created_at` carries millisecond precision, matching the stored form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRecord {
    id: ProgramId,
    name: String,
    #[serde(rename = "type")]
    program_type: ProgramType,
    department: Department,
    start_date: NaiveDate,
    duration: u32,
    max_participants: u32,
    program_cost: u64,
    status: ProgramStatus,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
}

impl ProgramRecord {
    /// Create a new scheduled program from validated details
    #[must_use]
    pub fn new(id: ProgramId, details: ValidatedProgram, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            program_type: details.program_type(),
            department: details.department(),
            start_date: details.start_date(),
            duration: details.duration(),
            max_participants: details.max_participants(),
            program_cost: details.program_cost(),
            status: ProgramStatus::Scheduled,
            created_at: created_at.trunc_subsecs(3),
            // consumes `details`; keep last
            name: details.into_name(),
        }
    }

    /// Replace every editable field, keeping id, creation time and status
    pub fn replace_details(&mut self, details: ValidatedProgram) {
        self.program_type = details.program_type();
        self.department = details.department();
        self.start_date = details.start_date();
        self.duration = details.duration();
        self.max_participants = details.max_participants();
        self.program_cost = details.program_cost();
        self.name = details.into_name();
    }

    /// Move to a new lifecycle status
    pub fn set_status(&mut self, status: ProgramStatus) {
        self.status = status;
    }

    /// Identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ProgramId {
        &self.id
    }

    /// Program name (trimmed)
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

    /// First day of the program
    #[inline]
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Length in weeks
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

    /// Total cost in whole rupees
    #[inline]
    #[must_use]
    pub fn program_cost(&self) -> u64 {
        self.program_cost
    }

    /// Lifecycle status
    #[inline]
    #[must_use]
    pub fn status(&self) -> ProgramStatus {
        self.status
    }

    /// Creation timestamp
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// RFC 3339 UTC timestamps with millisecond precision (`2025-01-10T09:30:00.000Z`)
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

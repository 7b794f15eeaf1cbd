//! Search and filter over the collection
//!
//! A [`ProgramQuery`] combines a case-insensitive name search with an
//! optional status and type constraint. The filter value `all` means
//! "no constraint".

use crate::error::StoreError;
use std::str::FromStr;
use tpa_model::{ParseEnumError, ProgramRecord, ProgramStatus, ProgramType};

/// Wire value for an unconstrained filter
pub const ALL: &str = "all";

/// Optional exact-match constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    /// Unconstrained
    All,
    /// Only this value
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Filter<T> {
    /// Check a value against the filter
    #[inline]
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

impl<T> Filter<T>
where
    T: FromStr<Err = ParseEnumError>,
{
    /// Parse `all` or an enum wire name
    ///
    /// # Errors
    /// Returns error for any other value
    pub fn parse(raw: &str) -> Result<Self, ParseEnumError> {
        if raw == ALL {
            Ok(Filter::All)
        } else {
            raw.parse().map(Filter::Only)
        }
    }
}

/// Name search plus status and type filters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgramQuery {
    search: String,
    status: Filter<ProgramStatus>,
    program_type: Filter<ProgramType>,
}

impl ProgramQuery {
    /// Unfiltered query
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw form values
    ///
    /// # Errors
    /// Returns `StoreError::InvalidFilter` if a filter is neither `all` nor a
    /// known wire name
    pub fn parse(search: &str, status: &str, program_type: &str) -> Result<Self, StoreError> {
        Ok(Self {
            search: search.to_lowercase(),
            status: Filter::parse(status)?,
            program_type: Filter::parse(program_type)?,
        })
    }

    /// With name search term
    #[inline]
    #[must_use]
    pub fn with_search(mut self, term: &str) -> Self {
        self.search = term.to_lowercase();
        self
    }

    /// With status constraint
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ProgramStatus) -> Self {
        self.status = Filter::Only(status);
        self
    }

    /// With type constraint
    #[inline]
    #[must_use]
    pub fn with_type(mut self, program_type: ProgramType) -> Self {
        self.program_type = Filter::Only(program_type);
        self
    }

    /// Lowercased search term
    #[inline]
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Status constraint
    #[inline]
    #[must_use]
    pub fn status(&self) -> Filter<ProgramStatus> {
        self.status
    }

    /// Type constraint
    #[inline]
    #[must_use]
    pub fn program_type(&self) -> Filter<ProgramType> {
        self.program_type
    }

    /// Check if nothing is constrained
    #[inline]
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.status == Filter::All && self.program_type == Filter::All
    }

    /// Check a record against every constraint
    #[must_use]
    pub fn matches(&self, record: &ProgramRecord) -> bool {
        self.status.matches(&record.status())
            && self.program_type.matches(&record.program_type())
            && (self.search.is_empty() || record.name().to_lowercase().contains(&self.search))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_is_unfiltered() {
        let query = ProgramQuery::parse("", "all", "all").unwrap();
        assert!(query.is_unfiltered());
        assert_eq!(query, ProgramQuery::new());
    }

    #[test]
    fn parse_lowercases_search() {
        let query = ProgramQuery::parse("AI Bas", "active", "soft-skills").unwrap();
        assert_eq!(query.search(), "ai bas");
        assert_eq!(query.status(), Filter::Only(ProgramStatus::Active));
        assert_eq!(query.program_type(), Filter::Only(ProgramType::SoftSkills));
    }

    #[test]
    fn parse_rejects_unknown_filters() {
        let err = ProgramQuery::parse("", "archived", "all").unwrap_err();
        assert!(matches!(err, StoreError::InvalidFilter(ref e) if e.value == "archived"));
        assert!(ProgramQuery::parse("", "all", "All").is_err());
    }

    #[test]
    fn filter_matches() {
        assert!(Filter::<ProgramStatus>::All.matches(&ProgramStatus::Completed));
        assert!(Filter::Only(ProgramStatus::Active).matches(&ProgramStatus::Active));
        assert!(!Filter::Only(ProgramStatus::Active).matches(&ProgramStatus::Scheduled));
    }
}

//! Error types for the program store
//!
//! Provides error handling for:
//! - Submission validation (no mutation performed)
//! - Unknown program ids
//! - Storage backend failures and rolled-back writes
//! - Unreadable persisted data (recovered as an empty collection)
//! - Configuration loading

use std::path::PathBuf;
use tpa_model::{ParseEnumError, ProgramId, ProgramStatus, ValidationErrors};

/// Main store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// One or more fields failed validation
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// No program with this id
    #[error("program not found: {0}")]
    NotFound(ProgramId),

    /// Write or read against storage failed
    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    /// Filter value is not `all` or a known option
    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] ParseEnumError),

    /// Status change that is not a forward lifecycle step
    #[error("cannot move program {id} from {from} to {to}")]
    InvalidTransition {
        /// Program id
        id: ProgramId,
        /// Current status
        from: ProgramStatus,
        /// Requested status
        to: ProgramStatus,
    },
}

impl StoreError {
    /// Check if the error carries field violations
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the error is an unknown id
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Field violations, if any
    #[inline]
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Failure moving the collection to or from storage
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Collection could not be encoded
    #[error("failed to serialize programs: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Backend rejected the write
    #[error("storage write failed: {0}")]
    Write(#[source] StorageError),

    /// Backend could not be read
    #[error("storage read failed: {0}")]
    Read(#[source] StorageError),
}

impl PersistenceError {
    /// Check if the backend ran out of space
    #[inline]
    #[must_use]
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(
            self,
            Self::Write(StorageError::QuotaExceeded { .. })
                | Self::Read(StorageError::QuotaExceeded { .. })
        )
    }
}

/// Key-value backend errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Write would exceed the configured byte quota
    #[error("storage quota exceeded: {required} bytes required, quota is {quota}")]
    QuotaExceeded {
        /// Bytes the store would hold after the write
        required: usize,
        /// Configured limit
        quota: usize,
    },

    /// Filesystem error
    #[error("io error on {path}: {source}")]
    Io {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped onto the backend
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Persisted data that cannot be turned back into a collection
#[derive(Debug, thiserror::Error)]
pub enum StorageCorruptionError {
    /// Not a JSON array of program records
    #[error("malformed program data under '{key}': {source}")]
    Malformed {
        /// Storage key
        key: String,
        /// Decoder error
        #[source]
        source: serde_json::Error,
    },

    /// Two records share an id
    #[error("duplicate program id under '{key}': {id}")]
    DuplicateId {
        /// Storage key
        key: String,
        /// Repeated id
        id: ProgramId,
    },

    /// A record breaks the field rules
    #[error("invalid program {id} under '{key}': {source}")]
    InvalidRecord {
        /// Storage key
        key: String,
        /// Offending record
        id: ProgramId,
        /// Rules it breaks
        #[source]
        source: ValidationErrors,
    },
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Not valid TOML for the config schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed but semantically invalid
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::NotFound(ProgramId::new("abc"));
        assert_eq!(err.to_string(), "program not found: abc");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn transition_display() {
        let err = StoreError::InvalidTransition {
            id: ProgramId::new("p1"),
            from: ProgramStatus::Completed,
            to: ProgramStatus::Active,
        };
        assert_eq!(err.to_string(), "cannot move program p1 from completed to active");
    }

    #[test]
    fn quota_detection() {
        let err = PersistenceError::Write(StorageError::QuotaExceeded {
            required: 10,
            quota: 5,
        });
        assert!(err.is_quota_exceeded());
        assert!(err.to_string().contains("quota exceeded"));

        let io = PersistenceError::Read(StorageError::io_error(
            "/tmp/x",
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        ));
        assert!(!io.is_quota_exceeded());
    }
}

//! TPA Model
//!
//! Training program records and their admission rules.
//!
//! # Overview
//!
//! - **ProgramRecord**: one persisted training program
//! - **ProgramDraft**: raw, unvalidated form input
//! - **ProgramValidator**: field-level admission rules producing a
//!   [`ValidatedProgram`] or every violated rule at once
//!
//! # Example
//!
//! ```rust
//! use tpa_model::{ProgramDraft, ProgramValidator, ProgramStatus};
//!
//! let draft = ProgramDraft::new("AI Basics")
//!     .with_type("technical")
//!     .with_department("IT")
//!     .with_start_date("2025-01-10")
//!     .with_duration(4)
//!     .with_max_participants(20)
//!     .with_program_cost(500_000);
//!
//! let validated = ProgramValidator::new().validate(&draft).unwrap();
//! assert_eq!(validated.name(), "AI Basics");
//!
//! let short = ProgramDraft::new("AI");
//! let errors = ProgramValidator::new().validate(&short).unwrap_err();
//! assert!(!errors.is_empty());
//! # let _ = ProgramStatus::Scheduled;
//! ```

#![warn(missing_docs)]

pub mod draft;
pub mod program;
pub mod validation;

// Re-exports
pub use draft::ProgramDraft;
pub use program::{
    Department, ParseEnumError, ProgramId, ProgramRecord, ProgramStatus, ProgramType,
};
pub use validation::{Field, FieldViolation, ProgramValidator, Rule, ValidatedProgram, ValidationErrors};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with program records
    pub use crate::{
        Department, ProgramDraft, ProgramId, ProgramRecord, ProgramStatus, ProgramType,
        ProgramValidator, ValidatedProgram, ValidationErrors,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! TPA Console - the action layer between a UI and the program store
//!
//! - Maps user actions to a typed [`Command`] and dispatches them through a
//!   [`HandlerTable`]
//! - Projects records into display [`ProgramCard`]s
//! - Emits semantic [`Notification`]s and asks a [`Confirmation`]
//!   collaborator before deleting
//!
//! # Example
//!
//! ```rust
//! use tpa_console::{AutoConfirm, Command, CommandOutcome, Console, RecordingNotifier};
//! use tpa_model::ProgramDraft;
//! use tpa_store::{MemoryStorage, StoreConfig};
//!
//! let notifier = RecordingNotifier::new();
//! let mut console = Console::open(
//!     MemoryStorage::new(),
//!     &StoreConfig::default(),
//!     notifier.clone(),
//!     AutoConfirm::yes(),
//! )
//! .unwrap();
//!
//! let draft = ProgramDraft::new("AI Basics")
//!     .with_type("technical")
//!     .with_department("IT")
//!     .with_start_date("2025-01-10")
//!     .with_duration(4)
//!     .with_max_participants(20)
//!     .with_program_cost(500_000);
//!
//! let outcome = console.dispatch(Command::Add(draft)).unwrap();
//! assert!(matches!(outcome, CommandOutcome::Added(_)));
//! assert_eq!(notifier.messages(), vec!["Program added successfully!".to_string()]);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod command;
pub mod confirm;
pub mod console;
pub mod error;
pub mod export;
pub mod notify;
pub mod summary;
pub mod view;

// Re-exports for convenience
pub use command::{Command, CommandKind, CommandOutcome, Handler, HandlerTable};
pub use confirm::{AutoConfirm, Confirmation};
pub use console::Console;
pub use error::ConsoleError;
pub use export::{ExportError, ExportFormat};
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use summary::ProgramSummary;
pub use view::{format_date, format_inr, ProgramCard, ProgramListView};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the console
    pub use crate::{
        AutoConfirm, Command, CommandOutcome, Confirmation, Console, ConsoleError, ExportFormat,
        Notification, NotificationLevel, Notifier, ProgramCard, ProgramListView,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

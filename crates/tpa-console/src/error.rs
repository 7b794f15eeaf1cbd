//! Error types for the console

use crate::command::CommandKind;
use crate::export::ExportError;
use tpa_store::StoreError;

/// Console error type
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Store rejected the command
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Export rendering failed
    #[error(transparent)]
    Export(#[from] ExportError),

    /// No handler for this command kind
    #[error("no handler registered for {0} command")]
    UnregisteredCommand(CommandKind),
}

impl ConsoleError {
    /// Underlying store error, if any
    #[inline]
    #[must_use]
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }

    /// Message suitable for an error notification
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(StoreError::Validation(errors)) => errors.to_string(),
            Self::Store(StoreError::NotFound(_)) => "Program not found".to_string(),
            Self::Store(StoreError::Persistence(e)) if e.is_quota_exceeded() => {
                "Could not save programs: storage is full".to_string()
            }
            Self::Store(StoreError::Persistence(e)) => format!("Could not save programs: {e}"),
            Self::Store(StoreError::InvalidFilter(e)) => format!("Invalid filter: {e}"),
            Self::Store(StoreError::InvalidTransition { from, to, .. }) => format!(
                "A {} program cannot be marked as {}",
                from.as_str(),
                to.label()
            ),
            Self::Export(e) => format!("Export failed: {e}"),
            Self::UnregisteredCommand(kind) => format!("Action '{kind}' is not available"),
        }
    }
}

//! Commands and the handler table that executes them
//!
//! Every user action becomes one [`Command`]. The [`HandlerTable`] maps each
//! [`CommandKind`] to a plain function, so a presentation layer never calls
//! the store directly and handlers can be swapped per kind.

use crate::console::Console;
use crate::error::ConsoleError;
use crate::export::{self, ExportFormat};
use crate::notify::Notification;
use crate::summary::ProgramSummary;
use crate::view::ProgramListView;
use std::collections::HashMap;
use std::fmt;
use tpa_model::{ProgramDraft, ProgramId, ProgramRecord, ProgramStatus};
use tpa_store::{KeyValueStorage, ProgramQuery};

/// Prompt shown before deleting
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this program?";

/// User action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a new program
    Add(ProgramDraft),
    /// Submit changes to an existing program
    Edit {
        /// Program to change
        id: ProgramId,
        /// Replacement fields
        draft: ProgramDraft,
    },
    /// Delete after confirmation
    Delete {
        /// Program to delete
        id: ProgramId,
    },
    /// Search / filter the list
    Query(ProgramQuery),
    /// Clear filters and show everything
    Refresh,
    /// Open a program for editing
    Load {
        /// Program to edit
        id: ProgramId,
    },
    /// Advance lifecycle status
    SetStatus {
        /// Program to change
        id: ProgramId,
        /// New status
        status: ProgramStatus,
    },
    /// Export programs matching a query
    Export {
        /// Output format
        format: ExportFormat,
        /// Which programs
        query: ProgramQuery,
    },
    /// Headline totals
    Summary,
}

impl Command {
    /// Kind used for handler lookup
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Add(_) => CommandKind::Add,
            Command::Edit { .. } => CommandKind::Edit,
            Command::Delete { .. } => CommandKind::Delete,
            Command::Query(_) => CommandKind::Query,
            Command::Refresh => CommandKind::Refresh,
            Command::Load { .. } => CommandKind::Load,
            Command::SetStatus { .. } => CommandKind::SetStatus,
            Command::Export { .. } => CommandKind::Export,
            Command::Summary => CommandKind::Summary,
        }
    }
}

/// Discriminant of [`Command`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// [`Command::Add`]
    Add,
    /// [`Command::Edit`]
    Edit,
    /// [`Command::Delete`]
    Delete,
    /// [`Command::Query`]
    Query,
    /// [`Command::Refresh`]
    Refresh,
    /// [`Command::Load`]
    Load,
    /// [`Command::SetStatus`]
    SetStatus,
    /// [`Command::Export`]
    Export,
    /// [`Command::Summary`]
    Summary,
}

impl CommandKind {
    /// Every kind
    pub const ALL: [CommandKind; 9] = [
        CommandKind::Add,
        CommandKind::Edit,
        CommandKind::Delete,
        CommandKind::Query,
        CommandKind::Refresh,
        CommandKind::Load,
        CommandKind::SetStatus,
        CommandKind::Export,
        CommandKind::Summary,
    ];

    /// Name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Add => "add",
            CommandKind::Edit => "edit",
            CommandKind::Delete => "delete",
            CommandKind::Query => "query",
            CommandKind::Refresh => "refresh",
            CommandKind::Load => "load",
            CommandKind::SetStatus => "set-status",
            CommandKind::Export => "export",
            CommandKind::Summary => "summary",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed result of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// New program stored
    Added(ProgramRecord),
    /// Program changed
    Updated(ProgramRecord),
    /// Program deleted
    Deleted(ProgramRecord),
    /// Confirmation refused; nothing deleted
    DeleteCancelled(ProgramId),
    /// Filtered list
    Listed(ProgramListView),
    /// Full list after clearing filters
    Refreshed(ProgramListView),
    /// Form prefill for editing
    Editing {
        /// Program being edited
        id: ProgramId,
        /// Current values
        draft: ProgramDraft,
    },
    /// Status advanced
    StatusChanged(ProgramRecord),
    /// Rendered export
    Exported {
        /// Format used
        format: ExportFormat,
        /// Programs included
        count: usize,
        /// Rendered document
        body: String,
    },
    /// Headline totals
    Summary(ProgramSummary),
}

impl CommandOutcome {
    /// Notification announcing this outcome, if it warrants one
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        match self {
            CommandOutcome::Added(_) => Some(Notification::success("Program added successfully!")),
            CommandOutcome::Updated(_) => {
                Some(Notification::success("Program updated successfully!"))
            }
            CommandOutcome::Deleted(_) => {
                Some(Notification::success("Program deleted successfully"))
            }
            CommandOutcome::DeleteCancelled(_) => Some(Notification::info("Deletion cancelled")),
            CommandOutcome::Refreshed(_) => {
                Some(Notification::success("Programs list refreshed"))
            }
            CommandOutcome::Editing { .. } => Some(Notification::info("Edit mode activated")),
            CommandOutcome::StatusChanged(record) => Some(Notification::success(format!(
                "Program marked as {}",
                record.status().label()
            ))),
            CommandOutcome::Exported { format, count, .. } => Some(Notification::success(
                format!(
                    "Exported {count} programs as {}",
                    format.as_str().to_ascii_uppercase()
                ),
            )),
            CommandOutcome::Listed(_) | CommandOutcome::Summary(_) => None,
        }
    }
}

/// Function executing one command kind
pub type Handler<S> = fn(&mut Console<S>, Command) -> Result<CommandOutcome, ConsoleError>;

/// Command kind → handler
pub struct HandlerTable<S> {
    handlers: HashMap<CommandKind, Handler<S>>,
}

impl<S: KeyValueStorage> HandlerTable<S> {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create table with the built-in handler for every kind
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register(CommandKind::Add, handle_add);
        table.register(CommandKind::Edit, handle_edit);
        table.register(CommandKind::Delete, handle_delete);
        table.register(CommandKind::Query, handle_query);
        table.register(CommandKind::Refresh, handle_refresh);
        table.register(CommandKind::Load, handle_load);
        table.register(CommandKind::SetStatus, handle_set_status);
        table.register(CommandKind::Export, handle_export);
        table.register(CommandKind::Summary, handle_summary);
        table
    }

    /// Register or replace the handler for `kind`
    pub fn register(&mut self, kind: CommandKind, handler: Handler<S>) {
        self.handlers.insert(kind, handler);
    }

    /// Remove the handler for `kind`
    #[inline]
    pub fn remove(&mut self, kind: CommandKind) -> bool {
        self.handlers.remove(&kind).is_some()
    }

    /// Handler for `kind`
    #[inline]
    #[must_use]
    pub fn get(&self, kind: CommandKind) -> Option<Handler<S>> {
        self.handlers.get(&kind).copied()
    }

    /// Check if `kind` has a handler
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: CommandKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Number of registered kinds
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handler is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<S: KeyValueStorage> Default for HandlerTable<S> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<S> fmt::Debug for HandlerTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

fn mismatched(command: &Command) -> ConsoleError {
    ConsoleError::UnregisteredCommand(command.kind())
}

fn handle_add<S: KeyValueStorage>(
    console: &mut Console<S>,
    command: Command,
) -> Result<CommandOutcome, ConsoleError> {
    let Command::Add(draft) = command else {
        return Err(mismatched(&command));
    };
    let record = console.store_mut().add(&draft)?;
    Ok(CommandOutcome::Added(record))
}

fn handle_edit<S: KeyValueStorage>(
    console: &mut Console<S>,
    command: Command,
) -> Result<CommandOutcome, ConsoleError> {
    let Command::Edit { id, draft } = command else {
        return Err(mismatched(&command));
    };
    let record = console.store_mut().update(&id, &draft)?;
    Ok(CommandOutcome::Updated(record))
}

fn handle_delete<S: KeyValueStorage>(
    console: &mut Console<S>,
    command: Command,
) -> Result<CommandOutcome, ConsoleError> {
    let Command::Delete { id } = command else {
        return Err(mismatched(&command));
    };
    if !console.confirm(DELETE_PROMPT) {
        return Ok(CommandOutcome::DeleteCancelled(id));
    }
    let record = console.store_mut().remove(&id)?;
    Ok(CommandOutcome::Deleted(record))
}

fn handle_query<S: KeyValueStorage>(
    console: &mut Console<S>,
    command: Command,
) -> Result<CommandOutcome, ConsoleError> {
    let Command::Query(query) = command else {
        return Err(mismatched(&command));
    };
    console.set_query(query);
    Ok(CommandOutcome::Listed(console.view()))
}

fn handle_refresh<S: KeyValueStorage>(
    console: &mut Console<S>,
    command: Command,
) -> Result<CommandOutcome, ConsoleError> {
    if command != Command::Refresh {
        return Err(mismatched(&command));
    }
    console.set_query(ProgramQuery::new());
    Ok(CommandOutcome::Refreshed(console.view()))
}

fn handle_load<S: KeyValueStorage>(
    console: &mut Console<S>,
    command: Command,
) -> Result<CommandOutcome, ConsoleError> {
    let Command::Load { id } = command else {
        return Err(mismatched(&command));
    };
    let draft = console
        .store()
        .get(&id)
        .map(ProgramDraft::from)
        .ok_or_else(|| tpa_store::StoreError::NotFound(id.clone()))?;
    Ok(CommandOutcome::Editing { id, draft })
}

fn handle_set_status<S: KeyValueStorage>(
    console: &mut Console<S>,
    command: Command,
) -> Result<CommandOutcome, ConsoleError> {
    let Command::SetStatus { id, status } = command else {
        return Err(mismatched(&command));
    };
    let record = console.store_mut().set_status(&id, status)?;
    Ok(CommandOutcome::StatusChanged(record))
}

fn handle_export<S: KeyValueStorage>(
    console: &mut Console<S>,
    command: Command,
) -> Result<CommandOutcome, ConsoleError> {
    let Command::Export { format, query } = command else {
        return Err(mismatched(&command));
    };
    let records = console.store().query(&query);
    let count = records.len();
    let body = export::export(records, format)?;
    Ok(CommandOutcome::Exported {
        format,
        count,
        body,
    })
}

fn handle_summary<S: KeyValueStorage>(
    console: &mut Console<S>,
    command: Command,
) -> Result<CommandOutcome, ConsoleError> {
    if command != Command::Summary {
        return Err(mismatched(&command));
    }
    Ok(CommandOutcome::Summary(ProgramSummary::from_records(
        console.store().records(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tpa_store::MemoryStorage;

    #[test]
    fn defaults_cover_every_kind() {
        let table = HandlerTable::<MemoryStorage>::with_defaults();
        assert_eq!(table.len(), CommandKind::ALL.len());
        for kind in CommandKind::ALL {
            assert!(table.contains(kind), "{kind}");
        }
    }

    #[test]
    fn kinds_match_variants() {
        assert_eq!(Command::Refresh.kind(), CommandKind::Refresh);
        assert_eq!(
            Command::Delete {
                id: ProgramId::new("x")
            }
            .kind(),
            CommandKind::Delete
        );
        assert_eq!(Command::Query(ProgramQuery::new()).kind(), CommandKind::Query);
    }

    #[test]
    fn listing_is_silent() {
        let outcome = CommandOutcome::Listed(ProgramListView::from_records(std::iter::empty()));
        assert_eq!(outcome.notification(), None);
    }
}

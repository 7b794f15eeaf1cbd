//! The console: store, collaborators and handler table in one place

use crate::command::{Command, CommandKind, CommandOutcome, Handler, HandlerTable};
use crate::confirm::Confirmation;
use crate::error::ConsoleError;
use crate::notify::{Notification, Notifier};
use crate::view::ProgramListView;
use std::fmt;
use tpa_store::{KeyValueStorage, LoadOutcome, ProgramQuery, ProgramStore, StoreConfig};

/// Message shown when persisted data could not be read at startup
pub const LOAD_ERROR_MESSAGE: &str = "Error loading programs";

/// Executes commands against a [`ProgramStore`]
///
/// Owns the store exclusively; every mutation goes through [`Console::dispatch`].
pub struct Console<S> {
    store: ProgramStore<S>,
    notifier: Box<dyn Notifier>,
    confirmation: Box<dyn Confirmation>,
    handlers: HandlerTable<S>,
    query: ProgramQuery,
}

impl<S: KeyValueStorage> Console<S> {
    /// Open the store and wire up collaborators
    ///
    /// Unreadable persisted data is reported through `notifier` and the
    /// console starts with an empty collection.
    ///
    /// # Errors
    /// Returns `ConsoleError::Store` if storage cannot be read at all
    pub fn open(
        storage: S,
        config: &StoreConfig,
        notifier: impl Notifier + 'static,
        confirmation: impl Confirmation + 'static,
    ) -> Result<Self, ConsoleError> {
        let (store, outcome) = ProgramStore::open(storage, config)?;
        let mut console = Self {
            store,
            notifier: Box::new(notifier),
            confirmation: Box::new(confirmation),
            handlers: HandlerTable::with_defaults(),
            query: ProgramQuery::new(),
        };
        console.report_load(&outcome);
        Ok(console)
    }

    /// Execute one command and announce the result
    ///
    /// # Errors
    /// Returns whatever the handler for the command's kind returns, or
    /// `ConsoleError::UnregisteredCommand` if the kind has no handler
    pub fn dispatch(&mut self, command: Command) -> Result<CommandOutcome, ConsoleError> {
        let kind = command.kind();
        tracing::debug!("Dispatching {} command", kind);

        let result = match self.handlers.get(kind) {
            Some(handler) => handler(self, command),
            None => Err(ConsoleError::UnregisteredCommand(kind)),
        };

        match &result {
            Ok(outcome) => {
                if let Some(notification) = outcome.notification() {
                    self.notifier.notify(notification);
                }
            }
            Err(e) => {
                tracing::warn!("{} command failed: {}", kind, e);
                self.notifier.notify(Notification::error(e.user_message()));
            }
        }
        result
    }

    /// Re-read the persisted collection
    ///
    /// # Errors
    /// Returns `ConsoleError::Store` if storage cannot be read
    pub fn reload(&mut self) -> Result<LoadOutcome, ConsoleError> {
        let outcome = self.store.load()?;
        self.report_load(&outcome);
        Ok(outcome)
    }

    /// Cards for the current query
    #[must_use]
    pub fn view(&self) -> ProgramListView {
        ProgramListView::from_records(self.store.query(&self.query))
    }

    /// Query applied by [`Console::view`]
    #[inline]
    #[must_use]
    pub fn query(&self) -> &ProgramQuery {
        &self.query
    }

    /// Register or replace the handler for `kind`
    pub fn register_handler(&mut self, kind: CommandKind, handler: Handler<S>) {
        self.handlers.register(kind, handler);
    }

    /// Handler table
    #[inline]
    #[must_use]
    pub fn handlers(&self) -> &HandlerTable<S> {
        &self.handlers
    }

    /// Mutable handler table
    #[inline]
    pub fn handlers_mut(&mut self) -> &mut HandlerTable<S> {
        &mut self.handlers
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &ProgramStore<S> {
        &self.store
    }

    /// Mutable underlying store, for handlers
    #[inline]
    pub fn store_mut(&mut self) -> &mut ProgramStore<S> {
        &mut self.store
    }

    /// Ask the confirmation collaborator
    pub fn confirm(&mut self, prompt: &str) -> bool {
        let answer = self.confirmation.confirm(prompt);
        tracing::debug!("Confirmation '{}' answered {}", prompt, answer);
        answer
    }

    pub(crate) fn set_query(&mut self, query: ProgramQuery) {
        self.query = query;
    }

    fn report_load(&mut self, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Recovered(corruption) => {
                tracing::warn!("Starting with no programs: {}", corruption);
                self.notifier.notify(Notification::error(LOAD_ERROR_MESSAGE));
            }
            LoadOutcome::Loaded { count } => tracing::info!("Loaded {} programs", count),
            LoadOutcome::Empty => tracing::info!("No stored programs"),
        }
    }
}

impl<S> fmt::Debug for Console<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("store", &self.store)
            .field("handlers", &self.handlers)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

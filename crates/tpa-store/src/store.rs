//! Program store - the single owner of the persisted collection
//!
//! Every mutation runs validate → mutate in memory → persist the whole
//! collection. If the persist step fails the in-memory change is undone, so
//! memory and storage never disagree.

use crate::codec;
use crate::config::StoreConfig;
use crate::error::{PersistenceError, StorageCorruptionError, StoreError};
use crate::query::ProgramQuery;
use crate::storage::KeyValueStorage;
use chrono::Utc;
use std::fmt;
use tpa_model::{
    ProgramDraft, ProgramId, ProgramRecord, ProgramStatus, ProgramValidator,
};
use ulid::{Generator, Ulid};

/// Result of reading the persisted collection
#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing stored under the key yet
    Empty,
    /// Collection read successfully
    Loaded {
        /// Number of records
        count: usize,
    },
    /// Stored data was unreadable; the collection starts empty
    Recovered(StorageCorruptionError),
}

impl LoadOutcome {
    /// Corruption that was recovered from, if any
    #[inline]
    #[must_use]
    pub fn corruption(&self) -> Option<&StorageCorruptionError> {
        match self {
            Self::Recovered(err) => Some(err),
            _ => None,
        }
    }

    /// Number of records now held
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Loaded { count } => *count,
            Self::Empty | Self::Recovered(_) => 0,
        }
    }
}

/// Validated, persisted, ordered collection of programs
///
/// Construct one per session; it exclusively owns its storage key.
pub struct ProgramStore<S> {
    storage: S,
    key: String,
    records: Vec<ProgramRecord>,
    validator: ProgramValidator,
    ids: Generator,
}

impl<S: KeyValueStorage> ProgramStore<S> {
    /// Create an empty, unloaded store
    #[must_use]
    pub fn new(storage: S, config: &StoreConfig) -> Self {
        Self {
            storage,
            key: config.storage_key.clone(),
            records: Vec::new(),
            validator: ProgramValidator::new(),
            ids: Generator::new(),
        }
    }

    /// Create a store and load the persisted collection
    ///
    /// # Errors
    /// Returns `StoreError::Persistence` if storage cannot be read
    pub fn open(storage: S, config: &StoreConfig) -> Result<(Self, LoadOutcome), StoreError> {
        let mut store = Self::new(storage, config);
        let outcome = store.load()?;
        Ok((store, outcome))
    }

    /// Replace the in-memory collection with the persisted one
    ///
    /// Unreadable data is not fatal: the collection becomes empty and the
    /// corruption is reported in [`LoadOutcome::Recovered`]. Stored bytes
    /// are left untouched until the next mutation rewrites them.
    ///
    /// # Errors
    /// Returns `StoreError::Persistence` if storage cannot be read
    pub fn load(&mut self) -> Result<LoadOutcome, StoreError> {
        let raw = self
            .storage
            .get(&self.key)
            .map_err(PersistenceError::Read)?;

        let Some(raw) = raw else {
            tracing::debug!("No programs stored under '{}'", self.key);
            self.records.clear();
            return Ok(LoadOutcome::Empty);
        };

        match codec::decode(&self.key, &raw) {
            Ok(records) => {
                let count = records.len();
                tracing::debug!("Loaded {} programs from '{}'", count, self.key);
                self.records = records;
                Ok(LoadOutcome::Loaded { count })
            }
            Err(corruption) => {
                tracing::warn!("Discarding unreadable program data: {}", corruption);
                self.records.clear();
                Ok(LoadOutcome::Recovered(corruption))
            }
        }
    }

    /// Validate and append a new scheduled program
    ///
    /// # Errors
    /// - `StoreError::Validation` with every violated rule; nothing changes
    /// - `StoreError::Persistence` if the write fails; nothing changes
    pub fn add(&mut self, draft: &ProgramDraft) -> Result<ProgramRecord, StoreError> {
        let details = self.validator.validate(draft)?;
        let id = self.next_id();
        let record = ProgramRecord::new(id, details, Utc::now());

        self.records.push(record.clone());
        if let Err(e) = self.persist() {
            self.records.pop();
            tracing::warn!("Rolled back add of '{}': {}", record.name(), e);
            return Err(e.into());
        }

        tracing::info!("Added program {} ('{}')", record.id(), record.name());
        Ok(record)
    }

    /// Replace the editable fields of an existing program
    ///
    /// `id`, `created_at` and `status` are preserved.
    ///
    /// # Errors
    /// - `StoreError::NotFound` if no program has `id`
    /// - `StoreError::Validation` with every violated rule; nothing changes
    /// - `StoreError::Persistence` if the write fails; nothing changes
    pub fn update(
        &mut self,
        id: &ProgramId,
        draft: &ProgramDraft,
    ) -> Result<ProgramRecord, StoreError> {
        let index = self.position(id)?;
        let details = self.validator.validate(draft)?;

        let previous = self.records[index].clone();
        self.records[index].replace_details(details);
        if let Err(e) = self.persist() {
            self.records[index] = previous;
            tracing::warn!("Rolled back update of {}: {}", id, e);
            return Err(e.into());
        }

        tracing::info!("Updated program {}", id);
        Ok(self.records[index].clone())
    }

    /// Delete a program
    ///
    /// Strict: removing an id that is not present (including one already
    /// removed) is `NotFound`.
    ///
    /// # Errors
    /// - `StoreError::NotFound` if no program has `id`
    /// - `StoreError::Persistence` if the write fails; nothing changes
    pub fn remove(&mut self, id: &ProgramId) -> Result<ProgramRecord, StoreError> {
        let index = self.position(id)?;

        let removed = self.records.remove(index);
        if let Err(e) = self.persist() {
            self.records.insert(index, removed);
            tracing::warn!("Rolled back removal of {}: {}", id, e);
            return Err(e.into());
        }

        tracing::info!("Removed program {}", id);
        Ok(removed)
    }

    /// Advance a program's lifecycle status
    ///
    /// # Errors
    /// - `StoreError::NotFound` if no program has `id`
    /// - `StoreError::InvalidTransition` unless `status` is later than the
    ///   current one
    /// - `StoreError::Persistence` if the write fails; nothing changes
    pub fn set_status(
        &mut self,
        id: &ProgramId,
        status: ProgramStatus,
    ) -> Result<ProgramRecord, StoreError> {
        let index = self.position(id)?;
        let current = self.records[index].status();
        if !current.can_advance_to(status) {
            return Err(StoreError::InvalidTransition {
                id: id.clone(),
                from: current,
                to: status,
            });
        }

        self.records[index].set_status(status);
        if let Err(e) = self.persist() {
            self.records[index].set_status(current);
            tracing::warn!("Rolled back status change of {}: {}", id, e);
            return Err(e.into());
        }

        tracing::info!("Program {} is now {}", id, status);
        Ok(self.records[index].clone())
    }

    /// Records matching `query`, in collection order
    #[must_use]
    pub fn query(&self, query: &ProgramQuery) -> Vec<&ProgramRecord> {
        let hits: Vec<&ProgramRecord> =
            self.records.iter().filter(|r| query.matches(r)).collect();
        tracing::debug!("Query matched {} of {} programs", hits.len(), self.records.len());
        hits
    }

    /// Look up one program
    #[inline]
    #[must_use]
    pub fn get(&self, id: &ProgramId) -> Option<&ProgramRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Whole collection, in insertion order
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[ProgramRecord] {
        &self.records
    }

    /// Number of programs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the collection is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Storage key the collection lives under
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the backend
    #[inline]
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the backend
    #[inline]
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, id: &ProgramId) -> Result<usize, StoreError> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn persist(&mut self) -> Result<(), PersistenceError> {
        let encoded = codec::encode(&self.records)?;
        self.storage.set(&self.key, &encoded).map_err(|e| {
            tracing::error!("Failed to persist {} programs: {}", self.records.len(), e);
            PersistenceError::Write(e)
        })
    }

    /// Monotonic ULID not already used by a loaded record
    fn next_id(&mut self) -> ProgramId {
        loop {
            let ulid = self.ids.generate().unwrap_or_else(|_| Ulid::new());
            let id = ProgramId::from_ulid(ulid);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

impl<S> fmt::Debug for ProgramStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramStore")
            .field("key", &self.key)
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

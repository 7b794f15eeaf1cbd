//! File-backed key-value storage
//!
//! One file per key, `<dir>/<key>.json`. Writes go to a temporary file in
//! the same directory and are then renamed over the target, so a reader
//! sees either the old or the new value, never a torn one.

use crate::config::StoreConfig;
use crate::error::StorageError;
use crate::storage::KeyValueStorage;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Directory of JSON files, one per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write
    #[inline]
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted at `config.data_dir`
    ///
    /// `quota_bytes` does not apply; the filesystem sets the limit.
    #[inline]
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.data_dir.clone())
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`
    ///
    /// # Errors
    /// Returns error if `key` is empty or could escape the directory
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io_error(path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io_error(&self.dir, e))?;

        let mut temp =
            NamedTempFile::new_in(&self.dir).map_err(|e| StorageError::io_error(&self.dir, e))?;
        temp.write_all(value.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| StorageError::io_error(temp.path(), e))?;
        temp.persist(&path)
            .map_err(|e| StorageError::io_error(&path, e.error))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io_error(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get("trainingPrograms").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("data").join("tpa");
        let mut storage = FileStorage::new(&nested);

        storage.set("trainingPrograms", "[]").unwrap();

        let on_disk = fs::read_to_string(nested.join("trainingPrograms.json")).unwrap();
        assert_eq!(on_disk, "[]");
        assert_eq!(storage.get("trainingPrograms").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn set_replaces_previous_value() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.set("k", "first").unwrap();
        storage.set("k", "second").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("second"));
        // no temp files left behind
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn rejects_path_like_keys() {
        let storage = FileStorage::new("/tmp");
        for key in ["", "../etc", "a/b", ".hidden", "a\\b"] {
            assert!(
                matches!(storage.path_for(key), Err(StorageError::InvalidKey(_))),
                "{key}"
            );
        }
    }

    #[test]
    fn remove_missing_is_ok() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.remove("nothing").unwrap();
        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}

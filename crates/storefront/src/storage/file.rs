//! File-backed storage.
//!
//! All keys live in one JSON object in `<data_dir>/local-storage.json`. The
//! file is read once when opened; every write replaces it in full by writing a
//! sibling temp file and renaming it over the original.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::{KeyValueStore, StorageError};

/// File name inside the data directory.
pub const FILE_NAME: &str = "local-storage.json";

/// Durable storage in a single JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or create) the storage file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created or the
    /// file cannot be read. A file that is not a JSON object of strings is
    /// moved aside and the store starts empty.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(FILE_NAME);

        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    quarantine(&path, &e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(path = %path.display(), keys = entries.len(), "Opened local storage");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        if let Err(e) = self.write_file(entries) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to write local storage"
            );
        }
    }

    fn write_file(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Path a corrupt storage file is moved to.
#[must_use]
fn corrupt_path(path: &Path) -> PathBuf {
    path.with_extension("json.corrupt")
}

fn quarantine(path: &Path, error: &serde_json::Error) {
    let target = corrupt_path(path);
    match fs::rename(path, &target) {
        Ok(()) => tracing::warn!(
            path = %path.display(),
            moved_to = %target.display(),
            error = %error,
            "Local storage file is corrupt; starting empty"
        ),
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %error,
            rename_error = %e,
            "Local storage file is corrupt and could not be moved aside; starting empty"
        ),
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

//! File-backed session storage.
//!
//! Each key is a file in a session directory. Writes follow the
//! write-to-temp-then-rename pattern so readers see either the old or the new
//! value, never a partial one.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{SessionStorage, StorageError, StorageResult};

/// Helper to attach context to an IO error.
fn io_error(context: impl std::fmt::Display, err: &std::io::Error) -> StorageError {
    StorageError::Io(format!("{context}: {err}"))
}

/// Session storage keeping one file per key in a directory.
///
/// The session lasts as long as the directory does; callers pick a directory whose
/// lifetime matches the session they want (e.g. a per-user cache directory).
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    directory: PathBuf,
}

impl FileSessionStorage {
    /// Creates a store in `directory`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(directory: P) -> StorageResult<Self> {
        let directory = directory.as_ref().to_path_buf();

        fs::create_dir_all(&directory).map_err(|e| {
            io_error(
                format!("failed to create session directory '{}'", directory.display()),
                &e,
            )
        })?;

        Ok(Self { directory })
    }

    /// The directory holding the session files.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn value_path(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if !valid {
            return Err(StorageError::Backend(format!(
                "invalid session storage key '{key}'"
            )));
        }

        Ok(self.directory.join(key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!(".{key}.tmp"))
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: String) -> StorageResult<Option<String>> {
        let path = self.value_path(&key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(format!("failed to read '{}'", path.display()), &e)),
        }
    }

    fn set(&self, key: String, value: String) -> StorageResult<()> {
        let final_path = self.value_path(&key)?;
        let temp_path = self.temp_path(&key);

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| {
                io_error(
                    format!("failed to create temporary file '{}'", temp_path.display()),
                    &e,
                )
            })?;

        file.write_all(value.as_bytes()).map_err(|e| {
            io_error(
                format!("failed to write temporary file '{}'", temp_path.display()),
                &e,
            )
        })?;
        file.sync_all()
            .map_err(|e| io_error("failed to sync temporary file", &e))?;
        drop(file);

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            io_error(
                format!(
                    "failed to rename '{}' to '{}'",
                    temp_path.display(),
                    final_path.display()
                ),
                &e,
            )
        })
    }

    fn remove(&self, key: String) -> StorageResult<()> {
        let path = self.value_path(&key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(format!("failed to remove '{}'", path.display()), &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();

        let storage = FileSessionStorage::new(dir.path()).unwrap();
        storage.set("Identity".to_string(), "{\"id\":1}".to_string()).unwrap();

        let reopened = FileSessionStorage::new(dir.path()).unwrap();
        assert_eq!(
            reopened.get("Identity".to_string()).unwrap().as_deref(),
            Some("{\"id\":1}")
        );
        assert!(!dir.path().join(".Identity.tmp").exists());
    }

    #[test]
    fn test_missing_key_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("nested")).unwrap();

        assert_eq!(storage.get("Identity".to_string()).unwrap(), None);
        storage.remove("Identity".to_string()).unwrap();

        storage.set("Identity".to_string(), "x".to_string()).unwrap();
        storage.remove("Identity".to_string()).unwrap();
        assert_eq!(storage.get("Identity".to_string()).unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                storage.set(key.to_string(), "x".to_string()).is_err(),
                "key {key:?} should be rejected"
            );
        }
    }
}

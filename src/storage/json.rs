//! JSON file email store
//!
//! The file holds a single JSON array of address strings, pretty-printed.

use crate::storage::traits::{EmailStore, StoreResult};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Email store backed by a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonEmailStore {
    path: PathBuf,
}

impl JsonEmailStore {
    /// Creates a store for the given file path
    ///
    /// Nothing is read or created until [`EmailStore::load`] or
    /// [`EmailStore::save`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EmailStore for JsonEmailStore {
    fn load(&self) -> StoreResult<Vec<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "Email store {} does not exist yet, starting empty",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let emails: Vec<String> = serde_json::from_str(&contents)?;
        tracing::debug!(
            "Loaded {} emails from {}",
            emails.len(),
            self.path.display()
        );
        Ok(emails)
    }

    fn save(&mut self, emails: &[String]) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(emails)?;

        // Write beside the target and rename, so readers never see a partial file
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(json.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!("Saved {} emails to {}", emails.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreError;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonEmailStore::new(dir.path().join("emails.json"));

        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let mut store = JsonEmailStore::new(dir.path().join("nested/emails.json"));

        let emails = vec!["a@example.com".to_string(), "b@example.com".to_string()];
        store.save(&emails).unwrap();

        assert_eq!(store.load().unwrap(), emails);
    }

    #[test]
    fn test_reads_plain_json_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("emails.json");
        fs::write(&path, r#"["x@example.com","y@example.org"]"#).unwrap();

        let store = JsonEmailStore::new(&path);
        assert_eq!(store.load().unwrap(), vec!["x@example.com", "y@example.org"]);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("emails.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonEmailStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("emails.json");
        fs::write(&path, r#"{"emails": []}"#).unwrap();

        let store = JsonEmailStore::new(&path);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_save_replaces_whole_file_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("emails.json");
        fs::write(&path, "[\"stale@example.com\", \"more@example.com\"]").unwrap();

        let mut store = JsonEmailStore::new(&path);
        store.save(&["fresh@example.com".to_string()]).unwrap();

        assert_eq!(store.load().unwrap(), vec!["fresh@example.com"]);
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_save_leaves_directory_untouched() {
        let dir = tempdir().unwrap();
        let mut store = JsonEmailStore::new(dir.path().join("emails.json"));
        store.save(&["kept@example.com".to_string()]).unwrap();

        // A non-empty directory where the file should go makes the rename fail
        let blocker = dir.path().join("blocked.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("inner"), "x").unwrap();
        let mut blocked = JsonEmailStore::new(&blocker);
        assert!(blocked.save(&["lost@example.com".to_string()]).is_err());

        assert_eq!(store.load().unwrap(), vec!["kept@example.com"]);
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 2);
    }
}

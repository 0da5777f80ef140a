use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::models::Collection;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Snapshot persistence: one JSON array per collection, always rewritten whole
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("lifeos"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize storage directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.base_path.join(collection.file_name())
    }

    /// Read every record of a collection. A collection that was never
    /// written reads as empty.
    pub fn read_all<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let records: Vec<T> = serde_json::from_str(&content)?;
        Ok(records)
    }

    /// Move an unreadable collection file to `<name>.json.corrupt` so the
    /// next write does not replace it. Returns where the file went.
    pub fn set_aside(&self, collection: Collection) -> Result<PathBuf> {
        let path = self.collection_path(collection);
        let target = path.with_extension("json.corrupt");
        fs::rename(&path, &target)?;
        Ok(target)
    }

    /// Discard the previous contents of a collection and store `records`.
    pub fn replace_all<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;

        let path = self.collection_path(collection);
        let content = serde_json::to_string_pretty(records)?;

        // Atomic write: temp file + rename
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        log::debug!("Wrote {} records to {}", records.len(), collection);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        label: String,
    }

    fn create_test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("data"));
        storage.init().unwrap();
        (storage, temp_dir)
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: "1".to_string(), label: "one".to_string() },
            Item { id: "2".to_string(), label: "two".to_string() },
        ]
    }

    #[test]
    fn test_read_unwritten_collection_is_empty() {
        let (storage, _temp) = create_test_storage();
        let read: Vec<Item> = storage.read_all(Collection::Books).unwrap();
        assert!(read.is_empty());
    }

    #[test]
    fn test_replace_all_discards_previous_records() {
        let (storage, _temp) = create_test_storage();
        storage.replace_all(Collection::Movies, &items()).unwrap();

        let only = vec![Item { id: "3".to_string(), label: "three".to_string() }];
        storage.replace_all(Collection::Movies, &only).unwrap();

        let read: Vec<Item> = storage.read_all(Collection::Movies).unwrap();
        assert_eq!(read, only);
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let (storage, _temp) = create_test_storage();
        storage.replace_all(Collection::Todos, &items()).unwrap();

        let path = storage.base_path().join("todos.json");
        let before = fs::read_to_string(&path).unwrap();

        let read: Vec<Item> = storage.read_all(Collection::Todos).unwrap();
        storage.replace_all(Collection::Todos, &read).unwrap();

        let after = fs::read_to_string(&path).unwrap();
        assert_eq!(before, after);
        let reread: Vec<Item> = storage.read_all(Collection::Todos).unwrap();
        assert_eq!(reread, items());
    }

    #[test]
    fn test_collections_are_independent() {
        let (storage, _temp) = create_test_storage();
        storage.replace_all(Collection::Books, &items()).unwrap();

        let archive: Vec<Item> = storage.read_all(Collection::Archive).unwrap();
        assert!(archive.is_empty());
        assert!(!storage.base_path().join("books.json.tmp").exists());
    }

    #[test]
    fn test_set_aside_keeps_corrupt_contents() {
        let (storage, temp) = create_test_storage();
        fs::write(temp.path().join("movies.json"), "not json").unwrap();

        let moved = storage.set_aside(Collection::Movies).unwrap();
        assert_eq!(moved, temp.path().join("movies.json.corrupt"));
        assert_eq!(fs::read_to_string(&moved).unwrap(), "not json");

        let records: Vec<Item> = storage.read_all(Collection::Movies).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_corrupt_collection_is_an_error() {
        let (storage, _temp) = create_test_storage();
        fs::write(storage.base_path().join("courses.json"), "{not json").unwrap();

        let result: Result<Vec<Item>> = storage.read_all(Collection::Courses);
        assert!(matches!(result, Err(StorageError::Json(_))));
    }
}

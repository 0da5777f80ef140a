//! In-memory authoritative copy of one collection
//!
//! Every mutation rewrites the in-memory list and then persists the whole
//! list. Persistence is best-effort: a failed read starts the collection
//! empty, a failed write is logged and the in-memory list stays the truth
//! until the next successful write. A file that no longer parses is moved
//! to `<name>.json.corrupt` first.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::file_storage::{FileStorage, Result, StorageError};
use super::models::{Collection, Record};

pub struct CollectionStore<T> {
    storage: FileStorage,
    collection: Collection,
    items: Vec<T>,
}

impl<T> CollectionStore<T>
where
    T: Record + Clone + Serialize + DeserializeOwned,
{
    /// Load a collection from storage
    pub fn open(storage: FileStorage, collection: Collection) -> Self {
        let items = match storage.read_all(collection) {
            Ok(items) => items,
            Err(StorageError::Json(e)) => {
                match storage.set_aside(collection) {
                    Ok(moved) => log::warn!(
                        "Could not parse {} collection, starting empty (kept as {}): {}",
                        collection,
                        moved.display(),
                        e
                    ),
                    Err(move_err) => log::warn!(
                        "Could not parse {} collection, starting empty: {} (move failed: {})",
                        collection,
                        e,
                        move_err
                    ),
                }
                Vec::new()
            }
            Err(e) => {
                log::warn!("Could not read {} collection, starting empty: {}", collection, e);
                Vec::new()
            }
        };

        Self {
            storage,
            collection,
            items,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Records in display order (newest first)
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Prepend a new record and persist
    pub fn create(&mut self, item: T) -> T {
        self.items.insert(0, item.clone());
        self.persist();
        item
    }

    /// Replace the record matching `id` with the result of `f` and persist
    pub fn update<F>(&mut self, id: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut T),
    {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| StorageError::NotFound(format!("{} record {}", self.collection, id)))?;

        f(item);
        let updated = item.clone();
        self.persist();
        Ok(updated)
    }

    /// Remove the record matching `id` and persist
    pub fn delete(&mut self, id: &str) -> Result<T> {
        let idx = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| StorageError::NotFound(format!("{} record {}", self.collection, id)))?;

        let removed = self.items.remove(idx);
        self.persist();
        Ok(removed)
    }

    /// Swap in a whole new list and persist
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.persist();
    }

    /// Write the in-memory list back. Returns whether the write landed.
    pub fn persist(&self) -> bool {
        match self.storage.replace_all(self.collection, &self.items) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save {} collection: {}", self.collection, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
    }

    impl Record for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    fn create_test_store() -> (CollectionStore<Note>, FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        let store = CollectionStore::open(storage.clone(), Collection::Todos);
        (store, storage, temp_dir)
    }

    #[test]
    fn test_create_prepends_and_persists() {
        let (mut store, storage, _temp) = create_test_store();
        store.create(note("a", "first"));
        store.create(note("b", "second"));

        let ids: Vec<&str> = store.items().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let on_disk: Vec<Note> = storage.read_all(Collection::Todos).unwrap();
        assert_eq!(on_disk, store.items());
    }

    #[test]
    fn test_update_and_delete() {
        let (mut store, storage, _temp) = create_test_store();
        store.create(note("a", "first"));
        store.create(note("b", "second"));

        let updated = store.update("a", |n| n.text = "edited".to_string()).unwrap();
        assert_eq!(updated.text, "edited");

        store.delete("b").unwrap();
        let on_disk: Vec<Note> = storage.read_all(Collection::Todos).unwrap();
        assert_eq!(on_disk, vec![note("a", "edited")]);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let (mut store, _storage, _temp) = create_test_store();
        assert!(matches!(
            store.update("missing", |_| {}),
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(store.delete("missing"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_replace_round_trips_through_storage() {
        let (mut store, storage, _temp) = create_test_store();
        store.create(note("a", "first"));
        store.replace(vec![note("c", "third"), note("d", "fourth")]);

        let reopened: CollectionStore<Note> = CollectionStore::open(storage.clone(), Collection::Todos);
        assert_eq!(reopened.items(), store.items());
    }

    #[test]
    fn test_independent_instances_coexist() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let mut a: CollectionStore<Note> =
            CollectionStore::open(FileStorage::new(first.path().to_path_buf()), Collection::Books);
        let b: CollectionStore<Note> =
            CollectionStore::open(FileStorage::new(second.path().to_path_buf()), Collection::Books);

        a.create(note("x", "only in a"));
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }

    #[test]
    fn test_unreadable_collection_opens_empty() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("todos.json"), "[{\"broken\"").unwrap();

        let mut store: CollectionStore<Note> =
            CollectionStore::open(FileStorage::new(temp_dir.path().to_path_buf()), Collection::Todos);
        assert!(store.is_empty());

        // The next write starts a fresh file and leaves the broken one intact
        store.create(note("a", "after recovery"));
        let kept = fs::read_to_string(temp_dir.path().join("todos.json.corrupt")).unwrap();
        assert_eq!(kept, "[{\"broken\"");
        let reopened: CollectionStore<Note> =
            CollectionStore::open(FileStorage::new(temp_dir.path().to_path_buf()), Collection::Todos);
        assert_eq!(reopened.items(), &[note("a", "after recovery")]);
    }

    #[test]
    fn test_failed_write_keeps_memory_authoritative() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the data directory should be makes every write fail
        let blocked = temp_dir.path().join("blocked");
        fs::write(&blocked, "not a directory").unwrap();

        let mut store: CollectionStore<Note> =
            CollectionStore::open(FileStorage::new(blocked), Collection::Todos);
        store.create(note("a", "kept in memory"));

        assert_eq!(store.items(), &[note("a", "kept in memory")]);
        assert!(!store.persist());
    }
}

pub mod archive;
pub mod config;
pub mod courses;
pub mod ingest;
pub mod library;
pub mod movies;
pub mod search;
pub mod storage;
pub mod study;
pub mod todos;

use std::path::PathBuf;

use archive::ArchiveStorage;
use config::AppConfig;
use courses::CourseStorage;
use library::BookStorage;
use movies::MovieStorage;
use storage::FileStorage;
use study::SessionStorage;
use todos::TodoStorage;

/// Every collection store, opened once at startup
pub struct AppState {
    pub config: AppConfig,
    pub storage: FileStorage,
    pub books: BookStorage,
    pub movies: MovieStorage,
    pub sessions: SessionStorage,
    pub archive: ArchiveStorage,
    pub todos: TodoStorage,
    pub courses: CourseStorage,
}

impl AppState {
    /// Create the data directory if needed and load each collection
    pub fn open(config: AppConfig, data_dir: PathBuf) -> storage::Result<Self> {
        let storage = FileStorage::new(data_dir);
        storage.init()?;
        log::debug!("Opening collections in {}", storage.base_path().display());

        Ok(Self {
            books: BookStorage::new(storage.clone()),
            movies: MovieStorage::new(storage.clone()),
            sessions: SessionStorage::new(storage.clone()),
            archive: ArchiveStorage::new(storage.clone()),
            todos: TodoStorage::new(storage.clone()),
            courses: CourseStorage::new(storage.clone(), config.max_upload_bytes),
            storage,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_data_dir() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("nested").join("lifeos");
        let mut state = AppState::open(AppConfig::default(), data_dir.clone()).unwrap();
        assert!(data_dir.is_dir());

        state.todos.add_todo("water plants").unwrap();
        assert!(data_dir.join("todos.json").exists());
        assert!(!data_dir.join("books.json").exists());
    }
}

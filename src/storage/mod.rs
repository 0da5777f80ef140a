mod collection;
mod file_storage;
mod models;

pub use collection::CollectionStore;
pub use file_storage::{FileStorage, Result, StorageError};
pub use models::*;

//! Personal archive of tagged notes, links and attached documents

mod models;
mod storage;

pub use models::{ArchiveItem, CreateArchiveItemRequest, YearCount};
pub use storage::ArchiveStorage;

//! Courses module
//!
//! Courses with an embedded file/folder tree for notes and material.

mod models;
mod navigator;
mod storage;
pub mod tree;

pub use models::{Course, CreateCourseRequest, FileSystemNode, NodeKind};
pub use navigator::{PathSegment, TreePath};
pub use storage::{CourseStorage, UploadRejection, UploadReport};

use crate::ingest::IngestError;
use crate::storage::StorageError;

/// Error type for course operations
#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("No file or folder named or with id '{0}'")]
    NodeNotFound(String),

    #[error("'{0}' is not a folder")]
    NotAFolder(String),

    #[error("'{0}' is a folder")]
    NotAFile(String),

    #[error("More than one folder is named '{0}'")]
    AmbiguousName(String),

    #[error("The folder at {0} no longer exists")]
    StalePath(String),

    #[error("Invalid input: {0}")]
    Validation(String),
}

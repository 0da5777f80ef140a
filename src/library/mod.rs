//! Library module
//!
//! The personal book library: what is on the shelf and how far along it is.

mod models;
mod storage;

pub use models::{Book, BookStatus, BookType, CreateBookRequest, LibraryStats};
pub use storage::BookStorage;

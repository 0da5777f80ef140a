//! Movie watchlist

mod models;
mod storage;

pub use models::{CreateMovieRequest, Movie, WatchStats};
pub use storage::MovieStorage;

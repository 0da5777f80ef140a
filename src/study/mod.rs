//! Study room: timed sessions and the statistics derived from them

mod models;
pub mod stats;
mod storage;
pub mod timer;

pub use models::{RecordSessionRequest, StudyMode, StudySession};
pub use storage::SessionStorage;
pub use timer::StudyTimer;

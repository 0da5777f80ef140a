use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Logical collection names, one snapshot file each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Books,
    Movies,
    Sessions,
    Courses,
    Archive,
    Todos,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Books,
        Collection::Movies,
        Collection::Sessions,
        Collection::Courses,
        Collection::Archive,
        Collection::Todos,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Books => "books",
            Collection::Movies => "movies",
            Collection::Sessions => "sessions",
            Collection::Courses => "courses",
            Collection::Archive => "archive",
            Collection::Todos => "todos",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored record with a stable string identifier
pub trait Record {
    fn id(&self) -> &str;
}

/// Generate a fresh record identifier.
///
/// Millisecond timestamp followed by eight hex digits of a v4 UUID, so two
/// records created within the same millisecond still get distinct ids.
pub fn new_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}", Utc::now().timestamp_millis(), &suffix[..8])
}

/// Trim an optional text field, dropping it when blank
pub fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Current time at the millisecond precision records are stored with
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{new_id, now_millis, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudyMode {
    Pomodoro,
    Stopwatch,
}

impl StudyMode {
    pub fn label(&self) -> &'static str {
        match self {
            StudyMode::Pomodoro => "Pomodoro",
            StudyMode::Stopwatch => "Stopwatch",
        }
    }
}

/// One finished study session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    /// When the session was saved
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    pub duration_seconds: u64,
    pub mode: StudyMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// First tag is the primary one used for grouping
    #[serde(default)]
    pub tags: Vec<String>,
}

impl StudySession {
    pub fn new(duration_seconds: u64, mode: StudyMode, tags: Vec<String>) -> Self {
        Self {
            id: new_id(),
            date: now_millis(),
            duration_seconds,
            mode,
            notes: None,
            tags,
        }
    }

    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }
}

impl Record for StudySession {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSessionRequest {
    pub duration_seconds: u64,
    pub mode: Option<StudyMode>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

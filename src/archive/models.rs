use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::EncodedFile;
use crate::storage::{new_id, now_millis, Record};

pub const DEFAULT_CATEGORY: &str = "General";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A tagged note, link or document kept in the archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveItem {
    pub id: String,
    pub title: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Attachment as a data URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl ArchiveItem {
    /// Manual year if set, else the local year the item was created
    pub fn effective_year(&self) -> i32 {
        self.year
            .unwrap_or_else(|| self.created_at.with_timezone(&Local).year())
    }

    pub fn has_attachment(&self) -> bool {
        self.file_data.is_some()
    }

    pub fn attach(&mut self, file: EncodedFile) {
        self.file_name = Some(file.name);
        self.file_size = Some(file.size);
        self.file_data = Some(file.data_url);
    }
}

impl Record for ArchiveItem {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateArchiveItemRequest {
    pub title: String,
    pub category: Option<String>,
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub year: Option<i32>,
    pub url: Option<String>,
    pub attachment: Option<EncodedFile>,
}

impl ArchiveItem {
    pub fn new(request: CreateArchiveItemRequest) -> Self {
        let mut item = Self {
            id: new_id(),
            title: request.title,
            category: request.category.unwrap_or_else(default_category),
            content: request.content,
            tags: request.tags,
            created_at: now_millis(),
            year: request.year,
            url: request.url,
            file_data: None,
            file_name: None,
            file_size: None,
        };
        if let Some(file) = request.attachment {
            item.attach(file);
        }
        item
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

//! Book library data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{new_id, now_millis, Record};

/// Physical copy or e-book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookType {
    #[default]
    Physical,
    #[serde(rename = "E-Book")]
    EBook,
}

/// Reading status. Turkish labels written by older data files are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookStatus {
    #[default]
    #[serde(alias = "Okunmadı")]
    Unread,
    #[serde(alias = "Okunuyor")]
    Reading,
    #[serde(alias = "Okundu")]
    Read,
}

impl BookStatus {
    pub const ALL: [BookStatus; 3] = [BookStatus::Unread, BookStatus::Reading, BookStatus::Read];

    pub fn label(&self) -> &'static str {
        match self {
            BookStatus::Unread => "Unread",
            BookStatus::Reading => "Reading",
            BookStatus::Read => "Read",
        }
    }
}

/// A book in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(rename = "type", default)]
    pub book_type: BookType,
    #[serde(default)]
    pub status: BookStatus,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl Record for Book {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Request to add a book, from the manual form or a search candidate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i32>,
    #[serde(default)]
    pub book_type: BookType,
    #[serde(default)]
    pub status: BookStatus,
    pub cover_url: Option<String>,
}

impl Book {
    pub fn new(request: CreateBookRequest) -> Self {
        Self {
            id: new_id(),
            title: request.title,
            author: request.author,
            isbn: request.isbn,
            publisher: request.publisher,
            year: request.year,
            book_type: request.book_type,
            status: request.status,
            added_at: now_millis(),
            cover_url: request.cover_url,
        }
    }
}

/// Book counts per reading status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub total: usize,
    pub unread: usize,
    pub reading: usize,
    pub read: usize,
}

use serde::{Deserialize, Serialize};

use crate::storage::{new_id, Record};

pub const DEFAULT_GENRE: &str = "General";

fn default_genre() -> String {
    DEFAULT_GENRE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default = "default_genre")]
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default)]
    pub watched: bool,
    /// 1 to 5 stars once rated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl Record for Movie {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    pub title: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub poster_url: Option<String>,
}

impl Movie {
    pub fn new(request: CreateMovieRequest) -> Self {
        Self {
            id: new_id(),
            title: request.title,
            genre: request.genre.unwrap_or_else(default_genre),
            year: request.year,
            director: request.director,
            watched: false,
            rating: None,
            poster_url: request.poster_url,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchStats {
    pub total: usize,
    pub watched: usize,
    pub to_watch: usize,
}

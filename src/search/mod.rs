//! Online lookup of books and movies
//!
//! The rest of the crate sees search only through [`SearchAdapter`]; the
//! Gemini client is one implementation of it.

mod gemini;
mod models;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiClient;
pub use models::{BookCandidate, Candidate, ContentKind, MovieCandidate};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("No API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Search service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[async_trait]
pub trait SearchAdapter: Send + Sync {
    /// Look up candidates for `query`. A blank query returns nothing.
    async fn search(&self, query: &str, kind: ContentKind) -> Result<Vec<Candidate>>;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// Adapter returning canned candidates
    pub struct MockSearch {
        pub candidates: Vec<Candidate>,
    }

    #[async_trait]
    impl SearchAdapter for MockSearch {
        async fn search(&self, query: &str, kind: ContentKind) -> Result<Vec<Candidate>> {
            if query.trim().is_empty() {
                return Ok(Vec::new());
            }
            Ok(self
                .candidates
                .iter()
                .filter(|c| {
                    matches!(
                        (c, kind),
                        (Candidate::Book(_), ContentKind::Book)
                            | (Candidate::Movie(_), ContentKind::Movie)
                    )
                })
                .cloned()
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockSearch;
    use super::*;
    use crate::library::BookStorage;
    use crate::storage::FileStorage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_candidate_flows_into_library() {
        let adapter: Box<dyn SearchAdapter> = Box::new(MockSearch {
            candidates: vec![
                Candidate::Book(BookCandidate {
                    title: "Dune".to_string(),
                    author: Some("Frank Herbert".to_string()),
                    ..Default::default()
                }),
                Candidate::Movie(MovieCandidate {
                    title: "Dune".to_string(),
                    ..Default::default()
                }),
            ],
        });

        assert!(adapter.search("  ", ContentKind::Book).await.unwrap().is_empty());

        let results = adapter.search("dune", ContentKind::Book).await.unwrap();
        assert_eq!(results.len(), 1);

        let temp = TempDir::new().unwrap();
        let mut books = BookStorage::new(FileStorage::new(temp.path().to_path_buf()));
        let Candidate::Book(candidate) = results[0].clone() else {
            panic!("expected a book candidate");
        };
        let book = books.add_candidate(candidate).unwrap();
        assert_eq!(book.author, "Frank Herbert");
    }
}

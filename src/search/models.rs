use serde::{Deserialize, Deserializer, Serialize};

use crate::library::CreateBookRequest;
use crate::movies::CreateMovieRequest;

/// What an online search looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Book,
    Movie,
}

/// Years come back as numbers, sometimes fractional, sometimes as strings
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().map(|y| y.trunc() as i32),
        Some(serde_json::Value::String(s)) => s.trim().get(..4).and_then(|y| y.parse().ok()),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCandidate {
    #[serde(default)]
    pub title: String,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    pub publisher: Option<String>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCandidate {
    #[serde(default)]
    pub title: String,
    pub director: Option<String>,
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    pub poster_url: Option<String>,
}

/// A search result the user may add to a collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Candidate {
    Book(BookCandidate),
    Movie(MovieCandidate),
}

impl Candidate {
    pub fn title(&self) -> &str {
        match self {
            Candidate::Book(b) => &b.title,
            Candidate::Movie(m) => &m.title,
        }
    }

    /// One-line description for listings
    pub fn summary(&self) -> String {
        let (who, year) = match self {
            Candidate::Book(b) => (b.author.as_deref(), b.year),
            Candidate::Movie(m) => (m.director.as_deref(), m.year),
        };
        let mut line = self.title().to_string();
        if let Some(who) = who {
            line.push_str(&format!(" - {}", who));
        }
        if let Some(year) = year {
            line.push_str(&format!(" ({})", year));
        }
        line
    }
}

impl From<BookCandidate> for CreateBookRequest {
    fn from(candidate: BookCandidate) -> Self {
        CreateBookRequest {
            title: candidate.title,
            author: candidate.author.unwrap_or_default(),
            publisher: candidate.publisher,
            year: candidate.year,
            cover_url: candidate.cover_url,
            ..Default::default()
        }
    }
}

impl From<MovieCandidate> for CreateMovieRequest {
    fn from(candidate: MovieCandidate) -> Self {
        CreateMovieRequest {
            title: candidate.title,
            genre: candidate.genre,
            year: candidate.year,
            director: candidate.director,
            poster_url: candidate.poster_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_year() {
        let raw = r#"[{"title":"Dune","year":1965.0},{"title":"Emma","year":"1815-12-23"},
                      {"title":"Odyssey","year":null},{"title":"Beowulf"}]"#;
        let books: Vec<BookCandidate> = serde_json::from_str(raw).unwrap();
        let years: Vec<Option<i32>> = books.iter().map(|b| b.year).collect();
        assert_eq!(years, vec![Some(1965), Some(1815), None, None]);
    }

    #[test]
    fn test_candidate_into_requests() {
        let book: CreateBookRequest = BookCandidate {
            title: "Dune".to_string(),
            author: Some("Frank Herbert".to_string()),
            year: Some(1965),
            ..Default::default()
        }
        .into();
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.year, Some(1965));

        let movie = Candidate::Movie(MovieCandidate {
            title: "Alien".to_string(),
            director: Some("Ridley Scott".to_string()),
            year: Some(1979),
            ..Default::default()
        });
        assert_eq!(movie.summary(), "Alien - Ridley Scott (1979)");
    }
}

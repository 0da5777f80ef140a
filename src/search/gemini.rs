//! Gemini `generateContent` client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::models::{BookCandidate, Candidate, ContentKind, MovieCandidate};
use super::{Result, SearchAdapter, SearchError};
use crate::config::SearchConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

fn item_schema(kind: ContentKind) -> Value {
    match kind {
        ContentKind::Book => json!({
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "author": { "type": "STRING" },
                "year": { "type": "NUMBER" },
                "publisher": { "type": "STRING" },
                "coverUrl": { "type": "STRING", "description": "A valid URL to the book cover image" }
            }
        }),
        ContentKind::Movie => json!({
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "director": { "type": "STRING" },
                "genre": { "type": "STRING" },
                "year": { "type": "NUMBER" },
                "posterUrl": { "type": "STRING", "description": "A valid URL to the movie poster image" }
            }
        }),
    }
}

fn search_prompt(query: &str, kind: ContentKind, max_results: usize) -> String {
    match kind {
        ContentKind::Book => format!(
            "Search for books matching the query \"{}\". Return a list of the top {} most relevant results. \
             For each book, provide the title, author, publication year, publisher, and a cover image URL.",
            query, max_results
        ),
        ContentKind::Movie => format!(
            "Search for movies matching the query \"{}\". Return a list of the top {} most relevant results. \
             For each movie, provide the title, director, genre, release year, and a poster image URL.",
            query, max_results
        ),
    }
}

/// Parse the JSON array the model returns into candidates.
///
/// Tolerates a markdown code fence around the array. Entries without a title
/// are dropped and at most `max_results` are kept.
pub fn parse_candidates(text: &str, kind: ContentKind, max_results: usize) -> Result<Vec<Candidate>> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    let invalid = |e: serde_json::Error| SearchError::InvalidResponse(e.to_string());
    let candidates: Vec<Candidate> = match kind {
        ContentKind::Book => serde_json::from_str::<Vec<BookCandidate>>(body)
            .map_err(invalid)?
            .into_iter()
            .map(Candidate::Book)
            .collect(),
        ContentKind::Movie => serde_json::from_str::<Vec<MovieCandidate>>(body)
            .map_err(invalid)?
            .into_iter()
            .map(Candidate::Movie)
            .collect(),
    };

    Ok(candidates
        .into_iter()
        .filter(|c| !c.title().trim().is_empty())
        .take(max_results)
        .collect())
}

pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_results: usize,
}

impl GeminiClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        log::debug!(
            "Initializing Gemini client: url={}, model={}",
            config.base_url,
            config.model
        );

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_results: config.max_results,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: String, schema: Option<Value>) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;
        let start = Instant::now();

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: schema.map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            }),
        };

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, body });
        }

        let result: GenerateResponse = response.json().await?;
        log::debug!("Gemini responded in {}ms", start.elapsed().as_millis());

        result
            .text()
            .ok_or_else(|| SearchError::InvalidResponse("empty response".to_string()))
    }

    /// Structured summary of a course's notes with actionable takeaways, in Markdown
    pub async fn summarize_course(&self, title: &str, notes: &str) -> Result<String> {
        let prompt = format!(
            "I am taking a course titled \"{}\". Here are my rough notes: \"{}\". \
             Please provide a structured, concise summary of these notes and suggest 3 key \
             actionable takeaways. Output in Markdown.",
            title, notes
        );
        self.generate(prompt, None).await
    }

    /// Two-sentence synopsis and three main themes of a book
    pub async fn book_insight(&self, title: &str, author: &str) -> Result<String> {
        let prompt = format!(
            "Provide a very brief (2 sentences) synopsis and 3 main themes for the book \"{}\" by {}.",
            title, author
        );
        self.generate(prompt, None).await
    }
}

#[async_trait]
impl SearchAdapter for GeminiClient {
    async fn search(&self, query: &str, kind: ContentKind) -> Result<Vec<Candidate>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let schema = json!({ "type": "ARRAY", "items": item_schema(kind) });
        let text = self
            .generate(search_prompt(query, kind, self.max_results), Some(schema))
            .await?;
        let candidates = parse_candidates(&text, kind, self.max_results)?;

        log::info!("Search for '{}' returned {} candidates", query, candidates.len());
        Ok(candidates)
    }
}

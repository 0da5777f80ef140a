//! Study session storage, kept in sessions.json

use super::models::{RecordSessionRequest, StudyMode, StudySession};
use crate::storage::{clean, Collection, CollectionStore, FileStorage, Result};

pub struct SessionStorage {
    sessions: CollectionStore<StudySession>,
}

impl SessionStorage {
    pub fn new(storage: FileStorage) -> Self {
        Self {
            sessions: CollectionStore::open(storage, Collection::Sessions),
        }
    }

    /// All sessions, most recent first
    pub fn list_sessions(&self) -> &[StudySession] {
        self.sessions.items()
    }

    pub fn record_session(&mut self, request: RecordSessionRequest) -> StudySession {
        let tags: Vec<String> = request
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let mut session = StudySession::new(
            request.duration_seconds,
            request.mode.unwrap_or(StudyMode::Stopwatch),
            tags,
        );
        session.notes = clean(request.notes);

        let session = self.sessions.create(session);
        log::info!(
            "Recorded {} session of {}s",
            session.mode.label(),
            session.duration_seconds
        );
        session
    }

    pub fn delete_session(&mut self, id: &str) -> Result<()> {
        self.sessions.delete(id)?;
        Ok(())
    }

    /// Distinct tags in first-seen order, for suggestions
    pub fn known_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.sessions.items().iter().flat_map(|s| &s.tags) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use tempfile::TempDir;

    fn create_test_storage() -> (SessionStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = SessionStorage::new(FileStorage::new(temp_dir.path().to_path_buf()));
        (storage, temp_dir)
    }

    fn request(seconds: u64, tags: &[&str]) -> RecordSessionRequest {
        RecordSessionRequest {
            duration_seconds: seconds,
            mode: Some(StudyMode::Pomodoro),
            notes: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_record_cleans_tags() {
        let (mut storage, temp) = create_test_storage();
        let session = storage.record_session(request(1500, &[" math ", "", "  "]));
        assert_eq!(session.tags, vec!["math"]);
        assert_eq!(session.primary_tag(), Some("math"));

        let reopened = SessionStorage::new(FileStorage::new(temp.path().to_path_buf()));
        assert_eq!(reopened.list_sessions(), storage.list_sessions());
    }

    #[test]
    fn test_known_tags_and_delete() {
        let (mut storage, _temp) = create_test_storage();
        storage.record_session(request(600, &["math"]));
        let physics = storage.record_session(request(600, &["physics", "math"]));
        storage.record_session(request(600, &[]));

        assert_eq!(storage.known_tags(), vec!["physics", "math"]);

        storage.delete_session(&physics.id).unwrap();
        assert_eq!(storage.list_sessions().len(), 2);
        assert!(matches!(
            storage.delete_session(&physics.id),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_sessions_without_tags_field() {
        let raw = r#"[{"id":"1","date":1700000000000,"durationSeconds":90,"mode":"Stopwatch"}]"#;
        let sessions: Vec<StudySession> = serde_json::from_str(raw).unwrap();
        assert!(sessions[0].tags.is_empty());
        assert_eq!(sessions[0].primary_tag(), None);
    }
}

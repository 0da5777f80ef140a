//! Watchlist storage, kept in movies.json

use super::models::{CreateMovieRequest, Movie, WatchStats};
use crate::search::MovieCandidate;
use crate::storage::{clean, Collection, CollectionStore, FileStorage, Result, StorageError};

pub struct MovieStorage {
    movies: CollectionStore<Movie>,
}

impl MovieStorage {
    pub fn new(storage: FileStorage) -> Self {
        Self {
            movies: CollectionStore::open(storage, Collection::Movies),
        }
    }

    pub fn list_movies(&self) -> &[Movie] {
        self.movies.items()
    }

    pub fn get_movie(&self, id: &str) -> Option<&Movie> {
        self.movies.get(id)
    }

    pub fn add_movie(&mut self, request: CreateMovieRequest) -> Result<Movie> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(StorageError::Validation(
                "Movie title is required".to_string(),
            ));
        }

        let movie = self.movies.create(Movie::new(CreateMovieRequest {
            title,
            genre: clean(request.genre),
            director: clean(request.director),
            poster_url: clean(request.poster_url),
            ..request
        }));

        log::info!("Added movie '{}'", movie.title);
        Ok(movie)
    }

    pub fn add_candidate(&mut self, candidate: MovieCandidate) -> Result<Movie> {
        self.add_movie(candidate.into())
    }

    pub fn toggle_watched(&mut self, id: &str) -> Result<Movie> {
        self.movies.update(id, |m| m.watched = !m.watched)
    }

    /// Rate a movie from 1 to 5 stars
    pub fn rate(&mut self, id: &str, rating: u8) -> Result<Movie> {
        if !(1..=5).contains(&rating) {
            return Err(StorageError::Validation(format!(
                "Rating must be between 1 and 5, got {}",
                rating
            )));
        }
        self.movies.update(id, |m| m.rating = Some(rating))
    }

    pub fn delete_movie(&mut self, id: &str) -> Result<()> {
        let removed = self.movies.delete(id)?;
        log::info!("Deleted movie '{}'", removed.title);
        Ok(())
    }

    /// Case-insensitive substring match on title or genre
    pub fn search(&self, query: &str) -> Vec<&Movie> {
        let query = query.trim().to_lowercase();
        self.movies
            .items()
            .iter()
            .filter(|m| {
                m.title.to_lowercase().contains(&query) || m.genre.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn stats(&self) -> WatchStats {
        let watched = self.movies.items().iter().filter(|m| m.watched).count();
        WatchStats {
            total: self.movies.len(),
            watched,
            to_watch: self.movies.len() - watched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (MovieStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = MovieStorage::new(FileStorage::new(temp_dir.path().to_path_buf()));
        (storage, temp_dir)
    }

    fn request(title: &str) -> CreateMovieRequest {
        CreateMovieRequest {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_movie_defaults() {
        let (mut storage, _temp) = create_test_storage();
        let movie = storage.add_movie(request("  Stalker ")).unwrap();
        assert_eq!(movie.title, "Stalker");
        assert_eq!(movie.genre, "General");
        assert!(!movie.watched);
        assert_eq!(movie.rating, None);

        assert!(matches!(
            storage.add_movie(request("")),
            Err(StorageError::Validation(_))
        ));
    }

    #[test]
    fn test_toggle_and_rate() {
        let (mut storage, temp) = create_test_storage();
        let movie = storage.add_movie(request("Stalker")).unwrap();

        assert!(storage.toggle_watched(&movie.id).unwrap().watched);
        assert_eq!(storage.rate(&movie.id, 4).unwrap().rating, Some(4));
        assert!(matches!(
            storage.rate(&movie.id, 6),
            Err(StorageError::Validation(_))
        ));
        assert!(matches!(
            storage.rate("missing", 3),
            Err(StorageError::NotFound(_))
        ));

        let reopened = MovieStorage::new(FileStorage::new(temp.path().to_path_buf()));
        let stored = reopened.get_movie(&movie.id).unwrap();
        assert!(stored.watched);
        assert_eq!(stored.rating, Some(4));

        assert!(!storage.toggle_watched(&movie.id).unwrap().watched);
    }

    #[test]
    fn test_search_and_stats() {
        let (mut storage, _temp) = create_test_storage();
        let alien = storage
            .add_movie(CreateMovieRequest {
                genre: Some("Sci-Fi".to_string()),
                ..request("Alien")
            })
            .unwrap();
        storage.add_movie(request("Amelie")).unwrap();
        storage.toggle_watched(&alien.id).unwrap();

        assert_eq!(storage.search("sci").len(), 1);
        assert_eq!(storage.search("general").len(), 1);
        assert_eq!(
            storage.stats(),
            WatchStats {
                total: 2,
                watched: 1,
                to_watch: 1
            }
        );

        storage.delete_movie(&alien.id).unwrap();
        assert_eq!(storage.list_movies().len(), 1);
    }
}

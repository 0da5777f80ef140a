//! Book library storage operations
//!
//! Handles CRUD operations for books, stored in books.json

use super::models::{Book, BookStatus, CreateBookRequest, LibraryStats};
use crate::search::BookCandidate;
use crate::storage::{clean, Collection, CollectionStore, FileStorage, Result, StorageError};

/// Storage for the book library
pub struct BookStorage {
    books: CollectionStore<Book>,
}

impl BookStorage {
    pub fn new(storage: FileStorage) -> Self {
        Self {
            books: CollectionStore::open(storage, Collection::Books),
        }
    }

    /// List all books, newest first
    pub fn list_books(&self) -> &[Book] {
        self.books.items()
    }

    pub fn get_book(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    /// Add a book. Title and author are required.
    pub fn add_book(&mut self, request: CreateBookRequest) -> Result<Book> {
        let title = request.title.trim().to_string();
        let author = request.author.trim().to_string();
        if title.is_empty() || author.is_empty() {
            return Err(StorageError::Validation(
                "Book title and author are required".to_string(),
            ));
        }

        let book = self.books.create(Book::new(CreateBookRequest {
            title,
            author,
            isbn: clean(request.isbn),
            publisher: clean(request.publisher),
            cover_url: clean(request.cover_url),
            ..request
        }));

        log::info!("Added book '{}' by {}", book.title, book.author);
        Ok(book)
    }

    /// Add a book picked from online search results
    pub fn add_candidate(&mut self, candidate: BookCandidate) -> Result<Book> {
        self.add_book(candidate.into())
    }

    pub fn set_status(&mut self, id: &str, status: BookStatus) -> Result<Book> {
        self.books.update(id, |b| b.status = status)
    }

    pub fn delete_book(&mut self, id: &str) -> Result<()> {
        let removed = self.books.delete(id)?;
        log::info!("Deleted book '{}'", removed.title);
        Ok(())
    }

    /// Case-insensitive substring match on title or author
    pub fn search(&self, query: &str) -> Vec<&Book> {
        let query = query.trim().to_lowercase();
        self.books
            .items()
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&query) || b.author.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn stats(&self) -> LibraryStats {
        let mut stats = LibraryStats {
            total: self.books.len(),
            ..Default::default()
        };
        for book in self.books.items() {
            match book.status {
                BookStatus::Unread => stats.unread += 1,
                BookStatus::Reading => stats.reading += 1,
                BookStatus::Read => stats.read += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::BookType;
    use tempfile::TempDir;

    fn create_test_storage() -> (BookStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = BookStorage::new(FileStorage::new(temp_dir.path().to_path_buf()));
        (storage, temp_dir)
    }

    fn request(title: &str, author: &str) -> CreateBookRequest {
        CreateBookRequest {
            title: title.to_string(),
            author: author.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_book_defaults_and_order() {
        let (mut storage, _temp) = create_test_storage();
        storage.add_book(request("Dune", "Frank Herbert")).unwrap();
        let second = storage
            .add_book(CreateBookRequest {
                isbn: Some("   ".to_string()),
                book_type: BookType::EBook,
                ..request("Emma", "Jane Austen")
            })
            .unwrap();

        assert_eq!(second.status, BookStatus::Unread);
        assert_eq!(second.isbn, None);
        let titles: Vec<&str> = storage.list_books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Emma", "Dune"]);
    }

    #[test]
    fn test_add_book_requires_title_and_author() {
        let (mut storage, _temp) = create_test_storage();
        assert!(matches!(
            storage.add_book(request("Dune", " ")),
            Err(StorageError::Validation(_))
        ));
        assert!(storage.list_books().is_empty());
    }

    #[test]
    fn test_search_title_or_author() {
        let (mut storage, _temp) = create_test_storage();
        storage.add_book(request("Dune", "Frank Herbert")).unwrap();
        storage.add_book(request("Emma", "Jane Austen")).unwrap();

        assert_eq!(storage.search("HERB").len(), 1);
        assert_eq!(storage.search("e").len(), 2);
        assert_eq!(storage.search("").len(), 2);
        assert!(storage.search("tolstoy").is_empty());
    }

    #[test]
    fn test_status_and_stats() {
        let (mut storage, temp) = create_test_storage();
        let dune = storage.add_book(request("Dune", "Frank Herbert")).unwrap();
        storage.add_book(request("Emma", "Jane Austen")).unwrap();
        storage.set_status(&dune.id, BookStatus::Read).unwrap();

        let stats = storage.stats();
        assert_eq!((stats.total, stats.unread, stats.read), (2, 1, 1));

        let reopened = BookStorage::new(FileStorage::new(temp.path().to_path_buf()));
        assert_eq!(reopened.get_book(&dune.id).unwrap().status, BookStatus::Read);

        storage.delete_book(&dune.id).unwrap();
        assert!(storage.get_book(&dune.id).is_none());
    }

    #[test]
    fn test_reads_legacy_status_labels() {
        let raw = r#"[{"id":"1","title":"Sefiller","author":"Victor Hugo","type":"E-Book",
                       "status":"Okunuyor","addedAt":1700000000000}]"#;
        let books: Vec<Book> = serde_json::from_str(raw).unwrap();
        assert_eq!(books[0].status, BookStatus::Reading);
        assert_eq!(books[0].book_type, BookType::EBook);
    }
}

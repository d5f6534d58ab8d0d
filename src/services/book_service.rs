// src/services/book_service.rs
use crate::domain::book::{validate_book, Book};
use crate::error::{AppError, AppResult};
use crate::events::{BookAdded, BookRemoved, BookUpdated, EventBus};
use crate::repositories::BookRepository;
use std::sync::Arc;
use uuid::Uuid;

/// Manual book entry from the add-book form
#[derive(Debug, Clone)]
pub struct AddBookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub review: String,
    pub rating: u8,
    pub publish_year: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct UpdateBookRequest {
    pub book_id: Uuid,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub review: Option<String>,
    pub rating: Option<u8>,
}

pub struct BookService {
    book_repo: Arc<dyn BookRepository>,
    event_bus: Arc<EventBus>,
}

impl BookService {
    pub fn new(book_repo: Arc<dyn BookRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            book_repo,
            event_bus,
        }
    }

    pub fn add_book(&self, request: AddBookRequest) -> AppResult<Uuid> {
        let mut book = Book::new(
            request.title.trim().to_string(),
            request.author.trim().to_string(),
            request.genre,
        );
        book.review = request.review;
        book.rating = request.rating;
        book.publish_year = request.publish_year;

        validate_book(&book).map_err(AppError::Domain)?;
        self.book_repo.save(&book)?;

        self.event_bus
            .emit(BookAdded::new(book.id, book.title.clone(), None));

        Ok(book.id)
    }

    pub fn update_book(&self, request: UpdateBookRequest) -> AppResult<()> {
        let mut book = self
            .book_repo
            .get_by_id(request.book_id)?
            .ok_or(AppError::NotFound)?;

        book.update_metadata(
            request.title,
            request.author,
            request.genre,
            request.review,
            request.rating,
        );

        validate_book(&book).map_err(AppError::Domain)?;
        self.book_repo.save(&book)?;

        self.event_bus.emit(BookUpdated::new(book.id));
        Ok(())
    }

    pub fn delete_book(&self, book_id: Uuid) -> AppResult<()> {
        self.book_repo.delete(book_id)?;
        self.event_bus.emit(BookRemoved::new(book_id));
        Ok(())
    }

    pub fn get_book(&self, book_id: Uuid) -> AppResult<Option<Book>> {
        self.book_repo.get_by_id(book_id)
    }

    pub fn list_books(&self) -> AppResult<Vec<Book>> {
        self.book_repo.list_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool_at, initialize_database};
    use crate::repositories::SqliteBookRepository;

    fn test_service() -> (tempfile::TempDir, BookService) {
        let dir = tempfile::tempdir().unwrap();
        let pool = Arc::new(create_connection_pool_at(&dir.path().join("test.db")).unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();

        let service = BookService::new(
            Arc::new(SqliteBookRepository::new(pool)),
            Arc::new(EventBus::new()),
        );
        (dir, service)
    }

    fn request(title: &str, author: &str, rating: u8) -> AddBookRequest {
        AddBookRequest {
            title: title.to_string(),
            author: author.to_string(),
            genre: "Fantasy".to_string(),
            review: String::new(),
            rating,
            publish_year: None,
        }
    }

    #[test]
    fn test_add_and_list_books() {
        let (_dir, service) = test_service();

        let id = service.add_book(request("The Hobbit", "J.R.R. Tolkien", 4)).unwrap();

        let books = service.list_books().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, id);
        assert_eq!(books[0].rating, 4);
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let (_dir, service) = test_service();

        let result = service.add_book(request("   ", "Someone", 3));
        assert!(matches!(result, Err(AppError::Domain(_))));
        assert!(service.list_books().unwrap().is_empty());
    }

    #[test]
    fn test_blank_author_is_rejected() {
        let (_dir, service) = test_service();

        let result = service.add_book(request("Title", "  ", 3));
        assert!(matches!(result, Err(AppError::Domain(_))));
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let (_dir, service) = test_service();

        let result = service.add_book(request("Title", "Author", 6));
        assert!(matches!(result, Err(AppError::Domain(_))));
    }

    #[test]
    fn test_update_book_rating_and_review() {
        let (_dir, service) = test_service();
        let id = service.add_book(request("Dune", "Frank Herbert", 3)).unwrap();

        service
            .update_book(UpdateBookRequest {
                book_id: id,
                title: None,
                author: None,
                genre: None,
                review: Some("Re-read, even better".to_string()),
                rating: Some(5),
            })
            .unwrap();

        let book = service.get_book(id).unwrap().unwrap();
        assert_eq!(book.rating, 5);
        assert_eq!(book.review, "Re-read, even better");
    }

    #[test]
    fn test_update_missing_book_is_not_found() {
        let (_dir, service) = test_service();

        let result = service.update_book(UpdateBookRequest {
            book_id: Uuid::new_v4(),
            title: None,
            author: None,
            genre: None,
            review: None,
            rating: Some(1),
        });
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn test_delete_book() {
        let (_dir, service) = test_service();
        let id = service.add_book(request("Dune", "Frank Herbert", 3)).unwrap();

        service.delete_book(id).unwrap();
        assert!(service.get_book(id).unwrap().is_none());
    }
}

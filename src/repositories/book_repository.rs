// src/repositories/book_repository.rs
//
// Book persistence

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::book::Book;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait BookRepository: Send + Sync {
    fn save(&self, book: &Book) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;
    fn list_all(&self) -> AppResult<Vec<Book>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    fn exists(&self, id: Uuid) -> AppResult<bool>;

    /// Attach cached cover bytes to an existing book.
    ///
    /// Returns false when the book no longer exists; the background cover
    /// fetch may outlive a deletion and must not resurrect the row.
    fn attach_cover_image(&self, id: Uuid, bytes: &[u8]) -> AppResult<bool>;
}

pub struct SqliteBookRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteBookRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Book - returns rusqlite::Error for query_map compatibility
    fn row_to_book(row: &Row) -> Result<Book, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let rating: i64 = row.get("rating")?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let updated_at_str: String = row.get("updated_at")?;
        let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Book {
            id,
            title: row.get("title")?,
            author: row.get("author")?,
            genre: row.get("genre")?,
            review: row.get("review")?,
            rating: rating as u8,
            cover_image_url: row.get("cover_image_url")?,
            cover_image: row.get("cover_image")?,
            publish_year: row.get("publish_year")?,
            catalog_key: row.get("catalog_key")?,
            created_at,
            updated_at,
        })
    }
}

impl BookRepository for SqliteBookRepository {
    fn save(&self, book: &Book) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO books (
                id, title, author, genre, review, rating,
                cover_image_url, cover_image, publish_year, catalog_key,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                book.id.to_string(),
                book.title,
                book.author,
                book.genre,
                book.review,
                book.rating as i64,
                book.cover_image_url,
                book.cover_image,
                book.publish_year,
                book.catalog_key,
                book.created_at.to_rfc3339(),
                book.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, title, author, genre, review, rating,
                    cover_image_url, cover_image, publish_year, catalog_key,
                    created_at, updated_at
             FROM books WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_book) {
            Ok(book) => Ok(Some(book)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Book>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, title, author, genre, review, rating,
                    cover_image_url, cover_image, publish_year, catalog_key,
                    created_at, updated_at
             FROM books
             ORDER BY title",
        )?;

        let books: Vec<Book> = stmt
            .query_map([], Self::row_to_book)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected =
            conn.execute("DELETE FROM books WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn exists(&self, id: Uuid) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM books WHERE id = ?1",
            params![id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn attach_cover_image(&self, id: Uuid, bytes: &[u8]) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE books SET cover_image = ?1, updated_at = ?2 WHERE id = ?3",
            params![bytes, Utc::now().to_rfc3339(), id.to_string()],
        )?;

        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool_at, initialize_database};

    fn test_repo() -> (tempfile::TempDir, SqliteBookRepository) {
        let dir = tempfile::tempdir().unwrap();
        let pool = Arc::new(create_connection_pool_at(&dir.path().join("test.db")).unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        (dir, SqliteBookRepository::new(pool))
    }

    fn sample_book() -> Book {
        let mut book = Book::new(
            "Dune".to_string(),
            "Frank Herbert".to_string(),
            "Science Fiction".to_string(),
        );
        book.review = "A classic.".to_string();
        book.rating = 5;
        book
    }

    #[test]
    fn test_save_and_get_round_trip() {
        let (_dir, repo) = test_repo();
        let mut book = sample_book();
        book.cover_image_url = Some("https://covers.openlibrary.org/b/id/12345-M.jpg".to_string());
        book.publish_year = Some(1965);
        book.catalog_key = Some("/works/OL893415W".to_string());

        repo.save(&book).unwrap();
        let loaded = repo.get_by_id(book.id).unwrap().unwrap();

        assert_eq!(loaded.title, book.title);
        assert_eq!(loaded.author, book.author);
        assert_eq!(loaded.genre, book.genre);
        assert_eq!(loaded.review, book.review);
        assert_eq!(loaded.rating, 5);
        assert_eq!(loaded.cover_image_url, book.cover_image_url);
        assert_eq!(loaded.publish_year, Some(1965));
        assert_eq!(loaded.catalog_key, book.catalog_key);
    }

    #[test]
    fn test_unset_optionals_stay_absent() {
        let (_dir, repo) = test_repo();
        let book = sample_book();

        repo.save(&book).unwrap();
        let loaded = repo.get_by_id(book.id).unwrap().unwrap();

        // Absent, not empty-string sentinels
        assert_eq!(loaded.cover_image_url, None);
        assert_eq!(loaded.cover_image, None);
        assert_eq!(loaded.publish_year, None);
        assert_eq!(loaded.catalog_key, None);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let (_dir, repo) = test_repo();
        assert!(repo.get_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_list_all_sorted_by_title() {
        let (_dir, repo) = test_repo();
        let mut b1 = sample_book();
        b1.title = "Zorba the Greek".to_string();
        let mut b2 = sample_book();
        b2.title = "Anna Karenina".to_string();

        repo.save(&b1).unwrap();
        repo.save(&b2).unwrap();

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "Anna Karenina");
        assert_eq!(all[1].title, "Zorba the Greek");
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (_dir, repo) = test_repo();
        assert!(matches!(
            repo.delete(Uuid::new_v4()),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_attach_cover_image_round_trip() {
        let (_dir, repo) = test_repo();
        let book = sample_book();
        repo.save(&book).unwrap();

        let attached = repo.attach_cover_image(book.id, &[0xFF, 0xD8, 0xFF]).unwrap();
        assert!(attached);

        let loaded = repo.get_by_id(book.id).unwrap().unwrap();
        assert_eq!(loaded.cover_image, Some(vec![0xFF, 0xD8, 0xFF]));
    }

    #[test]
    fn test_attach_cover_to_deleted_book_is_noop() {
        let (_dir, repo) = test_repo();
        let book = sample_book();
        repo.save(&book).unwrap();
        repo.delete(book.id).unwrap();

        let attached = repo.attach_cover_image(book.id, &[1, 2, 3]).unwrap();
        assert!(!attached);
        assert!(repo.get_by_id(book.id).unwrap().is_none());
    }
}

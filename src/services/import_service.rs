// src/services/import_service.rs
//
// Catalog import pipeline
//
// Converts a selected catalog record plus the user's rating/review into a
// persisted Book. Persistence is synchronous; the cover image download is
// a detached background task the caller never waits on. The book is
// visible in the library immediately, with or without cached bytes.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::book::{validate_book, Book};
use crate::error::{AppError, AppResult};
use crate::events::{BookAdded, CoverImageCached, EventBus};
use crate::integrations::openlibrary::{CatalogRecord, CoverFetcher, CoverSize};
use crate::repositories::BookRepository;

pub struct ImportService {
    book_repo: Arc<dyn BookRepository>,
    cover_fetcher: Arc<dyn CoverFetcher>,
    event_bus: Arc<EventBus>,
    /// Catalog keys imported during this discovery session; suppresses the
    /// duplicate-add affordance. Never persisted, resets with the service.
    imported_keys: Mutex<HashSet<String>>,
}

impl ImportService {
    pub fn new(
        book_repo: Arc<dyn BookRepository>,
        cover_fetcher: Arc<dyn CoverFetcher>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            book_repo,
            cover_fetcher,
            event_bus,
            imported_keys: Mutex::new(HashSet::new()),
        }
    }

    /// Import a catalog record into the library.
    ///
    /// Returns the persisted book. The cover download continues in the
    /// background; its failure never surfaces here.
    pub fn import(&self, record: &CatalogRecord, review: String, rating: u8) -> AppResult<Book> {
        let mut book = Book::new(
            record.title.clone(),
            record.primary_author().to_string(),
            record.primary_genre(),
        );
        book.review = review;
        book.rating = rating;
        book.cover_image_url = record.cover_url(CoverSize::Medium);
        book.publish_year = record.first_publish_year;
        book.catalog_key = Some(record.key.clone());

        validate_book(&book).map_err(AppError::Domain)?;
        self.book_repo.save(&book)?;

        self.imported_keys
            .lock()
            .unwrap()
            .insert(record.key.clone());

        self.event_bus.emit(BookAdded::new(
            book.id,
            book.title.clone(),
            book.catalog_key.clone(),
        ));

        if let Some(url) = book.cover_image_url.clone() {
            // Fire-and-forget: the handle is dropped, not awaited
            let _ = self.spawn_cover_fetch(book.id, url);
        }

        Ok(book)
    }

    /// Whether this record was already imported in the current session
    pub fn is_imported(&self, catalog_key: &str) -> bool {
        self.imported_keys.lock().unwrap().contains(catalog_key)
    }

    /// Download the cover and attach it to the book, if the book still
    /// exists by the time the bytes arrive. Failures are logged and
    /// swallowed; the remote URL remains the fallback rendering source.
    pub(crate) fn spawn_cover_fetch(&self, book_id: Uuid, url: String) -> JoinHandle<()> {
        let repo = Arc::clone(&self.book_repo);
        let fetcher = Arc::clone(&self.cover_fetcher);
        let bus = Arc::clone(&self.event_bus);

        tokio::spawn(async move {
            match fetcher.fetch_cover(&url).await {
                Ok(bytes) => match repo.attach_cover_image(book_id, &bytes) {
                    Ok(true) => {
                        bus.emit(CoverImageCached::new(book_id, bytes.len()));
                    }
                    Ok(false) => {
                        log::debug!("book {} deleted before cover arrived", book_id);
                    }
                    Err(err) => {
                        log::warn!("failed to store cover for book {}: {}", book_id, err);
                    }
                },
                Err(err) => {
                    log::warn!("failed to download cover from {}: {}", url, err);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool_at, initialize_database};
    use crate::repositories::SqliteBookRepository;
    use async_trait::async_trait;

    struct FakeCoverFetcher {
        bytes: Option<Vec<u8>>,
    }

    #[async_trait]
    impl CoverFetcher for FakeCoverFetcher {
        async fn fetch_cover(&self, _url: &str) -> AppResult<Vec<u8>> {
            match &self.bytes {
                Some(bytes) => Ok(bytes.clone()),
                None => Err(AppError::Network("unreachable".to_string())),
            }
        }
    }

    fn test_service(
        cover_bytes: Option<Vec<u8>>,
    ) -> (tempfile::TempDir, Arc<dyn BookRepository>, ImportService) {
        let dir = tempfile::tempdir().unwrap();
        let pool = Arc::new(create_connection_pool_at(&dir.path().join("test.db")).unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();

        let repo: Arc<dyn BookRepository> = Arc::new(SqliteBookRepository::new(pool));
        let service = ImportService::new(
            Arc::clone(&repo),
            Arc::new(FakeCoverFetcher { bytes: cover_bytes }),
            Arc::new(EventBus::new()),
        );
        (dir, repo, service)
    }

    fn sample_record() -> CatalogRecord {
        CatalogRecord {
            key: "/works/OL893415W".to_string(),
            title: "Dune".to_string(),
            author_names: vec!["Frank Herbert".to_string()],
            first_publish_year: Some(1965),
            cover_id: Some(12345),
            subjects: vec!["Science fiction".to_string()],
        }
    }

    #[tokio::test]
    async fn test_import_persists_book_before_cover_arrives() {
        let (_dir, repo, service) = test_service(Some(vec![1, 2, 3]));

        let book = service
            .import(&sample_record(), "Loved it".to_string(), 5)
            .unwrap();

        // Queryable immediately, cover bytes pending
        let loaded = repo.get_by_id(book.id).unwrap().unwrap();
        assert_eq!(loaded.title, "Dune");
        assert_eq!(loaded.author, "Frank Herbert");
        // "Fiction" precedes "Science Fiction" in the canonical genre list
        assert_eq!(loaded.genre, "Fiction");
        assert_eq!(loaded.rating, 5);
        assert_eq!(loaded.review, "Loved it");
        assert_eq!(loaded.publish_year, Some(1965));
        assert_eq!(loaded.catalog_key, Some("/works/OL893415W".to_string()));
        assert_eq!(
            loaded.cover_image_url,
            Some("https://covers.openlibrary.org/b/id/12345-M.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn test_cover_bytes_attach_on_fetch_success() {
        let (_dir, repo, service) = test_service(Some(vec![9, 9, 9]));

        let book = service.import(&sample_record(), String::new(), 3).unwrap();

        let handle = service.spawn_cover_fetch(
            book.id,
            book.cover_image_url.clone().unwrap(),
        );
        handle.await.unwrap();

        let loaded = repo.get_by_id(book.id).unwrap().unwrap();
        assert_eq!(loaded.cover_image, Some(vec![9, 9, 9]));
    }

    #[tokio::test]
    async fn test_cover_fetch_failure_is_swallowed() {
        let (_dir, repo, service) = test_service(None);

        let book = service.import(&sample_record(), String::new(), 3).unwrap();

        let handle = service.spawn_cover_fetch(
            book.id,
            book.cover_image_url.clone().unwrap(),
        );
        handle.await.unwrap();

        // Entry intact, only the remote URL remains
        let loaded = repo.get_by_id(book.id).unwrap().unwrap();
        assert_eq!(loaded.cover_image, None);
        assert!(loaded.cover_image_url.is_some());
    }

    #[tokio::test]
    async fn test_cover_fetch_after_deletion_does_not_resurrect() {
        let (_dir, repo, service) = test_service(Some(vec![7]));

        let book = service.import(&sample_record(), String::new(), 3).unwrap();
        let url = book.cover_image_url.clone().unwrap();
        repo.delete(book.id).unwrap();

        let handle = service.spawn_cover_fetch(book.id, url);
        handle.await.unwrap();

        assert!(repo.get_by_id(book.id).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_import_marks_key_for_session() {
        let (_dir, _repo, service) = test_service(Some(vec![1]));
        let record = sample_record();

        assert!(!service.is_imported(&record.key));
        service.import(&record, String::new(), 4).unwrap();
        assert!(service.is_imported(&record.key));
    }

    #[tokio::test]
    async fn test_import_rejects_invalid_rating() {
        let (_dir, _repo, service) = test_service(Some(vec![1]));

        let result = service.import(&sample_record(), String::new(), 6);
        assert!(matches!(result, Err(AppError::Domain(_))));
    }

    #[tokio::test]
    async fn test_record_without_authors_imports_with_sentinel() {
        let (_dir, repo, service) = test_service(Some(vec![1]));
        let mut record = sample_record();
        record.author_names.clear();
        record.cover_id = None;

        let book = service.import(&record, String::new(), 0).unwrap();

        let loaded = repo.get_by_id(book.id).unwrap().unwrap();
        assert_eq!(loaded.author, "Unknown Author");
        assert_eq!(loaded.cover_image_url, None);
    }

    #[tokio::test]
    async fn test_import_emits_book_added() {
        let dir = tempfile::tempdir().unwrap();
        let pool = Arc::new(create_connection_pool_at(&dir.path().join("test.db")).unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();

        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        bus.subscribe::<BookAdded, _>(move |event| {
            seen_clone.lock().unwrap().push(event.catalog_key.clone());
        });

        let service = ImportService::new(
            Arc::new(SqliteBookRepository::new(pool)),
            Arc::new(FakeCoverFetcher { bytes: Some(vec![1]) }),
            bus,
        );
        service.import(&sample_record(), String::new(), 2).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Some("/works/OL893415W".to_string())]
        );
    }
}

// src/lib.rs
// BookNest - Local-first personal book library core
//
// Architecture:
// - Domain-centric: business rules live in domain entities and validators
// - Explicit: no implicit behavior, no magic
// - Local-first: the user's library and profile live in local SQLite
// - Discovery: online catalog search, personalized suggestions and the
//   import pipeline sit behind explicit, cancellable services

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// INTEGRATIONS
// ============================================================================

pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_book,
    validate_profile,
    validate_rating,
    // Book
    Book,
    // Suggestions
    GenreSuggestion,
    // Profile
    Profile,
    MAX_RATING,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    BookAdded,
    BookRemoved,
    BookUpdated,
    CoverImageCached,
    DomainEvent,
    EventBus,
    ProfileUpdated,
    SearchCompleted,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, create_connection_pool_at, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    BookRepository, ProfileRepository, SqliteBookRepository, SqliteProfileRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    top_authors,
    top_genres,
    // Book Service
    AddBookRequest,
    BookService,
    // Import Pipeline
    ImportService,
    // Profile Service
    ProfileService,
    // Discovery
    SearchController,
    SearchState,
    UpdateBookRequest,
    UpdateProfileRequest,
    DEBOUNCE_DELAY,
    MAX_AUTHOR_SUGGESTIONS,
    MAX_GENRE_SUGGESTIONS,
};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    CatalogRecord, CatalogSearch, CoverFetcher, CoverSize, HttpCoverFetcher, OpenLibraryClient,
    SearchOutcome, SearchResponse,
};

// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod book_service;
pub mod import_service;
pub mod profile_service;
pub mod search_controller;
pub mod suggestion_service;

// Re-export all services and their types
pub use book_service::{AddBookRequest, BookService, UpdateBookRequest};

pub use import_service::ImportService;

pub use profile_service::{ProfileService, UpdateProfileRequest};

pub use search_controller::{SearchController, SearchState, DEBOUNCE_DELAY};

pub use suggestion_service::{
    top_authors, top_genres, MAX_AUTHOR_SUGGESTIONS, MAX_GENRE_SUGGESTIONS,
};

pub mod client;
pub mod covers;
pub mod record;

pub use client::{CatalogSearch, OpenLibraryClient, SearchOutcome};
pub use covers::{CoverFetcher, HttpCoverFetcher};
pub use record::{CatalogRecord, CoverSize, SearchResponse, DEFAULT_GENRE, UNKNOWN_AUTHOR};

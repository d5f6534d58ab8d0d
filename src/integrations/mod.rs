// src/integrations/mod.rs
//
// External Integrations Module

pub mod openlibrary;

pub use openlibrary::{
    CatalogRecord, CatalogSearch, CoverFetcher, CoverSize, HttpCoverFetcher, OpenLibraryClient,
    SearchOutcome, SearchResponse,
};

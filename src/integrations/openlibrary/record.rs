// src/integrations/openlibrary/record.rs
//
// Open Library search response DTOs
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Records live only for the duration of a result set
// - Derived fields (primary author/genre, cover URL) are deterministic

use serde::{Deserialize, Serialize};

/// Sentinel author when the catalog record carries no author names
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Fallback genre bucket when no subject tag is usable
pub const DEFAULT_GENRE: &str = "General";

/// Subject tags longer than this are too noisy to use as a genre label
const MAX_TAG_LEN: usize = 20;

/// Canonical genre labels, matched case-insensitively against subject tags.
/// Order matters: the first match wins.
const CANONICAL_GENRES: [&str; 12] = [
    "Fiction",
    "Fantasy",
    "Science Fiction",
    "Romance",
    "Mystery",
    "Thriller",
    "Horror",
    "Comedy",
    "Action",
    "Biography",
    "History",
    "Self-Help",
];

/// Cover image size variants on the covers endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Medium,
    Large,
}

impl CoverSize {
    fn suffix(self) -> &'static str {
        match self {
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

/// Decoded body of a catalog search: `{num_found, docs}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub num_found: i64,
    #[serde(default)]
    pub docs: Vec<CatalogRecord>,
}

/// A single book entry returned by the remote search API, not yet part of
/// the user's library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Stable remote identifier, e.g. "/works/OL45883W"
    pub key: String,

    pub title: String,

    #[serde(default, rename = "author_name")]
    pub author_names: Vec<String>,

    #[serde(rename = "first_publish_year")]
    pub first_publish_year: Option<i32>,

    #[serde(rename = "cover_i")]
    pub cover_id: Option<i64>,

    #[serde(default, rename = "subject")]
    pub subjects: Vec<String>,
}

impl CatalogRecord {
    /// First listed author, or the sentinel when the list is empty
    pub fn primary_author(&self) -> &str {
        self.author_names
            .first()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Single genre label derived from the subject tags.
    ///
    /// First canonical genre contained (case-insensitively) in any subject
    /// wins; otherwise the first short tag; otherwise the default bucket.
    pub fn primary_genre(&self) -> String {
        for genre in CANONICAL_GENRES {
            let needle = genre.to_lowercase();
            if self
                .subjects
                .iter()
                .any(|s| s.to_lowercase().contains(&needle))
            {
                return genre.to_string();
            }
        }

        if let Some(first) = self.subjects.first() {
            if first.chars().count() < MAX_TAG_LEN {
                return first.clone();
            }
        }

        DEFAULT_GENRE.to_string()
    }

    /// Cover URL on the covers endpoint, None without a cover identifier
    pub fn cover_url(&self, size: CoverSize) -> Option<String> {
        self.cover_id.map(|id| {
            format!(
                "https://covers.openlibrary.org/b/id/{}-{}.jpg",
                id,
                size.suffix()
            )
        })
    }
}

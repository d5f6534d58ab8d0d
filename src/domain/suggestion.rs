// src/domain/suggestion.rs
//
// Derived suggestion data
//
// Suggestions are recomputed from the library snapshot on every request
// and are never persisted.

use serde::{Deserialize, Serialize};

/// A genre the user appears to favor, ranked by average rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreSuggestion {
    /// Genre label as stored on the user's books
    pub genre: String,

    /// Mean rating across the user's books in this genre
    pub average_rating: f64,

    /// How many books in the library carry this genre
    pub book_count: usize,
}

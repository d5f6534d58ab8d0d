// src/services/suggestion_service.rs
//
// Personalized discovery suggestions
//
// Pure functions over the current library snapshot: no I/O, no caching,
// recomputed on every call. The library is small enough that this is cheap.

use std::collections::HashMap;

use crate::domain::book::Book;
use crate::domain::suggestion::GenreSuggestion;

/// At most this many genre suggestions are surfaced
pub const MAX_GENRE_SUGGESTIONS: usize = 5;

/// At most this many author suggestions are surfaced
pub const MAX_AUTHOR_SUGGESTIONS: usize = 3;

/// Rank the user's genres by average rating, descending.
///
/// Equal averages order alphabetically by genre so the ranking is
/// deterministic regardless of map iteration order.
pub fn top_genres(books: &[Book]) -> Vec<GenreSuggestion> {
    let mut totals: HashMap<&str, (u32, usize)> = HashMap::new();

    for book in books {
        let entry = totals.entry(book.genre.as_str()).or_insert((0, 0));
        entry.0 += u32::from(book.rating);
        entry.1 += 1;
    }

    let mut suggestions: Vec<GenreSuggestion> = totals
        .into_iter()
        .map(|(genre, (total, count))| GenreSuggestion {
            genre: genre.to_string(),
            average_rating: f64::from(total) / count as f64,
            book_count: count,
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.average_rating
            .partial_cmp(&a.average_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.genre.cmp(&b.genre))
    });
    suggestions.truncate(MAX_GENRE_SUGGESTIONS);

    suggestions
}

/// Rank the user's authors by how many of their books are in the library.
///
/// Equal counts order alphabetically by author name.
pub fn top_authors(books: &[Book]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for book in books {
        *counts.entry(book.author.as_str()).or_insert(0) += 1;
    }

    let mut authors: Vec<(&str, usize)> = counts.into_iter().collect();
    authors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    authors.truncate(MAX_AUTHOR_SUGGESTIONS);

    authors.into_iter().map(|(name, _)| name.to_string()).collect()
}

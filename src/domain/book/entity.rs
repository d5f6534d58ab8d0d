use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book the user has added to their library, rated and optionally reviewed.
/// This is the root entity for all library data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Book title
    pub title: String,

    /// Primary author name
    pub author: String,

    /// Single genre label (canonical if imported from the catalog)
    pub genre: String,

    /// Free-text review written by the user
    pub review: String,

    /// User rating, 0 to 5 stars
    pub rating: u8,

    /// Remote cover image URL (if the book came from the catalog)
    pub cover_image_url: Option<String>,

    /// Locally cached cover image bytes
    pub cover_image: Option<Vec<u8>>,

    /// First publish year (if known)
    pub publish_year: Option<i32>,

    /// Open Library work key, used to suppress duplicate imports
    pub catalog_key: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Create a new Book entity
    pub fn new(title: String, author: String, genre: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            author,
            genre,
            review: String::new(),
            rating: 0,
            cover_image_url: None,
            cover_image: None,
            publish_year: None,
            catalog_key: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update mutable metadata, preserving the creation timestamp
    pub fn update_metadata(
        &mut self,
        title: Option<String>,
        author: Option<String>,
        genre: Option<String>,
        review: Option<String>,
        rating: Option<u8>,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(author) = author {
            self.author = author;
        }
        if let Some(genre) = genre {
            self.genre = genre;
        }
        if let Some(review) = review {
            self.review = review;
        }
        if let Some(rating) = rating {
            self.rating = rating;
        }
        self.updated_at = Utc::now();
    }

    /// Attach cached cover image bytes
    pub fn set_cover_image(&mut self, bytes: Vec<u8>) {
        self.cover_image = Some(bytes);
        self.updated_at = Utc::now();
    }
}

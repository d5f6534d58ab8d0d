// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// LIBRARY EVENTS
// ============================================================================

/// Emitted when a book enters the library (manual entry or catalog import)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub book_id: Uuid,
    pub title: String,
    /// Present when the book was imported from the online catalog
    pub catalog_key: Option<String>,
}

impl BookAdded {
    pub fn new(book_id: Uuid, title: String, catalog_key: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            book_id,
            title,
            catalog_key,
        }
    }
}

impl DomainEvent for BookAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "BookAdded" }
}

/// Emitted when a book's metadata, rating or review changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub book_id: Uuid,
}

impl BookUpdated {
    pub fn new(book_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            book_id,
        }
    }
}

impl DomainEvent for BookUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "BookUpdated" }
}

/// Emitted when a book is removed from the library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub book_id: Uuid,
}

impl BookRemoved {
    pub fn new(book_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            book_id,
        }
    }
}

impl DomainEvent for BookRemoved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "BookRemoved" }
}

/// Emitted when a background cover download lands in the local store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverImageCached {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub book_id: Uuid,
    pub byte_count: usize,
}

impl CoverImageCached {
    pub fn new(book_id: Uuid, byte_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            book_id,
            byte_count,
        }
    }
}

impl DomainEvent for CoverImageCached {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CoverImageCached" }
}

// ============================================================================
// PROFILE EVENTS
// ============================================================================

/// Emitted when the reading profile changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub profile_id: Uuid,
}

impl ProfileUpdated {
    pub fn new(profile_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            profile_id,
        }
    }
}

impl DomainEvent for ProfileUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ProfileUpdated" }
}

// ============================================================================
// DISCOVERY EVENTS
// ============================================================================

/// Emitted when an online catalog search settles (results, empty or failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub query: String,
    pub result_count: usize,
    pub failed: bool,
}

impl SearchCompleted {
    pub fn new(query: String, result_count: usize, failed: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            query,
            result_count,
            failed,
        }
    }
}

impl DomainEvent for SearchCompleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SearchCompleted" }
}

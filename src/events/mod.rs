// src/events/mod.rs
//
// Internal Event System - Public API
//
// The type-erased EventHandler alias is internal to the bus module and
// must NOT be exported.

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    BookAdded, BookRemoved, BookUpdated, CoverImageCached, ProfileUpdated, SearchCompleted,
};

pub use bus::EventBus;

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}

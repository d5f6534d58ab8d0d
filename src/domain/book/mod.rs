pub mod entity;
pub mod invariants;

pub use entity::Book;
pub use invariants::{validate_book, validate_rating, MAX_RATING};

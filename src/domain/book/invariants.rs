use super::entity::Book;
use crate::domain::{DomainError, DomainResult};

/// Highest allowed star rating
pub const MAX_RATING: u8 = 5;

/// Validates all Book invariants
pub fn validate_book(book: &Book) -> DomainResult<()> {
    validate_title(&book.title)?;
    validate_author(&book.author)?;
    validate_rating(book.rating)?;
    Ok(())
}

/// Title cannot be empty after trimming
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Book title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Author cannot be empty after trimming
fn validate_author(author: &str) -> DomainResult<()> {
    if author.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Book author cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Rating must stay within 0..=5
pub fn validate_rating(rating: u8) -> DomainResult<()> {
    if rating > MAX_RATING {
        return Err(DomainError::InvariantViolation(format!(
            "Rating {} exceeds maximum of {}",
            rating, MAX_RATING
        )));
    }
    Ok(())
}

/// Invariants that must hold for the Book domain:
///
/// 1. Identity (UUID) is immutable
/// 2. Title and author are non-empty after trimming
/// 3. Rating is between 0 and 5 inclusive
/// 4. Cover URL and cached bytes are independently optional
/// 5. Created timestamp never changes
/// 6. Updated timestamp reflects last modification

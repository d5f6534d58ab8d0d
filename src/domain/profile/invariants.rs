use super::entity::Profile;
use crate::domain::{DomainError, DomainResult};

/// Validates Profile invariants
pub fn validate_profile(profile: &Profile) -> DomainResult<()> {
    if profile.reading_goal < 0 {
        return Err(DomainError::InvariantViolation(
            "Reading goal cannot be negative".to_string(),
        ));
    }
    Ok(())
}

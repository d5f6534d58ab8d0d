// src/services/profile_service.rs
//
// Reading profile management
//
// The store carries exactly one profile. Instead of an ambient
// find-or-insert lifecycle hook, get_or_create_profile is the single
// explicit entry point that upholds that invariant.

use crate::domain::profile::{validate_profile, Profile};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, ProfileUpdated};
use crate::repositories::ProfileRepository;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub reading_goal: Option<i32>,
    pub favorite_genres: Option<Vec<String>>,
    pub bio: Option<String>,
}

pub struct ProfileService {
    profile_repo: Arc<dyn ProfileRepository>,
    event_bus: Arc<EventBus>,
}

impl ProfileService {
    pub fn new(profile_repo: Arc<dyn ProfileRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            profile_repo,
            event_bus,
        }
    }

    /// Return the store's single profile, creating a default one on first
    /// use.
    pub fn get_or_create_profile(&self) -> AppResult<Profile> {
        if let Some(profile) = self.profile_repo.get_first()? {
            return Ok(profile);
        }

        let profile = Profile::new();
        self.profile_repo.save(&profile)?;
        Ok(profile)
    }

    pub fn update_profile(&self, request: UpdateProfileRequest) -> AppResult<Profile> {
        let mut profile = self.get_or_create_profile()?;

        if let Some(first_name) = request.first_name {
            profile.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            profile.last_name = last_name;
        }
        if let Some(email) = request.email {
            profile.email = email;
        }
        if let Some(gender) = request.gender {
            profile.gender = gender;
        }
        if let Some(reading_goal) = request.reading_goal {
            profile.reading_goal = reading_goal;
        }
        if let Some(favorite_genres) = request.favorite_genres {
            profile.favorite_genres = favorite_genres;
        }
        if let Some(bio) = request.bio {
            profile.bio = bio;
        }

        validate_profile(&profile).map_err(AppError::Domain)?;
        self.profile_repo.save(&profile)?;

        self.event_bus.emit(ProfileUpdated::new(profile.id));
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::profile_repository::MockProfileRepository;

    fn empty_request() -> UpdateProfileRequest {
        UpdateProfileRequest {
            first_name: None,
            last_name: None,
            email: None,
            gender: None,
            reading_goal: None,
            favorite_genres: None,
            bio: None,
        }
    }

    #[test]
    fn test_get_or_create_inserts_default_on_first_use() {
        let mut repo = MockProfileRepository::new();
        repo.expect_get_first().times(1).returning(|| Ok(None));
        repo.expect_save().times(1).returning(|_| Ok(()));

        let service = ProfileService::new(Arc::new(repo), Arc::new(EventBus::new()));
        let profile = service.get_or_create_profile().unwrap();

        assert_eq!(profile.reading_goal, 12);
    }

    #[test]
    fn test_get_or_create_returns_existing_without_saving() {
        let existing = Profile::new();
        let existing_id = existing.id;

        let mut repo = MockProfileRepository::new();
        repo.expect_get_first()
            .times(1)
            .returning(move || Ok(Some(existing.clone())));
        repo.expect_save().never();

        let service = ProfileService::new(Arc::new(repo), Arc::new(EventBus::new()));
        let profile = service.get_or_create_profile().unwrap();

        assert_eq!(profile.id, existing_id);
    }

    #[test]
    fn test_update_profile_persists_changes() {
        let existing = Profile::new();

        let mut repo = MockProfileRepository::new();
        repo.expect_get_first()
            .returning(move || Ok(Some(existing.clone())));
        repo.expect_save()
            .withf(|p: &Profile| p.first_name == "Ada" && p.reading_goal == 30)
            .times(1)
            .returning(|_| Ok(()));

        let service = ProfileService::new(Arc::new(repo), Arc::new(EventBus::new()));

        let mut request = empty_request();
        request.first_name = Some("Ada".to_string());
        request.reading_goal = Some(30);

        let profile = service.update_profile(request).unwrap();
        assert_eq!(profile.first_name, "Ada");
    }

    #[test]
    fn test_negative_reading_goal_is_rejected() {
        let existing = Profile::new();

        let mut repo = MockProfileRepository::new();
        repo.expect_get_first()
            .returning(move || Ok(Some(existing.clone())));
        repo.expect_save().never();

        let service = ProfileService::new(Arc::new(repo), Arc::new(EventBus::new()));

        let mut request = empty_request();
        request.reading_goal = Some(-5);

        assert!(matches!(
            service.update_profile(request),
            Err(AppError::Domain(_))
        ));
    }
}

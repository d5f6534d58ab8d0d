use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The user's reading profile. Exactly one profile exists per local store;
/// callers go through `ProfileService::get_or_create_profile` rather than
/// constructing ad-hoc instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Internal immutable identifier
    pub id: Uuid,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub gender: String,

    /// Avatar image bytes
    pub profile_image: Option<Vec<u8>>,

    /// Books-per-year reading goal
    pub reading_goal: i32,

    /// Preferred genres, user-ordered
    pub favorite_genres: Vec<String>,

    pub bio: String,

    /// When the profile was first created
    pub join_date: DateTime<Utc>,
}

impl Profile {
    /// Create a fresh default profile
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            gender: "Not specified".to_string(),
            profile_image: None,
            reading_goal: 12,
            favorite_genres: Vec::new(),
            bio: String::new(),
            join_date: Utc::now(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

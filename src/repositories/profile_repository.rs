// src/repositories/profile_repository.rs
//
// Profile persistence
//
// The store holds at most one profile row; `get_first` backs the explicit
// get-or-create flow in ProfileService.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::profile::Profile;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait ProfileRepository: Send + Sync {
    fn save(&self, profile: &Profile) -> AppResult<()>;
    fn get_first(&self) -> AppResult<Option<Profile>>;
    fn count(&self) -> AppResult<u32>;
}

pub struct SqliteProfileRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteProfileRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_profile(row: &Row) -> Result<Profile, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let genres_json: String = row.get("favorite_genres")?;
        let favorite_genres: Vec<String> = serde_json::from_str(&genres_json)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let join_date_str: String = row.get("join_date")?;
        let join_date = DateTime::parse_from_rfc3339(&join_date_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Profile {
            id,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email: row.get("email")?,
            gender: row.get("gender")?,
            profile_image: row.get("profile_image")?,
            reading_goal: row.get("reading_goal")?,
            favorite_genres,
            bio: row.get("bio")?,
            join_date,
        })
    }
}

impl ProfileRepository for SqliteProfileRepository {
    fn save(&self, profile: &Profile) -> AppResult<()> {
        let conn = self.pool.get()?;

        let genres_json = serde_json::to_string(&profile.favorite_genres)?;

        conn.execute(
            "INSERT OR REPLACE INTO profiles (
                id, first_name, last_name, email, gender,
                profile_image, reading_goal, favorite_genres, bio, join_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                profile.id.to_string(),
                profile.first_name,
                profile.last_name,
                profile.email,
                profile.gender,
                profile.profile_image,
                profile.reading_goal,
                genres_json,
                profile.bio,
                profile.join_date.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_first(&self) -> AppResult<Option<Profile>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, first_name, last_name, email, gender,
                    profile_image, reading_goal, favorite_genres, bio, join_date
             FROM profiles
             ORDER BY join_date
             LIMIT 1",
        )?;

        match stmt.query_row([], Self::row_to_profile) {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn count(&self) -> AppResult<u32> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))?;

        Ok(count as u32)
    }
}

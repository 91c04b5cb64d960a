//! Public Profiles and Follows
//!
//! The reader-facing side of an account: a short bio, reading goals and who
//! follows whom. Contact details stay on `/api/auth/profile`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::book::Book;
use crate::shared::validate::{max_len, non_blank};
use crate::shared::SharedError;

const LOCATION_MAX: usize = 100;
const GENRE_MAX: usize = 100;

/// A user as anyone may see them; no email, phone or address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub favorite_genres: Option<Vec<String>>,
    pub reading_goal: Option<i32>,
    pub books_read: Option<i32>,
}

/// Body of `GET /api/profiles/{username}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicProfile {
    pub user: PublicUser,
    pub books: Vec<Book>,
    pub followers: i64,
    pub following: i64,
    #[serde(rename = "activeListings")]
    pub active_listings: i64,
}

/// Entry in a followers or following list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCard {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowStatus {
    #[serde(rename = "isFollowing")]
    pub is_following: bool,
}

/// Body of `PUT /api/profiles/me`. The stored profile is replaced, so an
/// absent field clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub favorite_genres: Option<Vec<String>>,
    pub reading_goal: Option<i32>,
}

impl ProfileUpdate {
    pub fn validate(self) -> Result<Self, SharedError> {
        let location = non_blank(self.location).map(|l| l.trim().to_string());
        max_len(location.as_deref(), "location", "Location", LOCATION_MAX)?;

        if self.reading_goal.is_some_and(|goal| goal < 0) {
            return Err(SharedError::validation(
                "reading_goal",
                "Reading goal cannot be negative",
            ));
        }

        let favorite_genres = match self.favorite_genres {
            Some(genres) => {
                let genres: Vec<String> = genres
                    .into_iter()
                    .map(|g| g.trim().to_string())
                    .filter(|g| !g.is_empty())
                    .collect();
                for genre in &genres {
                    max_len(Some(genre), "favorite_genres", "Genre", GENRE_MAX)?;
                }
                Some(genres)
            }
            None => None,
        };

        Ok(Self {
            bio: non_blank(self.bio),
            avatar_url: non_blank(self.avatar_url).map(|u| u.trim().to_string()),
            location,
            favorite_genres,
            reading_goal: self.reading_goal,
        })
    }
}

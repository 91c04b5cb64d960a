//! Profile and follow rows

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use crate::shared::profile::{ProfileUpdate, PublicUser, UserCard};

impl<'r> FromRow<'r, PgRow> for PublicUser {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(PublicUser {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            full_name: row.try_get("full_name")?,
            created_at: row.try_get("created_at")?,
            bio: row.try_get("bio")?,
            avatar_url: row.try_get("avatar_url")?,
            location: row.try_get("location")?,
            favorite_genres: row.try_get("favorite_genres")?,
            reading_goal: row.try_get("reading_goal")?,
            books_read: row.try_get("books_read")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCard {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(UserCard {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            full_name: row.try_get("full_name")?,
            avatar_url: row.try_get("avatar_url")?,
        })
    }
}

/// Follower and following counts plus active listings, in one round trip
pub struct ProfileStats {
    pub followers: i64,
    pub following: i64,
    pub active_listings: i64,
}

pub async fn public_user(pool: &PgPool, username: &str) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT u.id, u.username, u.full_name, u.created_at,
               p.bio, p.avatar_url, p.location, p.favorite_genres, p.reading_goal, p.books_read
        FROM users u
        LEFT JOIN user_profiles p ON p.user_id = u.id
        WHERE u.username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn stats(pool: &PgPool, user_id: Uuid) -> Result<ProfileStats, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM user_follows WHERE following_id = $1) AS followers,
            (SELECT COUNT(*) FROM user_follows WHERE follower_id = $1) AS following,
            (SELECT COUNT(*) FROM marketplace_listings WHERE user_id = $1 AND status = 'active') AS active_listings
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(ProfileStats {
        followers: row.try_get("followers")?,
        following: row.try_get("following")?,
        active_listings: row.try_get("active_listings")?,
    })
}

/// Insert or replace the profile of `user_id`
pub async fn upsert_profile(pool: &PgPool, user_id: Uuid, profile: &ProfileUpdate) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (user_id, bio, avatar_url, location, favorite_genres, reading_goal)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id) DO UPDATE SET
            bio = EXCLUDED.bio,
            avatar_url = EXCLUDED.avatar_url,
            location = EXCLUDED.location,
            favorite_genres = EXCLUDED.favorite_genres,
            reading_goal = EXCLUDED.reading_goal,
            updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(&profile.bio)
    .bind(&profile.avatar_url)
    .bind(&profile.location)
    .bind(&profile.favorite_genres)
    .bind(profile.reading_goal)
    .execute(pool)
    .await?;
    Ok(())
}

/// Follow `following_id`; following twice is a no-op
pub async fn follow(pool: &PgPool, follower_id: Uuid, following_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO user_follows (follower_id, following_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(follower_id)
    .bind(following_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn unfollow(pool: &PgPool, follower_id: Uuid, following_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM user_follows WHERE follower_id = $1 AND following_id = $2")
        .bind(follower_id)
        .bind(following_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn is_following(pool: &PgPool, follower_id: Uuid, following_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM user_follows WHERE follower_id = $1 AND following_id = $2) AS following",
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_one(pool)
    .await?;

    row.try_get("following")
}

/// Users following `user_id`, most recent first
pub async fn followers(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserCard>, sqlx::Error> {
    sqlx::query_as::<_, UserCard>(
        r#"
        SELECT u.id, u.username, u.full_name, p.avatar_url
        FROM user_follows f
        JOIN users u ON u.id = f.follower_id
        LEFT JOIN user_profiles p ON p.user_id = u.id
        WHERE f.following_id = $1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Users `user_id` follows, most recent first
pub async fn following(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserCard>, sqlx::Error> {
    sqlx::query_as::<_, UserCard>(
        r#"
        SELECT u.id, u.username, u.full_name, p.avatar_url
        FROM user_follows f
        JOIN users u ON u.id = f.following_id
        LEFT JOIN user_profiles p ON p.user_id = u.id
        WHERE f.follower_id = $1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

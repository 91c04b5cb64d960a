//! Message rows

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::shared::messaging::{Conversation, Message, NewMessage, ThreadMessage};

const MESSAGE_COLUMNS: &str = "m.id, m.sender_id, m.recipient_id, m.subject, m.message, \
     m.listing_id, m.is_read, m.created_at";

impl<'r> FromRow<'r, PgRow> for Message {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Message {
            id: row.try_get("id")?,
            sender_id: row.try_get("sender_id")?,
            recipient_id: row.try_get("recipient_id")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            listing_id: row.try_get("listing_id")?,
            is_read: row.try_get("is_read")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ThreadMessage {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ThreadMessage {
            message: Message::from_row(row)?,
            sender_username: row.try_get("sender_username")?,
            recipient_username: row.try_get("recipient_username")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Conversation {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Conversation {
            id: row.try_get("id")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            is_read: row.try_get("is_read")?,
            created_at: row.try_get("created_at")?,
            other_user_id: row.try_get("other_user_id")?,
            other_username: row.try_get("other_username")?,
            other_full_name: row.try_get("other_full_name")?,
            other_avatar: row.try_get("other_avatar")?,
        })
    }
}

pub async fn insert_message(
    pool: &PgPool,
    sender_id: Uuid,
    message: &NewMessage,
) -> Result<Message, sqlx::Error> {
    sqlx::query_as::<_, Message>(&format!(
        r#"
        INSERT INTO messages AS m (id, sender_id, recipient_id, subject, message, listing_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {MESSAGE_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(sender_id)
    .bind(message.recipient_id)
    .bind(&message.subject)
    .bind(&message.message)
    .bind(message.listing_id)
    .fetch_one(pool)
    .await
}

/// Latest message per correspondent, most recent conversation first
pub async fn conversations(pool: &PgPool, user_id: Uuid) -> Result<Vec<Conversation>, sqlx::Error> {
    sqlx::query_as::<_, Conversation>(
        r#"
        SELECT * FROM (
            SELECT DISTINCT ON (other_user_id)
                m.id, m.subject, m.message, m.is_read, m.created_at,
                other_user_id,
                u.username AS other_username,
                u.full_name AS other_full_name,
                p.avatar_url AS other_avatar
            FROM messages m
            CROSS JOIN LATERAL (
                SELECT CASE WHEN m.sender_id = $1 THEN m.recipient_id ELSE m.sender_id END AS other_user_id
            ) other
            JOIN users u ON u.id = other.other_user_id
            LEFT JOIN user_profiles p ON p.user_id = u.id
            WHERE m.sender_id = $1 OR m.recipient_id = $1
            ORDER BY other_user_id, m.created_at DESC
        ) latest
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Both directions of one conversation, oldest first
pub async fn thread(
    conn: &mut PgConnection,
    user_id: Uuid,
    other_id: Uuid,
) -> Result<Vec<ThreadMessage>, sqlx::Error> {
    sqlx::query_as::<_, ThreadMessage>(&format!(
        r#"
        SELECT {MESSAGE_COLUMNS},
               sender.username AS sender_username,
               recipient.username AS recipient_username
        FROM messages m
        JOIN users sender ON sender.id = m.sender_id
        JOIN users recipient ON recipient.id = m.recipient_id
        WHERE (m.sender_id = $1 AND m.recipient_id = $2)
           OR (m.sender_id = $2 AND m.recipient_id = $1)
        ORDER BY m.created_at ASC
        "#
    ))
    .bind(user_id)
    .bind(other_id)
    .fetch_all(conn)
    .await
}

/// Mark everything `sender_id` sent to `recipient_id` as read
pub async fn mark_thread_read(
    conn: &mut PgConnection,
    sender_id: Uuid,
    recipient_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE messages SET is_read = TRUE WHERE sender_id = $1 AND recipient_id = $2 AND NOT is_read",
    )
    .bind(sender_id)
    .bind(recipient_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

pub async fn unread_count(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS unread FROM messages WHERE recipient_id = $1 AND NOT is_read")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    row.try_get("unread")
}

/// Mark one received message as read; false if it is not addressed to the user
pub async fn mark_read(pool: &PgPool, id: Uuid, recipient_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE messages SET is_read = TRUE WHERE id = $1 AND recipient_id = $2")
        .bind(id)
        .bind(recipient_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Delete a message the user sent or received
pub async fn delete_message(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM messages WHERE id = $1 AND (sender_id = $2 OR recipient_id = $2)")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

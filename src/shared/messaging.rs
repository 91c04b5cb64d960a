//! Direct Messages
//!
//! Private messages between two users, optionally about a listing. A
//! conversation is every message exchanged with one other user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::validate::{max_len, non_blank};
use crate::shared::SharedError;

const SUBJECT_MAX: usize = 255;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub subject: Option<String>,
    pub message: String,
    pub listing_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A message inside a conversation, with both usernames
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreadMessage {
    #[serde(flatten)]
    pub message: Message,
    pub sender_username: String,
    pub recipient_username: String,
}

/// The latest message exchanged with one other user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conversation {
    pub id: Uuid,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub other_user_id: Uuid,
    pub other_username: String,
    pub other_full_name: Option<String>,
    pub other_avatar: Option<String>,
}

/// Body of `POST /api/messages/send`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub recipient_id: Option<Uuid>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub listing_id: Option<Uuid>,
}

/// A message ready to store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub recipient_id: Uuid,
    pub subject: Option<String>,
    pub message: String,
    pub listing_id: Option<Uuid>,
}

impl SendMessageRequest {
    pub fn validate(self, sender_id: Uuid) -> Result<NewMessage, SharedError> {
        let (Some(recipient_id), Some(message)) = (self.recipient_id, non_blank(self.message)) else {
            return Err(SharedError::validation(
                "message",
                "Recipient and message are required",
            ));
        };
        if recipient_id == sender_id {
            return Err(SharedError::validation("recipient_id", "Cannot message yourself"));
        }

        let subject = non_blank(self.subject).map(|s| s.trim().to_string());
        max_len(subject.as_deref(), "subject", "Subject", SUBJECT_MAX)?;

        Ok(NewMessage {
            recipient_id,
            subject,
            message,
            listing_id: self.listing_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: String,
    pub data: Message,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadCount {
    pub count: i64,
}

//! Exchange Request Data Structure
//!
//! A proposal to swap one of the requester's books for an exchange listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::validate::{non_blank, required};
use crate::shared::SharedError;

/// Status of an exchange request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    /// Seller confirmed the swap happened
    Completed,
}

impl ExchangeStatus {
    pub const ALL: [ExchangeStatus; 4] = [
        ExchangeStatus::Pending,
        ExchangeStatus::Accepted,
        ExchangeStatus::Rejected,
        ExchangeStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeStatus::Pending => "pending",
            ExchangeStatus::Accepted => "accepted",
            ExchangeStatus::Rejected => "rejected",
            ExchangeStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ExchangeStatus::Pending),
            "accepted" => Some(ExchangeStatus::Accepted),
            "rejected" => Some(ExchangeStatus::Rejected),
            "completed" => Some(ExchangeStatus::Completed),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: ExchangeStatus) -> bool {
        matches!(
            (self, next),
            (ExchangeStatus::Pending, ExchangeStatus::Accepted)
                | (ExchangeStatus::Pending, ExchangeStatus::Rejected)
                | (ExchangeStatus::Accepted, ExchangeStatus::Completed)
        )
    }

    pub fn check_transition(&self, next: ExchangeStatus) -> Result<(), SharedError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(SharedError::transition("exchange request", self.as_str(), next.as_str()))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExchangeRequest {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub requester_id: Uuid,
    pub offered_book_id: Uuid,
    pub status: ExchangeStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An exchange request joined with book titles and the other party's name.
///
/// `requester_name` is filled for the seller's inbox, `seller_name` for the
/// requester's outbox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExchangeRequestSummary {
    #[serde(flatten)]
    pub request: ExchangeRequest,
    pub listing_book_title: String,
    pub offered_book_title: String,
    pub offered_book_author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
}

/// Body of `POST /api/marketplace/exchange-requests`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateExchangeRequest {
    pub listing_id: Option<Uuid>,
    pub offered_book_id: Option<Uuid>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExchangeRequest {
    pub listing_id: Uuid,
    pub offered_book_id: Uuid,
    pub message: Option<String>,
}

impl CreateExchangeRequest {
    pub fn validate(self) -> Result<NewExchangeRequest, SharedError> {
        const MISSING: &str = "Listing ID and offered book ID are required";
        Ok(NewExchangeRequest {
            listing_id: required(self.listing_id, "listing_id", MISSING)?,
            offered_book_id: required(self.offered_book_id, "offered_book_id", MISSING)?,
            message: non_blank(self.message),
        })
    }
}

/// Body of `PUT /api/marketplace/exchange-requests/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RespondExchangeRequest {
    pub status: Option<String>,
}

impl RespondExchangeRequest {
    /// The seller's decision; `pending` is not a decision
    pub fn decision(&self) -> Result<ExchangeStatus, SharedError> {
        self.status
            .as_deref()
            .and_then(ExchangeStatus::from_str)
            .filter(|status| *status != ExchangeStatus::Pending)
            .ok_or_else(|| SharedError::validation("status", "Invalid status"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRequestResponse {
    pub message: String,
    pub request: ExchangeRequest,
}

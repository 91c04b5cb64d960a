//! Negotiation Data Structure
//!
//! A buyer's alternate price for a sell listing, answered by the seller.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::validate::{money, non_blank, required};
use crate::shared::SharedError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStatus {
    #[default]
    Pending,
    Countered,
    Accepted,
    Rejected,
}

impl NegotiationStatus {
    pub const ALL: [NegotiationStatus; 4] = [
        NegotiationStatus::Pending,
        NegotiationStatus::Countered,
        NegotiationStatus::Accepted,
        NegotiationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NegotiationStatus::Pending => "pending",
            NegotiationStatus::Countered => "countered",
            NegotiationStatus::Accepted => "accepted",
            NegotiationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(NegotiationStatus::Pending),
            "countered" => Some(NegotiationStatus::Countered),
            "accepted" => Some(NegotiationStatus::Accepted),
            "rejected" => Some(NegotiationStatus::Rejected),
            _ => None,
        }
    }

    /// Open negotiations are `pending` or `countered`; the seller may revise
    /// a counter. Nothing returns to `pending`.
    pub fn can_transition_to(&self, next: NegotiationStatus) -> bool {
        let open = matches!(self, NegotiationStatus::Pending | NegotiationStatus::Countered);
        open && next != NegotiationStatus::Pending
    }

    pub fn check_transition(&self, next: NegotiationStatus) -> Result<(), SharedError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(SharedError::transition("negotiation", self.as_str(), next.as_str()))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Negotiation {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub original_price: Decimal,
    pub offered_price: Decimal,
    pub counter_price: Option<Decimal>,
    pub status: NegotiationStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Negotiation {
    /// Price written onto the listing when the seller accepts.
    ///
    /// This is the buyer's `offered_price` even when the seller countered.
    // TODO: confirm with product whether an accepted counter should settle at counter_price.
    pub fn settlement_price(&self) -> Decimal {
        self.offered_price
    }
}

/// A negotiation joined with its book and the other party.
///
/// Seller-side queries fill the `buyer_*` fields, buyer-side queries the
/// `seller_*` fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NegotiationSummary {
    #[serde(flatten)]
    pub negotiation: Negotiation,
    pub book_title: String,
    pub book_author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
}

/// Body of `POST /api/negotiations`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNegotiationRequest {
    pub listing_id: Option<Uuid>,
    pub offered_price: Option<Decimal>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOffer {
    pub listing_id: Uuid,
    pub offered_price: Decimal,
    pub message: Option<String>,
}

impl CreateNegotiationRequest {
    pub fn validate(self) -> Result<NewOffer, SharedError> {
        const MISSING: &str = "Listing ID and offered price are required";
        let listing_id = required(self.listing_id, "listing_id", MISSING)?;
        let offered_price = required(self.offered_price, "offered_price", MISSING)?;
        Ok(NewOffer {
            listing_id,
            offered_price: money(offered_price, "offered_price", "Offered price")?,
            message: non_blank(self.message),
        })
    }
}

/// Body of `PUT /api/negotiations/{id}/counter`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CounterOfferRequest {
    pub counter_price: Option<Decimal>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterOffer {
    pub counter_price: Decimal,
    pub message: Option<String>,
}

impl CounterOfferRequest {
    pub fn validate(self) -> Result<CounterOffer, SharedError> {
        let counter_price = required(self.counter_price, "counter_price", "Counter price is required")?;
        Ok(CounterOffer {
            counter_price: money(counter_price, "counter_price", "Counter price")?,
            message: non_blank(self.message),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationResponse {
    pub message: String,
    pub negotiation: Negotiation,
}

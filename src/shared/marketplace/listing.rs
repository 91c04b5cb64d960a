//! Listing Data Structure
//!
//! A listing offers one book for sale or for exchange. Its status starts at
//! `active`; `sold`, `exchanged` and `cancelled` are terminal.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::validate::{empty_as_none, money, non_blank, required};
use crate::shared::SharedError;

/// Whether the book is sold for money or swapped for another book
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ListingType {
    Sell,
    Exchange,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Sell => "sell",
            ListingType::Exchange => "exchange",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sell" => Some(ListingType::Sell),
            "exchange" => Some(ListingType::Exchange),
            _ => None,
        }
    }
}

/// Physical condition of the listed copy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::LikeNew => "like-new",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Condition::New),
            "like-new" => Some(Condition::LikeNew),
            "good" => Some(Condition::Good),
            "fair" => Some(Condition::Fair),
            "poor" => Some(Condition::Poor),
            _ => None,
        }
    }
}

/// Lifecycle status of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Active,
    Sold,
    Exchanged,
    Cancelled,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 4] = [
        ListingStatus::Active,
        ListingStatus::Sold,
        ListingStatus::Exchanged,
        ListingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Sold => "sold",
            ListingStatus::Exchanged => "exchanged",
            ListingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ListingStatus::Active),
            "sold" => Some(ListingStatus::Sold),
            "exchanged" => Some(ListingStatus::Exchanged),
            "cancelled" => Some(ListingStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ListingStatus::Active)
    }

    /// Every status change the system can make
    pub fn can_transition_to(&self, next: ListingStatus) -> bool {
        matches!(
            (self, next),
            (ListingStatus::Active, ListingStatus::Sold)
                | (ListingStatus::Active, ListingStatus::Exchanged)
                | (ListingStatus::Active, ListingStatus::Cancelled)
        )
    }

    /// Status changes a seller may request through a listing update.
    ///
    /// Re-stating the current status is a no-op. `sold` and `exchanged` are
    /// only reached through a purchase or an accepted exchange.
    pub fn check_seller_update(&self, next: ListingStatus) -> Result<(), SharedError> {
        if *self == next {
            return Ok(());
        }
        match (self, next) {
            (ListingStatus::Active, ListingStatus::Cancelled) => Ok(()),
            _ => Err(SharedError::transition("listing", self.as_str(), next.as_str())),
        }
    }
}

/// A marketplace listing row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: Uuid,
    pub book_id: Uuid,
    pub seller_id: Uuid,
    pub listing_type: ListingType,
    /// Always present for sell listings
    pub price: Option<Decimal>,
    pub condition: Condition,
    pub status: ListingStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn is_available(&self, listing_type: ListingType) -> bool {
        self.listing_type == listing_type && self.status == ListingStatus::Active
    }

    /// Reject actions a seller attempts against their own listing
    pub fn ensure_not_seller(&self, user_id: Uuid, message: &str) -> Result<(), SharedError> {
        if self.seller_id == user_id {
            Err(SharedError::validation("listing_id", message))
        } else {
            Ok(())
        }
    }

    /// Price a buyer pays for a sell listing
    pub fn sale_price(&self) -> Result<Decimal, SharedError> {
        match (self.listing_type, self.price) {
            (ListingType::Sell, Some(price)) => Ok(price),
            _ => Err(SharedError::validation("price", "Listing has no sale price")),
        }
    }

    /// Validate a seller's patch against the current row
    pub fn check_patch(&self, patch: &ListingPatch) -> Result<(), SharedError> {
        if let Some(status) = patch.status {
            self.status.check_seller_update(status)?;
        }
        if self.status.is_terminal() && patch.changes_terms() {
            return Err(SharedError::validation(
                "status",
                format!("Cannot edit a listing that is {}", self.status.as_str()),
            ));
        }
        Ok(())
    }
}

/// A listing joined with its book and seller for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingSummary {
    #[serde(flatten)]
    pub listing: Listing,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub pages: Option<i32>,
    pub isbn: Option<String>,
    pub seller_name: String,
}

/// Body of `POST /api/marketplace/listings`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateListingRequest {
    pub book_id: Option<Uuid>,
    pub listing_type: Option<ListingType>,
    pub price: Option<Decimal>,
    pub condition: Option<Condition>,
    pub description: Option<String>,
}

/// A validated listing ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub book_id: Uuid,
    pub listing_type: ListingType,
    pub price: Option<Decimal>,
    pub condition: Condition,
    pub description: Option<String>,
}

impl CreateListingRequest {
    pub fn validate(self) -> Result<NewListing, SharedError> {
        const MISSING: &str = "Book ID, listing type, and condition are required";
        let book_id = required(self.book_id, "book_id", MISSING)?;
        let listing_type = required(self.listing_type, "listing_type", MISSING)?;
        let condition = required(self.condition, "condition", MISSING)?;

        let price = match (listing_type, self.price) {
            (ListingType::Sell, None) => {
                return Err(SharedError::validation("price", "Price is required for sell listings"))
            }
            (_, Some(price)) => Some(money(price, "price", "Price")?),
            (ListingType::Exchange, None) => None,
        };

        Ok(NewListing {
            book_id,
            listing_type,
            price,
            condition,
            description: non_blank(self.description),
        })
    }
}

/// Body of `PUT /api/marketplace/listings/{id}`; absent fields are unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingPatch {
    pub price: Option<Decimal>,
    pub condition: Option<Condition>,
    pub description: Option<String>,
    pub status: Option<ListingStatus>,
}

impl ListingPatch {
    pub fn validate(self) -> Result<Self, SharedError> {
        if let Some(price) = self.price {
            money(price, "price", "Price")?;
        }
        Ok(self)
    }

    fn changes_terms(&self) -> bool {
        self.price.is_some() || self.condition.is_some() || self.description.is_some()
    }
}

/// Query string of `GET /api/marketplace/listings`
///
/// Browsers send every filter, blank ones as `type=`; blank means unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingFilters {
    #[serde(rename = "type", default, deserialize_with = "empty_as_none")]
    pub listing_type: Option<ListingType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub condition: Option<Condition>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl ListingFilters {
    /// Empty genre strings mean "no filter"
    pub fn normalized(self) -> Self {
        Self {
            genre: non_blank(self.genre).map(|g| g.trim().to_string()),
            ..self
        }
    }
}

/// Response of listing create/update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResponse {
    pub message: String,
    pub listing: Listing,
}

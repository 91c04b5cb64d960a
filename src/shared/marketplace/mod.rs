//! Marketplace Module
//!
//! Data structures and state machines for the marketplace:
//!
//! - `Listing` - A book offered for sale or exchange
//! - `ExchangeRequest` - A proposed book swap against an exchange listing
//! - `Negotiation` - A proposed price against a sell listing
//! - `Transaction` - A recorded purchase
//!
//! Every status enum exposes `can_transition_to`; the backend consults it
//! before writing a status change.
//!
//! # Usage
//!
//! ```rust
//! use book_bazaar::shared::marketplace::{ListingStatus, NegotiationStatus};
//!
//! assert!(ListingStatus::Active.can_transition_to(ListingStatus::Sold));
//! assert!(!NegotiationStatus::Accepted.can_transition_to(NegotiationStatus::Rejected));
//! ```

pub mod listing;
pub mod exchange_request;
pub mod negotiation;
pub mod transaction;

pub use listing::{
    Condition, CreateListingRequest, Listing, ListingFilters, ListingPatch, ListingResponse,
    ListingStatus, ListingSummary, ListingType, NewListing,
};
pub use exchange_request::{
    CreateExchangeRequest, ExchangeRequest, ExchangeRequestResponse, ExchangeRequestSummary,
    ExchangeStatus, NewExchangeRequest, RespondExchangeRequest,
};
pub use negotiation::{
    CounterOffer, CounterOfferRequest, CreateNegotiationRequest, Negotiation,
    NegotiationResponse, NegotiationStatus, NegotiationSummary, NewOffer,
};
pub use transaction::{
    PurchaseRequest, Transaction, TransactionResponse, TransactionStatus, TransactionSummary,
};

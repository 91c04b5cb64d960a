//! Marketplace HTTP Handlers
//!
//! Thin wrappers around the managers: validate the body, borrow the pool,
//! call the manager and wrap the result in the response envelope.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::{exchange, listings, negotiations, transactions};
use crate::backend::books::MessageResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::marketplace::{
    CounterOfferRequest, CreateExchangeRequest, CreateListingRequest, CreateNegotiationRequest,
    ExchangeRequestResponse, ExchangeRequestSummary, ListingFilters, ListingPatch,
    ListingResponse, ListingSummary, NegotiationResponse, NegotiationSummary, PurchaseRequest,
    RespondExchangeRequest, TransactionResponse, TransactionSummary,
};

// Listings

/// GET /api/marketplace/listings
pub async fn list_listings(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<ListingFilters>,
) -> Result<Json<Vec<ListingSummary>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(listings::list(pool, filters).await?))
}

/// GET /api/marketplace/my-listings
pub async fn my_listings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ListingSummary>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(listings::list_mine(pool, user.id()).await?))
}

/// POST /api/marketplace/listings
pub async fn create_listing(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreateListingRequest>,
) -> Result<(StatusCode, Json<ListingResponse>), BackendError> {
    let listing = request.validate()?;
    let pool = state.pool()?;

    let listing = listings::create(pool, user.id(), listing).await?;
    Ok((
        StatusCode::CREATED,
        Json(ListingResponse {
            message: "Listing created successfully".to_string(),
            listing,
        }),
    ))
}

/// PUT /api/marketplace/listings/{id}
pub async fn update_listing(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<ListingPatch>,
) -> Result<Json<ListingResponse>, BackendError> {
    let patch = patch.validate()?;
    let pool = state.pool()?;

    let listing = listings::update(pool, id, user.id(), patch).await?;
    Ok(Json(ListingResponse {
        message: "Listing updated successfully".to_string(),
        listing,
    }))
}

/// DELETE /api/marketplace/listings/{id}
pub async fn delete_listing(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    let pool = state.pool()?;

    listings::delete(pool, id, user.id()).await?;
    Ok(Json(MessageResponse {
        message: "Listing deleted successfully".to_string(),
    }))
}

// Exchange requests

/// POST /api/marketplace/exchange-requests
pub async fn create_exchange_request(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreateExchangeRequest>,
) -> Result<(StatusCode, Json<ExchangeRequestResponse>), BackendError> {
    let request = request.validate()?;
    let pool = state.pool()?;

    let request = exchange::propose(pool, user.id(), request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ExchangeRequestResponse {
            message: "Exchange request sent successfully".to_string(),
            request,
        }),
    ))
}

/// PUT /api/marketplace/exchange-requests/{id}
pub async fn respond_exchange_request(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<RespondExchangeRequest>,
) -> Result<Json<ExchangeRequestResponse>, BackendError> {
    let decision = body.decision()?;
    let pool = state.pool()?;

    let request = exchange::respond(pool, id, user.id(), decision).await?;
    Ok(Json(ExchangeRequestResponse {
        message: "Exchange request updated successfully".to_string(),
        request,
    }))
}

/// GET /api/marketplace/exchange-requests/received
pub async fn received_exchange_requests(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ExchangeRequestSummary>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(exchange::received(pool, user.id()).await?))
}

/// GET /api/marketplace/exchange-requests/sent
pub async fn sent_exchange_requests(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ExchangeRequestSummary>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(exchange::sent(pool, user.id()).await?))
}

// Transactions

/// POST /api/marketplace/transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<PurchaseRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), BackendError> {
    let listing_id = request.validate()?;
    let pool = state.pool()?;

    let transaction = transactions::purchase(pool, user.id(), listing_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse {
            message: "Transaction created successfully".to_string(),
            transaction,
        }),
    ))
}

/// GET /api/marketplace/transactions/purchases
pub async fn purchase_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<TransactionSummary>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(transactions::purchases(pool, user.id()).await?))
}

/// GET /api/marketplace/transactions/sales
pub async fn sales_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<TransactionSummary>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(transactions::sales(pool, user.id()).await?))
}

// Negotiations

/// POST /api/negotiations
pub async fn create_negotiation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreateNegotiationRequest>,
) -> Result<(StatusCode, Json<NegotiationResponse>), BackendError> {
    let offer = request.validate()?;
    let pool = state.pool()?;

    let negotiation = negotiations::offer(pool, user.id(), offer).await?;
    Ok((
        StatusCode::CREATED,
        Json(NegotiationResponse {
            message: "Negotiation offer sent successfully".to_string(),
            negotiation,
        }),
    ))
}

/// GET /api/negotiations/listing/{listing_id}
pub async fn listing_negotiations(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(listing_id): ApiPath<Uuid>,
) -> Result<Json<Vec<NegotiationSummary>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(negotiations::for_listing(pool, listing_id, user.id()).await?))
}

/// GET /api/negotiations/my-offers
pub async fn my_offers(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<NegotiationSummary>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(negotiations::my_offers(pool, user.id()).await?))
}

/// GET /api/negotiations/received
pub async fn received_offers(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<NegotiationSummary>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(negotiations::received(pool, user.id()).await?))
}

/// PUT /api/negotiations/{id}/counter
pub async fn counter_negotiation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CounterOfferRequest>,
) -> Result<Json<NegotiationResponse>, BackendError> {
    let counter = request.validate()?;
    let pool = state.pool()?;

    let negotiation = negotiations::counter(pool, id, user.id(), counter).await?;
    Ok(Json(NegotiationResponse {
        message: "Counter offer sent successfully".to_string(),
        negotiation,
    }))
}

/// PUT /api/negotiations/{id}/accept
pub async fn accept_negotiation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<NegotiationResponse>, BackendError> {
    let pool = state.pool()?;

    let negotiation = negotiations::accept(pool, id, user.id()).await?;
    Ok(Json(NegotiationResponse {
        message: "Negotiation accepted successfully".to_string(),
        negotiation,
    }))
}

/// PUT /api/negotiations/{id}/reject
pub async fn reject_negotiation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<NegotiationResponse>, BackendError> {
    let pool = state.pool()?;

    let negotiation = negotiations::reject(pool, id, user.id()).await?;
    Ok(Json(NegotiationResponse {
        message: "Negotiation rejected".to_string(),
        negotiation,
    }))
}

/**
 * API Route Handlers
 *
 * This module registers every `/api` endpoint on the router.
 *
 * # Authentication
 *
 * Protected handlers take an `AuthUser` argument, which rejects requests
 * without a valid `Authorization: Bearer <token>` header with 401. Public
 * and protected methods can therefore share a path.
 */

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::backend::auth::{get_profile, login, register, update_profile};
use crate::backend::books;
use crate::backend::marketplace;
use crate::backend::messaging;
use crate::backend::profiles;
use crate::backend::server::state::AppState;

/// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/health", get(health))
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/profile", get(get_profile).put(update_profile))
        // Book catalogue
        .route("/api/books", get(books::list_books).post(books::create_book))
        .route("/api/books/mine", get(books::list_my_books))
        .route(
            "/api/books/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Listings
        .route(
            "/api/marketplace/listings",
            get(marketplace::list_listings).post(marketplace::create_listing),
        )
        .route("/api/marketplace/my-listings", get(marketplace::my_listings))
        .route(
            "/api/marketplace/listings/{id}",
            put(marketplace::update_listing).delete(marketplace::delete_listing),
        )
        // Exchange requests
        .route(
            "/api/marketplace/exchange-requests",
            post(marketplace::create_exchange_request),
        )
        .route(
            "/api/marketplace/exchange-requests/received",
            get(marketplace::received_exchange_requests),
        )
        .route(
            "/api/marketplace/exchange-requests/sent",
            get(marketplace::sent_exchange_requests),
        )
        .route(
            "/api/marketplace/exchange-requests/{id}",
            put(marketplace::respond_exchange_request),
        )
        // Transactions
        .route(
            "/api/marketplace/transactions",
            post(marketplace::create_transaction),
        )
        .route(
            "/api/marketplace/transactions/purchases",
            get(marketplace::purchase_history),
        )
        .route(
            "/api/marketplace/transactions/sales",
            get(marketplace::sales_history),
        )
        // Negotiations
        .route("/api/negotiations", post(marketplace::create_negotiation))
        .route(
            "/api/negotiations/listing/{listing_id}",
            get(marketplace::listing_negotiations),
        )
        .route("/api/negotiations/my-offers", get(marketplace::my_offers))
        .route("/api/negotiations/received", get(marketplace::received_offers))
        .route(
            "/api/negotiations/{id}/counter",
            put(marketplace::counter_negotiation),
        )
        .route(
            "/api/negotiations/{id}/accept",
            put(marketplace::accept_negotiation),
        )
        .route(
            "/api/negotiations/{id}/reject",
            put(marketplace::reject_negotiation),
        )
        // Messages
        .route(
            "/api/messages/conversations",
            get(messaging::list_conversations),
        )
        .route(
            "/api/messages/conversation/{user_id}",
            get(messaging::get_conversation),
        )
        .route("/api/messages/send", post(messaging::send_message))
        .route("/api/messages/unread-count", get(messaging::unread_count))
        .route("/api/messages/{id}/read", put(messaging::mark_read))
        .route("/api/messages/{id}", delete(messaging::delete_message))
        // Profiles and follows; `me` and `follow` are reserved usernames
        .route("/api/profiles/me", put(profiles::update_my_profile))
        .route(
            "/api/profiles/follow/{user_id}",
            post(profiles::follow_user).delete(profiles::unfollow_user),
        )
        .route(
            "/api/profiles/follow/check/{user_id}",
            get(profiles::check_following),
        )
        .route("/api/profiles/{user}", get(profiles::get_public_profile))
        .route("/api/profiles/{user}/followers", get(profiles::list_followers))
        .route("/api/profiles/{user}/following", get(profiles::list_following))
}

//! Exchange Request Manager against PostgreSQL

use axum::http::StatusCode;
use axum_test::TestServer;
use book_bazaar::backend::marketplace::exchange;
use book_bazaar::shared::marketplace::{ExchangeRequestSummary, ExchangeStatus, Listing, ListingStatus};
use book_bazaar::shared::Book;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{add_book, add_listing, my_listing, TestDatabase, TestUser};

struct Swap {
    seller: TestUser,
    requester: TestUser,
    listing: Listing,
    offered: Book,
}

async fn exchange_listing(db: &TestDatabase, server: &TestServer) -> Swap {
    let seller = db.user().await;
    let requester = db.user().await;
    let wanted = add_book(server, &seller, "The Left Hand of Darkness", "science fiction").await;
    let offered = add_book(server, &requester, "The Dispossessed", "science fiction").await;
    let listing = add_listing(
        server,
        &seller,
        json!({ "book_id": wanted.id, "listing_type": "exchange", "condition": "good" }),
    )
    .await;
    Swap {
        seller,
        requester,
        listing,
        offered,
    }
}

async fn propose(server: &TestServer, requester: &TestUser, listing: &Listing, book: &Book) -> Uuid {
    let response = server
        .post("/api/marketplace/exchange-requests")
        .authorization_bearer(&requester.token)
        .json(&json!({
            "listing_id": listing.id,
            "offered_book_id": book.id,
            "message": "Happy to swap"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    let body: Value = response.json();
    assert_eq!(body["request"]["status"], "pending");
    serde_json::from_value(body["request"]["id"].clone()).unwrap()
}

async fn respond(server: &TestServer, user: &TestUser, request_id: Uuid, status: &str) -> axum_test::TestResponse {
    server
        .put(&format!("/api/marketplace/exchange-requests/{request_id}"))
        .authorization_bearer(&user.token)
        .json(&json!({ "status": status }))
        .await
}

#[tokio::test]
async fn test_accepting_consumes_the_listing() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let swap = exchange_listing(&db, &server).await;
    let request_id = propose(&server, &swap.requester, &swap.listing, &swap.offered).await;

    let response = respond(&server, &swap.seller, request_id, "accepted").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["request"]["status"], "accepted");

    let listing = my_listing(&server, &swap.seller, swap.listing.id).await;
    assert_eq!(listing.listing.status, ListingStatus::Exchanged);

    // Terminal once consumed
    let again = respond(&server, &swap.seller, request_id, "rejected").await;
    assert_eq!(again.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rejecting_leaves_listing_active() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let swap = exchange_listing(&db, &server).await;
    let request_id = propose(&server, &swap.requester, &swap.listing, &swap.offered).await;

    let response = respond(&server, &swap.seller, request_id, "rejected").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let listing = my_listing(&server, &swap.seller, swap.listing.id).await;
    assert_eq!(listing.listing.status, ListingStatus::Active);
}

#[tokio::test]
async fn test_second_acceptance_fails_once_listing_is_gone() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let swap = exchange_listing(&db, &server).await;
    let rival = db.user().await;
    let rival_book = add_book(&server, &rival, "Solaris", "science fiction").await;

    let first = propose(&server, &swap.requester, &swap.listing, &swap.offered).await;
    let second = propose(&server, &rival, &swap.listing, &rival_book).await;

    assert_eq!(respond(&server, &swap.seller, first, "accepted").await.status_code(), StatusCode::OK);

    let response = respond(&server, &swap.seller, second, "accepted").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Listing is no longer available");
}

#[tokio::test]
async fn test_only_the_seller_may_respond() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let swap = exchange_listing(&db, &server).await;
    let request_id = propose(&server, &swap.requester, &swap.listing, &swap.offered).await;

    let response = respond(&server, &swap.requester, request_id, "accepted").await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["error"],
        "Not authorized to update this exchange request"
    );

    let missing = respond(&server, &swap.seller, Uuid::new_v4(), "accepted").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cannot_request_own_listing() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let swap = exchange_listing(&db, &server).await;
    let spare = add_book(&server, &swap.seller, "Spare", "science fiction").await;

    let response = server
        .post("/api/marketplace/exchange-requests")
        .authorization_bearer(&swap.seller.token)
        .json(&json!({ "listing_id": swap.listing.id, "offered_book_id": spare.id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Cannot request an exchange for your own listing"
    );
}

#[tokio::test]
async fn test_offered_book_must_be_the_requesters() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let swap = exchange_listing(&db, &server).await;
    let bystander = db.user().await;

    let response = server
        .post("/api/marketplace/exchange-requests")
        .authorization_bearer(&bystander.token)
        .json(&json!({ "listing_id": swap.listing.id, "offered_book_id": swap.offered.id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sell_listing_is_not_exchangeable() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (_seller, listing) = crate::common::sell_listing(&db, &server, "20.00").await;
    let requester = db.user().await;
    let book = add_book(&server, &requester, "Offer", "science fiction").await;

    let response = server
        .post("/api/marketplace/exchange-requests")
        .authorization_bearer(&requester.token)
        .json(&json!({ "listing_id": listing.id, "offered_book_id": book.id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"],
        "Exchange listing not found or not available"
    );
}

#[tokio::test]
async fn test_inbox_and_outbox() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let swap = exchange_listing(&db, &server).await;
    let request_id = propose(&server, &swap.requester, &swap.listing, &swap.offered).await;

    let received: Vec<ExchangeRequestSummary> = server
        .get("/api/marketplace/exchange-requests/received")
        .authorization_bearer(&swap.seller.token)
        .await
        .json();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].request.id, request_id);
    assert_eq!(received[0].listing_book_title, "The Left Hand of Darkness");
    assert_eq!(received[0].offered_book_title, "The Dispossessed");
    assert_eq!(received[0].requester_name.as_deref(), Some(swap.requester.username.as_str()));

    let sent: Vec<ExchangeRequestSummary> = server
        .get("/api/marketplace/exchange-requests/sent")
        .authorization_bearer(&swap.requester.token)
        .await
        .json();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].seller_name.as_deref(), Some(swap.seller.username.as_str()));
}

#[tokio::test]
async fn test_concurrent_accepts_exchange_once() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let swap = exchange_listing(&db, &server).await;
    let rival = db.user().await;
    let rival_book = add_book(&server, &rival, "Always Coming Home", "science fiction").await;

    let first = propose(&server, &swap.requester, &swap.listing, &swap.offered).await;
    let second = propose(&server, &rival, &swap.listing, &rival_book).await;

    let (a, b) = tokio::join!(
        exchange::respond(db.pool(), first, swap.seller.id, ExchangeStatus::Accepted),
        exchange::respond(db.pool(), second, swap.seller.id, ExchangeStatus::Accepted),
    );

    let winners = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(winners, 1);
    let loser = a.err().or(b.err()).expect("one accept fails");
    assert_eq!(loser.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(loser.message(), "Listing is no longer available");

    let listing = my_listing(&server, &swap.seller, swap.listing.id).await;
    assert_eq!(listing.listing.status, ListingStatus::Exchanged);
}

//! Transaction Recorder against PostgreSQL

use axum::http::StatusCode;
use book_bazaar::backend::marketplace::transactions;
use book_bazaar::shared::marketplace::{ListingStatus, TransactionStatus, TransactionSummary};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use crate::common::{my_listing, sell_listing, TestDatabase};

#[tokio::test]
async fn test_purchase_marks_listing_sold() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (seller, listing) = sell_listing(&db, &server, "20.00").await;
    let buyer = db.user().await;

    let response = server
        .post("/api/marketplace/transactions")
        .authorization_bearer(&buyer.token)
        .json(&json!({ "listing_id": listing.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Transaction created successfully");
    assert_eq!(body["transaction"]["status"], "completed");
    assert!(!body["transaction"]["completed_at"].is_null());

    let summary = my_listing(&server, &seller, listing.id).await;
    assert_eq!(summary.listing.status, ListingStatus::Sold);

    let purchases: Vec<TransactionSummary> = server
        .get("/api/marketplace/transactions/purchases")
        .authorization_bearer(&buyer.token)
        .await
        .json();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].transaction.amount, dec!(20.00));
    assert_eq!(purchases[0].transaction.status, TransactionStatus::Completed);
    assert_eq!(purchases[0].title, "Dune");
    assert_eq!(purchases[0].seller_name.as_deref(), Some(seller.username.as_str()));

    let sales: Vec<TransactionSummary> = server
        .get("/api/marketplace/transactions/sales")
        .authorization_bearer(&seller.token)
        .await
        .json();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].buyer_name.as_deref(), Some(buyer.username.as_str()));
}

#[tokio::test]
async fn test_second_purchase_finds_nothing() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (_seller, listing) = sell_listing(&db, &server, "20.00").await;
    let first = db.user().await;
    let second = db.user().await;

    let ok = server
        .post("/api/marketplace/transactions")
        .authorization_bearer(&first.token)
        .json(&json!({ "listing_id": listing.id }))
        .await;
    assert_eq!(ok.status_code(), StatusCode::CREATED);

    let late = server
        .post("/api/marketplace/transactions")
        .authorization_bearer(&second.token)
        .json(&json!({ "listing_id": listing.id }))
        .await;
    assert_eq!(late.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        late.json::<Value>()["error"],
        "Listing not found or not available for purchase"
    );
}

#[tokio::test]
async fn test_concurrent_purchases_sell_once() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (seller, listing) = sell_listing(&db, &server, "20.00").await;
    let a = db.user().await;
    let b = db.user().await;

    let (first, second) = tokio::join!(
        transactions::purchase(db.pool(), a.id, listing.id),
        transactions::purchase(db.pool(), b.id, listing.id),
    );

    let winners = [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(winners, 1);
    let loser = first.err().or(second.err()).expect("one purchase fails");
    assert_eq!(loser.status_code(), StatusCode::NOT_FOUND);

    let sales: Vec<TransactionSummary> = server
        .get("/api/marketplace/transactions/sales")
        .authorization_bearer(&seller.token)
        .await
        .json();
    assert_eq!(sales.len(), 1);
}

#[tokio::test]
async fn test_cannot_buy_own_listing() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (seller, listing) = sell_listing(&db, &server, "20.00").await;

    let response = server
        .post("/api/marketplace/transactions")
        .authorization_bearer(&seller.token)
        .json(&json!({ "listing_id": listing.id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Cannot purchase your own listing");
    assert_eq!(my_listing(&server, &seller, listing.id).await.listing.status, ListingStatus::Active);
}

#[tokio::test]
async fn test_sold_listing_cannot_be_deleted() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (seller, listing) = sell_listing(&db, &server, "20.00").await;
    let buyer = db.user().await;

    server
        .post("/api/marketplace/transactions")
        .authorization_bearer(&buyer.token)
        .json(&json!({ "listing_id": listing.id }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .delete(&format!("/api/marketplace/listings/{}", listing.id))
        .authorization_bearer(&seller.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_sold_book_cannot_be_deleted() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (seller, listing) = sell_listing(&db, &server, "20.00").await;
    let buyer = db.user().await;

    server
        .post("/api/marketplace/transactions")
        .authorization_bearer(&buyer.token)
        .json(&json!({ "listing_id": listing.id }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .delete(&format!("/api/books/{}", listing.book_id))
        .authorization_bearer(&seller.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        "Cannot delete a book with recorded transactions"
    );

    // Strangers still see the book as missing
    let response = server
        .delete(&format!("/api/books/{}", listing.book_id))
        .authorization_bearer(&buyer.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    server
        .get(&format!("/api/books/{}", listing.book_id))
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_unsold_book_with_listing_can_be_deleted() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (seller, listing) = sell_listing(&db, &server, "20.00").await;

    server
        .delete(&format!("/api/books/{}", listing.book_id))
        .authorization_bearer(&seller.token)
        .await
        .assert_status(StatusCode::OK);

    let listings: Vec<Value> = server
        .get("/api/marketplace/my-listings")
        .authorization_bearer(&seller.token)
        .await
        .json();
    assert!(listings.iter().all(|l| l["id"] != json!(listing.id)));
}

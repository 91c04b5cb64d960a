//! Listing Manager against PostgreSQL

use axum::http::StatusCode;
use book_bazaar::shared::marketplace::{Condition, ListingStatus, ListingSummary, ListingType};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use crate::common::{add_book, add_listing, my_listing, unique_genre, TestDatabase};

#[tokio::test]
async fn test_create_sell_listing() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let seller = db.user().await;
    let book = add_book(&server, &seller, "Dune", "science fiction").await;

    let listing = add_listing(
        &server,
        &seller,
        json!({
            "book_id": book.id,
            "listing_type": "sell",
            "price": "12.50",
            "condition": "like-new",
            "description": "Spine uncracked"
        }),
    )
    .await;

    assert_eq!(listing.seller_id, seller.id);
    assert_eq!(listing.book_id, book.id);
    assert_eq!(listing.listing_type, ListingType::Sell);
    assert_eq!(listing.price, Some(dec!(12.50)));
    assert_eq!(listing.condition, Condition::LikeNew);
    assert_eq!(listing.status, ListingStatus::Active);
}

#[tokio::test]
async fn test_listing_someone_elses_book_is_masked() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let owner = db.user().await;
    let stranger = db.user().await;
    let book = add_book(&server, &owner, "Dune", "science fiction").await;

    let response = server
        .post("/api/marketplace/listings")
        .authorization_bearer(&stranger.token)
        .json(&json!({
            "book_id": book.id,
            "listing_type": "exchange",
            "condition": "good"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"],
        "Book not found or does not belong to you"
    );
}

#[tokio::test]
async fn test_browse_filters() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let seller = db.user().await;
    let genre = unique_genre();

    let cheap = add_book(&server, &seller, "Cheap Copy", &genre).await;
    let dear = add_book(&server, &seller, "Dear Copy", &genre).await;
    let swap = add_book(&server, &seller, "Swap Copy", &genre).await;

    let cheap = add_listing(
        &server,
        &seller,
        json!({ "book_id": cheap.id, "listing_type": "sell", "price": "5.00", "condition": "fair" }),
    )
    .await;
    let dear = add_listing(
        &server,
        &seller,
        json!({ "book_id": dear.id, "listing_type": "sell", "price": "40.00", "condition": "new" }),
    )
    .await;
    let swap = add_listing(
        &server,
        &seller,
        json!({ "book_id": swap.id, "listing_type": "exchange", "condition": "fair" }),
    )
    .await;

    let ids = |response: axum_test::TestResponse| {
        response
            .json::<Vec<ListingSummary>>()
            .into_iter()
            .map(|summary| summary.listing.id)
            .collect::<Vec<_>>()
    };

    // Newest first
    let all = server
        .get("/api/marketplace/listings")
        .add_query_param("genre", &genre)
        .await;
    assert_eq!(ids(all), vec![swap.id, dear.id, cheap.id]);

    let sells = server
        .get("/api/marketplace/listings")
        .add_query_param("genre", &genre)
        .add_query_param("type", "sell")
        .await;
    assert_eq!(ids(sells), vec![dear.id, cheap.id]);

    let under_ten = server
        .get("/api/marketplace/listings")
        .add_query_param("genre", &genre)
        .add_query_param("max_price", "10")
        .await;
    assert_eq!(ids(under_ten), vec![cheap.id]);

    let fair = server
        .get("/api/marketplace/listings")
        .add_query_param("genre", genre.to_uppercase())
        .add_query_param("condition", "fair")
        .await;
    assert_eq!(ids(fair), vec![swap.id, cheap.id]);
}

#[tokio::test]
async fn test_summary_carries_book_and_seller() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let seller = db.user().await;
    let genre = unique_genre();
    let book = add_book(&server, &seller, "Gideon the Ninth", &genre).await;
    let listing = add_listing(
        &server,
        &seller,
        json!({ "book_id": book.id, "listing_type": "sell", "price": "9.99", "condition": "good" }),
    )
    .await;

    let summary = my_listing(&server, &seller, listing.id).await;
    assert_eq!(summary.title, "Gideon the Ninth");
    assert_eq!(summary.author, "Test Author");
    assert_eq!(summary.genre.as_deref(), Some(genre.as_str()));
    assert_eq!(summary.seller_name, seller.username);
}

#[tokio::test]
async fn test_cancel_hides_listing_and_freezes_it() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let seller = db.user().await;
    let genre = unique_genre();
    let book = add_book(&server, &seller, "Dune", &genre).await;
    let listing = add_listing(
        &server,
        &seller,
        json!({ "book_id": book.id, "listing_type": "sell", "price": "20.00", "condition": "good" }),
    )
    .await;

    let response = server
        .put(&format!("/api/marketplace/listings/{}", listing.id))
        .authorization_bearer(&seller.token)
        .json(&json!({ "status": "cancelled" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["listing"]["status"], "cancelled");

    let browse: Vec<ListingSummary> = server
        .get("/api/marketplace/listings")
        .add_query_param("genre", &genre)
        .await
        .json();
    assert!(browse.is_empty());

    let reopen = server
        .put(&format!("/api/marketplace/listings/{}", listing.id))
        .authorization_bearer(&seller.token)
        .json(&json!({ "status": "active" }))
        .await;
    assert_eq!(reopen.status_code(), StatusCode::BAD_REQUEST);

    let reprice = server
        .put(&format!("/api/marketplace/listings/{}", listing.id))
        .authorization_bearer(&seller.token)
        .json(&json!({ "price": "1.00" }))
        .await;
    assert_eq!(reprice.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seller_cannot_mark_listing_sold() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (seller, listing) = crate::common::sell_listing(&db, &server, "20.00").await;

    let response = server
        .put(&format!("/api/marketplace/listings/{}", listing.id))
        .authorization_bearer(&seller.token)
        .json(&json!({ "status": "sold" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(my_listing(&server, &seller, listing.id).await.listing.status, ListingStatus::Active);
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (seller, listing) = crate::common::sell_listing(&db, &server, "20.00").await;

    let response = server
        .put(&format!("/api/marketplace/listings/{}", listing.id))
        .authorization_bearer(&seller.token)
        .json(&json!({ "price": "18.00" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let summary = my_listing(&server, &seller, listing.id).await;
    assert_eq!(summary.listing.price, Some(dec!(18.00)));
    assert_eq!(summary.listing.condition, listing.condition);
    assert_eq!(summary.listing.status, ListingStatus::Active);
}

#[tokio::test]
async fn test_foreign_listing_update_and_delete_are_masked() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (seller, listing) = crate::common::sell_listing(&db, &server, "20.00").await;
    let stranger = db.user().await;

    let update = server
        .put(&format!("/api/marketplace/listings/{}", listing.id))
        .authorization_bearer(&stranger.token)
        .json(&json!({ "status": "cancelled" }))
        .await;
    assert_eq!(update.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        update.json::<Value>()["error"],
        "Listing not found or does not belong to you"
    );

    let delete = server
        .delete(&format!("/api/marketplace/listings/{}", listing.id))
        .authorization_bearer(&stranger.token)
        .await;
    assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);

    assert_eq!(my_listing(&server, &seller, listing.id).await.listing.status, ListingStatus::Active);
}

#[tokio::test]
async fn test_delete_unsold_listing() {
    let db = TestDatabase::new().await;
    let server = db.server();
    let (seller, listing) = crate::common::sell_listing(&db, &server, "20.00").await;

    let response = server
        .delete(&format!("/api/marketplace/listings/{}", listing.id))
        .authorization_bearer(&seller.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "Listing deleted successfully");

    let mine: Vec<ListingSummary> = server
        .get("/api/marketplace/my-listings")
        .authorization_bearer(&seller.token)
        .await
        .json();
    assert!(mine.iter().all(|summary| summary.listing.id != listing.id));
}

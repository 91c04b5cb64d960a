//! Property-based tests for request validation

use book_bazaar::backend::auth::handlers::types::RegisterRequest;
use book_bazaar::shared::marketplace::{
    Condition, CounterOfferRequest, CreateListingRequest, CreateNegotiationRequest, ListingType,
};
use book_bazaar::shared::CreateBookRequest;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

fn cents(range: std::ops::RangeInclusive<i64>) -> impl Strategy<Value = Decimal> {
    range.prop_map(|c| Decimal::new(c, 2))
}

proptest! {
    #[test]
    fn test_sell_listing_price_must_be_positive(price in cents(-100_000..=100_000)) {
        let request = CreateListingRequest {
            book_id: Some(Uuid::new_v4()),
            listing_type: Some(ListingType::Sell),
            price: Some(price),
            condition: Some(Condition::Good),
            description: None,
        };
        prop_assert_eq!(request.validate().is_ok(), price > Decimal::ZERO);
    }

    #[test]
    fn test_offer_and_counter_prices_must_be_positive(price in cents(-100_000..=100_000)) {
        let offer = CreateNegotiationRequest {
            listing_id: Some(Uuid::new_v4()),
            offered_price: Some(price),
            message: None,
        };
        let counter = CounterOfferRequest {
            counter_price: Some(price),
            message: None,
        };
        prop_assert_eq!(offer.validate().is_ok(), price > Decimal::ZERO);
        prop_assert_eq!(counter.validate().is_ok(), price > Decimal::ZERO);
    }

    #[test]
    fn test_offers_must_fit_two_decimal_column(mills in 1i64..=200_000_000_000) {
        // Thousandths; only multiples of ten are whole cents
        let price = Decimal::new(mills, 3);
        let offer = CreateNegotiationRequest {
            listing_id: Some(Uuid::new_v4()),
            offered_price: Some(price),
            message: None,
        };
        let storable = mills % 10 == 0 && price < Decimal::from(100_000_000);
        prop_assert_eq!(offer.validate().is_ok(), storable);
    }

    #[test]
    fn test_book_title_is_trimmed(title in "[A-Za-z][A-Za-z ]{0,30}", pad in " {0,3}") {
        let request = CreateBookRequest {
            title: Some(format!("{pad}{title}{pad}")),
            author: Some("Author".to_string()),
            price: Some(Decimal::ONE),
            ..Default::default()
        };
        let fields = request.validate().unwrap();
        prop_assert_eq!(fields.title, title.trim());
    }

    #[test]
    fn test_short_passwords_are_rejected(password in ".{1,5}") {
        let request = RegisterRequest {
            username: Some("reader".to_string()),
            email: Some("reader@example.com".to_string()),
            password: Some(password),
            ..Default::default()
        };
        prop_assert!(request.validate().is_err());
    }

    #[test]
    fn test_registration_lowercases_email(local in "[A-Za-z0-9]{1,12}", domain in "[A-Za-z]{1,12}") {
        let request = RegisterRequest {
            username: Some("reader".to_string()),
            email: Some(format!("{local}@{domain}.COM")),
            password: Some("password123".to_string()),
            ..Default::default()
        };
        let registration = request.validate().unwrap();
        prop_assert_eq!(registration.email, format!("{local}@{domain}.com").to_lowercase());
    }
}

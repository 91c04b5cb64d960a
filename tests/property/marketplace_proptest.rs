//! Property-based tests for the marketplace status machines

use book_bazaar::shared::marketplace::{
    ExchangeStatus, ListingStatus, Negotiation, NegotiationStatus,
};
use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

fn listing_status() -> impl Strategy<Value = ListingStatus> {
    prop::sample::select(ListingStatus::ALL.to_vec())
}

fn exchange_status() -> impl Strategy<Value = ExchangeStatus> {
    prop::sample::select(ExchangeStatus::ALL.to_vec())
}

fn negotiation_status() -> impl Strategy<Value = NegotiationStatus> {
    prop::sample::select(NegotiationStatus::ALL.to_vec())
}

/// Prices in cents, 0.01 to 10 000.00
fn price() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn test_terminal_listings_never_move(from in listing_status(), to in listing_status()) {
        if from.is_terminal() {
            prop_assert!(!from.can_transition_to(to));
            if from != to {
                prop_assert!(from.check_seller_update(to).is_err());
            }
        }
    }

    #[test]
    fn test_seller_updates_are_a_subset_of_transitions(from in listing_status(), to in listing_status()) {
        if from != to && from.check_seller_update(to).is_ok() {
            prop_assert!(from.can_transition_to(to));
            prop_assert_eq!(to, ListingStatus::Cancelled);
        }
    }

    #[test]
    fn test_status_names_roundtrip(
        l in listing_status(),
        e in exchange_status(),
        n in negotiation_status(),
    ) {
        prop_assert_eq!(ListingStatus::from_str(l.as_str()), Some(l));
        prop_assert_eq!(ExchangeStatus::from_str(e.as_str()), Some(e));
        prop_assert_eq!(NegotiationStatus::from_str(n.as_str()), Some(n));
    }

    #[test]
    fn test_exchange_check_matches_table(from in exchange_status(), to in exchange_status()) {
        prop_assert_eq!(from.check_transition(to).is_ok(), from.can_transition_to(to));
        if to == ExchangeStatus::Pending {
            prop_assert!(!from.can_transition_to(to));
        }
    }

    #[test]
    fn test_negotiations_close_for_good(from in negotiation_status(), to in negotiation_status()) {
        let closed = matches!(from, NegotiationStatus::Accepted | NegotiationStatus::Rejected);
        if closed {
            prop_assert!(from.check_transition(to).is_err());
        }
    }

    #[test]
    fn test_settlement_is_always_the_offer(
        original in price(),
        offered in price(),
        counter in prop::option::of(price()),
        status in negotiation_status(),
    ) {
        let now = Utc::now();
        let negotiation = Negotiation {
            id: Uuid::new_v4(),
            listing_id: Uuid::new_v4(),
            buyer_id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            original_price: original,
            offered_price: offered,
            counter_price: counter,
            status,
            message: None,
            created_at: now,
            updated_at: now,
        };
        prop_assert_eq!(negotiation.settlement_price(), offered);
    }
}

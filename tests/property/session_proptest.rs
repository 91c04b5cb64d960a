//! Property-based tests for session tokens

use book_bazaar::backend::auth::SessionKeys;
use chrono::Duration;
use proptest::prelude::*;
use uuid::Uuid;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_token_carries_identity(
        id in any::<u128>(),
        username in "[a-z0-9_]{3,20}",
        email in "[a-z0-9]{1,10}@[a-z]{1,10}\\.com",
    ) {
        let keys = SessionKeys::new("property-secret", Duration::hours(1));
        let user_id = Uuid::from_u128(id);

        let token = keys.create_token(user_id, &email, &username).unwrap();
        let claims = keys.verify_token(&token).unwrap();

        prop_assert_eq!(claims.user_id().unwrap(), user_id);
        prop_assert_eq!(claims.email, email);
        prop_assert_eq!(claims.username, username);
    }

    #[test]
    fn test_token_is_bound_to_secret(secret in "[a-z]{8,16}", other in "[A-Z]{8,16}") {
        let issuer = SessionKeys::new(&secret, Duration::hours(1));
        let verifier = SessionKeys::new(&other, Duration::hours(1));
        let token = issuer.create_token(Uuid::new_v4(), "a@b.com", "reader").unwrap();
        prop_assert!(verifier.verify_token(&token).is_err());
    }
}

//! Token store and decoder integration tests
//!
//! Exercises the public store/decoder API over file-backed storage the way
//! a client session would: login stores a token, views check it, logout
//! removes it.

mod common;

use agentstore_auth::{
    get_token_payload, is_expired_at, is_token_expired, NullStorage, TokenStorage, TokenStore,
};
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::common::{create_test_jwt, token_with_raw_payload, TestClaims, TestStorage};

mod test_store {
    use super::*;

    #[test_log::test]
    fn test_set_then_get_returns_same_token() {
        let storage = TestStorage::new().unwrap();
        let token = create_test_jwt(&TestClaims::expiring_in(3600)).unwrap();

        storage.store().set_token(&token);

        // A separate store over the same file sees the token
        assert_eq!(storage.store().get_token(), Some(token));
    }

    #[test_log::test]
    fn test_remove_then_get_is_absent_regardless_of_prior_state() {
        let storage = TestStorage::new().unwrap();
        let store = storage.store();

        store.remove_token();
        assert_eq!(store.get_token(), None);

        store.set_token("anything");
        store.remove_token();
        assert_eq!(store.get_token(), None);
    }

    #[test_log::test]
    fn test_remove_twice_equals_remove_once() {
        let storage = TestStorage::new().unwrap();
        let store = storage.store();
        store.set_token("t1");

        store.remove_token();
        let after_once = std::fs::read_to_string(storage.path()).unwrap();

        store.remove_token();
        let after_twice = std::fs::read_to_string(storage.path()).unwrap();

        assert_eq!(after_once, after_twice);
        assert_eq!(store.get_token(), None);
    }

    #[test_log::test]
    fn test_single_slot_overwrites() {
        let storage = TestStorage::new().unwrap();
        let store = storage.store();

        store.set_token("first");
        store.set_token("second");

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(storage.path()).unwrap()).unwrap();
        assert_eq!(raw, json!({"auth_token": "second"}));
    }

    #[test_log::test]
    fn test_no_persistent_storage_degrades_silently() {
        let store = TokenStore::new(NullStorage);
        assert!(!store.storage().is_available());

        store.set_token("t1");
        store.remove_token();
        assert_eq!(store.get_token(), None);
    }

    #[test_log::test]
    fn test_corrupt_storage_reads_as_absent_until_overwritten() {
        let storage = TestStorage::new().unwrap();
        std::fs::write(storage.path(), "{{{").unwrap();

        let store = storage.store();
        assert_eq!(store.get_token(), None);
        assert!(store.try_remove_token().is_err());

        store.try_set_token("t1").unwrap();
        assert_eq!(store.get_token().as_deref(), Some("t1"));

        let contents: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(storage.path()).unwrap()).unwrap();
        assert_eq!(contents, serde_json::json!({"auth_token": "t1"}));
    }

    #[test_log::test]
    fn test_decoding_leaves_storage_untouched() {
        let storage = TestStorage::new().unwrap();
        let store = storage.store();
        store.set_token("not-a-real-token");

        let token = store.get_token().unwrap();
        assert!(is_token_expired(&token));
        assert!(get_token_payload(&token).is_none());

        assert_eq!(store.get_token().as_deref(), Some("not-a-real-token"));
    }
}

mod test_decoder {
    use super::*;

    #[test]
    fn test_past_exp_is_expired() {
        for offset in [-1, -60, -86_400, -10 * 365 * 86_400] {
            let token = create_test_jwt(&TestClaims::expiring_in(offset)).unwrap();
            assert!(is_token_expired(&token), "offset {} should be expired", offset);
        }
    }

    #[test]
    fn test_future_exp_is_not_expired() {
        for offset in [3600, 86_400, 10 * 365 * 86_400] {
            let token = create_test_jwt(&TestClaims::expiring_in(offset)).unwrap();
            assert!(!is_token_expired(&token), "offset {} should be active", offset);
        }
    }

    #[test]
    fn test_concrete_scenario_far_past_token() {
        let token = token_with_raw_payload(r#"{"sub":"u1","exp": 1000000000}"#);

        assert!(is_token_expired(&token));

        let payload = get_token_payload(&token).unwrap();
        assert_eq!(payload.subject(), Some("u1"));
        assert_eq!(payload.get("exp"), Some(&json!(1000000000)));
    }

    #[test]
    fn test_concrete_scenario_not_a_real_token() {
        assert!(is_token_expired("not-a-real-token"));
        assert!(get_token_payload("not-a-real-token").is_none());
    }

    #[test]
    fn test_non_compact_strings_are_expired_without_payload() {
        let not_json = token_with_raw_payload("definitely not json");
        let inputs: [&str; 6] = ["", ".", "..", "one", "one.two", &not_json];

        for input in inputs {
            assert!(is_token_expired(input), "{:?}", input);
            assert!(get_token_payload(input).is_none(), "{:?}", input);
        }
    }

    #[test]
    fn test_claims_beyond_exp_are_preserved() {
        let claims = TestClaims::expiring_in(3600);
        let token = create_test_jwt(&claims).unwrap();

        let payload = get_token_payload(&token).unwrap();
        assert_eq!(payload.subject(), Some(claims.sub.as_str()));
        assert_eq!(payload.get("email"), Some(&json!(claims.email)));
        assert_eq!(payload.get("role"), Some(&json!("enterprise_admin")));
        assert_eq!(payload.issued_at(), Some(claims.iat as f64));
    }

    #[test]
    fn test_expiry_against_fixed_clock() {
        let token = token_with_raw_payload(r#"{"exp": 1700000000}"#);
        let just_before: DateTime<Utc> = DateTime::from_timestamp(1_699_999_999, 0).unwrap();
        let just_after: DateTime<Utc> = DateTime::from_timestamp(1_700_000_001, 0).unwrap();

        assert!(!is_expired_at(&token, just_before));
        assert!(is_expired_at(&token, just_after));
    }
}

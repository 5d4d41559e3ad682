//! Auth gate integration tests
//!
//! Walks a client session through login, expiry and logout, checking the
//! gate's decision at each step and that the CLI composition agrees.

mod common;

use agentstore_app::{create_gate, execute, Command};
use agentstore_auth::{AuthConfig, ExpiryPolicy, GateDecision, GateReason};
use agentstore_common::Config;

use crate::common::{create_test_jwt, token_with_raw_payload, TestClaims, TestStorage};

fn reason(decision: &GateDecision) -> Option<GateReason> {
    match decision {
        GateDecision::RedirectToLogin { reason, .. } => Some(*reason),
        GateDecision::Authenticated(_) => None,
    }
}

#[test_log::test]
fn test_session_lifecycle() {
    let storage = TestStorage::new().unwrap();
    let gate = storage.gate(AuthConfig::default());

    // Before login
    assert_eq!(reason(&gate.check()), Some(GateReason::NoToken));

    // Login hands a token to the store
    let claims = TestClaims::expiring_in(3600);
    storage
        .store()
        .set_token(&create_test_jwt(&claims).unwrap());

    let decision = gate.check();
    assert!(decision.is_authenticated());
    assert_eq!(
        decision.claims().unwrap().subject(),
        Some(claims.sub.as_str())
    );

    // Logout
    gate.store().remove_token();
    assert_eq!(reason(&gate.check()), Some(GateReason::NoToken));
}

#[test_log::test]
fn test_expired_token_kept_unless_eviction_enabled() {
    let storage = TestStorage::new().unwrap();
    let token = create_test_jwt(&TestClaims::expiring_in(-60)).unwrap();
    storage.store().set_token(&token);

    let keeping = storage.gate(AuthConfig::default());
    assert_eq!(reason(&keeping.check()), Some(GateReason::Expired));
    assert_eq!(storage.store().get_token(), Some(token));

    let evicting = storage.gate(AuthConfig {
        evict_expired: true,
        ..AuthConfig::default()
    });
    assert_eq!(reason(&evicting.check()), Some(GateReason::Expired));
    assert_eq!(storage.store().get_token(), None);
}

#[test_log::test]
fn test_malformed_and_expired_both_redirect_to_login() {
    let storage = TestStorage::new().unwrap();
    let gate = storage.gate(AuthConfig {
        login_path: "/enterprise/login".to_string(),
        ..AuthConfig::default()
    });

    for token in [
        "not-a-real-token".to_string(),
        token_with_raw_payload(r#"{"sub":"u1","exp": 1000000000}"#),
        token_with_raw_payload(r#"{"sub":"u1"}"#),
    ] {
        storage.store().set_token(&token);
        match gate.check() {
            GateDecision::RedirectToLogin { login_path, .. } => {
                assert_eq!(login_path, "/enterprise/login")
            }
            other => panic!("{} should redirect, got {:?}", token, other),
        }
    }
}

#[test_log::test]
fn test_non_expiring_policy_accepts_token_without_exp() {
    let storage = TestStorage::new().unwrap();
    storage
        .store()
        .set_token(&token_with_raw_payload(r#"{"sub":"service-agent"}"#));

    let gate = storage.gate(AuthConfig {
        expiry_policy: ExpiryPolicy::AllowNonExpiring,
        ..AuthConfig::default()
    });

    assert_eq!(
        gate.check().claims().and_then(|c| c.subject()),
        Some("service-agent")
    );
}

#[test_log::test]
fn test_cli_commands_share_the_store_file() {
    let storage = TestStorage::new().unwrap();
    let config = Config {
        token_file: Some(storage.path()),
        token_key: "session".to_string(),
        ..Config::default()
    };

    let token = create_test_jwt(&TestClaims::expiring_in(3600)).unwrap();
    execute(
        &create_gate(&config),
        Command::Set {
            token: token.clone(),
        },
    )
    .unwrap();

    let status = execute(&create_gate(&config), Command::Status).unwrap();
    assert!(status.success);
    assert!(status.output.unwrap().starts_with("authenticated"));

    // Library store on the default slot does not see the CLI's custom slot
    assert_eq!(storage.store().get_token(), None);

    execute(&create_gate(&config), Command::Remove).unwrap();
    let status = execute(&create_gate(&config), Command::Status).unwrap();
    assert!(!status.success);
    assert_eq!(
        status.output.as_deref(),
        Some("redirect to /login: no token stored")
    );
}

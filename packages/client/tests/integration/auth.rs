use client::api::auth;
use client::error::Error;
use client::utils::jwt;

use crate::common::TestApp;

#[tokio::test]
async fn sign_up_returns_a_principal_and_sets_the_session() {
    let app = TestApp::spawn().await;

    let principal = auth::sign_up(&app.state, "alice@example.com", "alice", "securepass")
        .await
        .unwrap();

    assert_eq!(principal.email, "alice@example.com");
    assert_eq!(principal.username, "alice");
    assert!(!principal.token.is_empty());
    assert_eq!(auth::current_user(&app.state), Some(principal));
}

#[tokio::test]
async fn issued_token_carries_the_principal_claims() {
    let app = TestApp::spawn().await;

    let principal = auth::sign_up(&app.state, "alice@example.com", "alice", "securepass")
        .await
        .unwrap();

    let claims = jwt::verify(&principal.token, "integration-test-secret").unwrap();
    assert_eq!(claims.uid, principal.id);
    assert_eq!(claims.sub, "alice@example.com");
}

#[tokio::test]
async fn cannot_sign_up_with_a_taken_email() {
    let app = TestApp::spawn().await;

    auth::sign_up(&app.state, "alice@example.com", "alice", "securepass")
        .await
        .unwrap();
    let err = auth::sign_up(&app.state, "alice@example.com", "alice2", "securepass")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EmailTaken));
}

#[tokio::test]
async fn cannot_sign_up_with_a_taken_username() {
    let app = TestApp::spawn().await;

    auth::sign_up(&app.state, "alice@example.com", "alice", "securepass")
        .await
        .unwrap();
    let err = auth::sign_up(&app.state, "alice2@example.com", "alice", "securepass")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UsernameTaken));
}

#[tokio::test]
async fn failed_sign_up_leaves_no_partial_account_behind() {
    let app = TestApp::spawn().await;

    auth::sign_up(&app.state, "alice@example.com", "alice", "securepass")
        .await
        .unwrap();

    // Fails on the username constraint after the account insert; the
    // transaction must roll both rows back.
    let err = auth::sign_up(&app.state, "bob@example.com", "alice", "securepass")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UsernameTaken));

    // The email from the failed attempt is still available.
    let principal = auth::sign_up(&app.state, "bob@example.com", "bob", "securepass")
        .await
        .unwrap();
    assert_eq!(principal.username, "bob");
}

#[tokio::test]
async fn sign_in_with_wrong_password_is_invalid_credentials() {
    let app = TestApp::spawn().await;

    auth::sign_up(&app.state, "alice@example.com", "alice", "securepass")
        .await
        .unwrap();
    auth::sign_out(&app.state).await;

    let err = auth::sign_in(&app.state, "alice@example.com", "wrongpass")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));
    assert!(auth::current_user(&app.state).is_none());
}

#[tokio::test]
async fn sign_in_with_unknown_email_is_invalid_credentials() {
    let app = TestApp::spawn().await;

    let err = auth::sign_in(&app.state, "nobody@example.com", "securepass")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));
}

#[tokio::test]
async fn sign_in_restores_the_principal() {
    let app = TestApp::spawn().await;

    let original = auth::sign_up(&app.state, "alice@example.com", "alice", "securepass")
        .await
        .unwrap();
    auth::sign_out(&app.state).await;

    let restored = auth::sign_in(&app.state, "alice@example.com", "securepass")
        .await
        .unwrap();
    assert_eq!(restored.id, original.id);
    assert_eq!(restored.username, "alice");
}

#[tokio::test]
async fn email_lookup_is_case_insensitive_on_sign_in() {
    let app = TestApp::spawn().await;

    auth::sign_up(&app.state, "Alice@Example.com", "alice", "securepass")
        .await
        .unwrap();
    auth::sign_out(&app.state).await;

    let principal = auth::sign_in(&app.state, "alice@example.com", "securepass")
        .await
        .unwrap();
    assert_eq!(principal.username, "alice");
}

#[tokio::test]
async fn sign_out_clears_the_session_and_notifies_subscribers() {
    let app = TestApp::spawn().await;

    auth::sign_up(&app.state, "alice@example.com", "alice", "securepass")
        .await
        .unwrap();

    let mut rx = app.state.session.subscribe();
    auth::sign_out(&app.state).await;

    rx.changed().await.unwrap();
    assert!(rx.borrow().is_none());
    assert!(auth::current_user(&app.state).is_none());
}

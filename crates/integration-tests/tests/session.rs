//! Session bootstrap: anonymous creation, rehydration, and token rotation.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use resell_client::{ClientError, SessionToken};
use resell_integration_tests::mock_backend;

#[tokio::test]
async fn bootstrap_without_token_creates_anonymous_user() {
    let (server, client, _config) = mock_backend().await;

    Mock::given(method("POST"))
        .and(path("/create-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "u-new",
            "cookie": "token-new",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = client.bootstrap(None).await.unwrap();

    assert_eq!(session.user.user_id.as_str(), "u-new");
    assert!(!session.user.is_signed_in());
    assert!(session.rotated);
    assert_eq!(session.token.expose(), "token-new");
}

#[tokio::test]
async fn bootstrap_with_token_rehydrates_and_presents_header() {
    let (server, client, _config) = mock_backend().await;

    Mock::given(method("GET"))
        .and(path("/retrieve-user"))
        .and(header("auth-token", "stored-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "u-1",
            "email": "user@example.com",
            "subscription_tier": "Plus",
            "generations_left": 0,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = client
        .bootstrap(Some(SessionToken::new("stored-token")))
        .await
        .unwrap();

    assert!(session.user.is_signed_in());
    assert!(session.user.tier().is_unlimited());
    assert!(!session.rotated);
    assert_eq!(session.token.expose(), "stored-token");
}

#[tokio::test]
async fn rotated_token_replaces_the_stored_one() {
    let (server, client, _config) = mock_backend().await;

    Mock::given(method("GET"))
        .and(path("/retrieve-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "u-1",
            "cookie": "token-rotated",
        })))
        .mount(&server)
        .await;

    let session = client
        .bootstrap(Some(SessionToken::new("token-old")))
        .await
        .unwrap();

    assert!(session.rotated);
    assert_eq!(session.token.expose(), "token-rotated");
}

#[tokio::test]
async fn rejected_token_surfaces_an_api_error() {
    let (server, client, _config) = mock_backend().await;

    Mock::given(method("GET"))
        .and(path("/retrieve-user"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unknown session"))
        .mount(&server)
        .await;

    let err = client
        .bootstrap(Some(SessionToken::new("bad-token")))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 401, .. }));
}

#[tokio::test]
async fn create_user_without_token_is_an_error() {
    let (server, client, _config) = mock_backend().await;

    Mock::given(method("POST"))
        .and(path("/create-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user_id": "u-1" })))
        .mount(&server)
        .await;

    let err = client.bootstrap(None).await.unwrap_err();
    assert!(matches!(err, ClientError::MissingToken));
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let (server, client, _config) = mock_backend().await;

    Mock::given(method("GET"))
        .and(path("/retrieve-user"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client
        .bootstrap(Some(SessionToken::new("token")))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Parse(_)));
}

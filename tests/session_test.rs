mod common;

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::post,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use spotroast::{
    session::{DEFAULT_EXPIRES_IN_SECS, SessionStore, SessionTokenManager},
    types::{AuthGrant, TokenError, TokenRecord, TokenState},
};

#[derive(Clone)]
struct TokenEndpoint {
    calls: Arc<AtomicUsize>,
    status: StatusCode,
    body: Value,
}

async fn token_handler(
    State(endpoint): State<TokenEndpoint>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    endpoint.calls.fetch_add(1, Ordering::SeqCst);

    let expected = format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", common::CLIENT_ID, common::CLIENT_SECRET))
    );
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    let refresh_grant = form.get("grant_type").map(String::as_str) == Some("refresh_token")
        && form.get("refresh_token").map(String::as_str) == Some("refresh-1");

    if !authorized || !refresh_grant {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_client" })),
        )
            .into_response();
    }

    (endpoint.status, Json(endpoint.body)).into_response()
}

async fn token_manager(status: StatusCode, body: Value) -> (SessionTokenManager, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/api/token", post(token_handler))
        .with_state(TokenEndpoint {
            calls: Arc::clone(&calls),
            status,
            body,
        });
    let base_url = common::spawn(app).await;
    let manager = SessionTokenManager::new(common::client(), &common::spotify_settings(&base_url));
    (manager, calls)
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
}

fn record_expiring_in(secs: i64) -> TokenRecord {
    TokenRecord {
        access_token: "access-1".to_string(),
        access_token_expires_at: now() + Duration::seconds(secs),
        refresh_token: "refresh-1".to_string(),
        error: None,
    }
}

#[test]
fn test_initiate_defaults_expiry_to_one_hour() {
    let record = SessionTokenManager::initiate(
        AuthGrant {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_in: None,
        },
        now(),
    );

    assert_eq!(
        record.access_token_expires_at,
        now() + Duration::seconds(DEFAULT_EXPIRES_IN_SECS as i64)
    );
    assert_eq!(record.access_token, "a");
    assert_eq!(record.refresh_token, "r");
    assert_eq!(record.error, None);
}

#[test]
fn test_initiate_uses_reported_lifetime() {
    let record = SessionTokenManager::initiate(
        AuthGrant {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_in: Some(120),
        },
        now(),
    );

    assert_eq!(record.access_token_expires_at, now() + Duration::seconds(120));
    assert_eq!(record.state(now()), TokenState::Fresh);
}

#[test]
fn test_token_state_boundaries() {
    assert_eq!(record_expiring_in(3600).state(now()), TokenState::Fresh);
    assert_eq!(record_expiring_in(11).state(now()), TokenState::Fresh);
    // inside the 10 second safety margin
    assert_eq!(record_expiring_in(10).state(now()), TokenState::Stale);
    assert_eq!(record_expiring_in(5).state(now()), TokenState::Stale);
    assert_eq!(record_expiring_in(-60).state(now()), TokenState::Stale);

    let errored = TokenRecord {
        error: Some(TokenError::RefreshAccessTokenError),
        ..record_expiring_in(3600)
    };
    assert_eq!(errored.state(now()), TokenState::Errored);
}

#[tokio::test]
async fn test_resolve_fresh_record_skips_network() {
    let (manager, calls) = token_manager(StatusCode::OK, json!({})).await;
    let record = record_expiring_in(3600);

    let first = manager.resolve(record.clone(), now()).await;
    let second = manager.resolve(first.clone(), now()).await;

    assert_eq!(first, record);
    assert_eq!(second, first);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_refresh_keeps_refresh_token_when_not_rotated() {
    let (manager, calls) = token_manager(
        StatusCode::OK,
        json!({ "access_token": "access-2", "token_type": "Bearer", "expires_in": 3600 }),
    )
    .await;

    let refreshed = manager.resolve(record_expiring_in(5), now()).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        refreshed,
        TokenRecord {
            access_token: "access-2".to_string(),
            access_token_expires_at: now() + Duration::seconds(3600),
            refresh_token: "refresh-1".to_string(),
            error: None,
        }
    );
    assert_eq!(refreshed.state(now()), TokenState::Fresh);
}

#[tokio::test]
async fn test_refresh_rotates_refresh_token() {
    let (manager, _) = token_manager(
        StatusCode::OK,
        json!({ "access_token": "access-2", "expires_in": 1800, "refresh_token": "refresh-2" }),
    )
    .await;

    let refreshed = manager.resolve(record_expiring_in(-100), now()).await;

    assert_eq!(refreshed.refresh_token, "refresh-2");
    assert_eq!(refreshed.access_token_expires_at, now() + Duration::seconds(1800));
}

#[tokio::test]
async fn test_refresh_failure_flags_record() {
    let (manager, calls) = token_manager(
        StatusCode::BAD_REQUEST,
        json!({ "error": "invalid_grant", "error_description": "Refresh token revoked" }),
    )
    .await;
    let stale = record_expiring_in(0);

    let failed = manager.resolve(stale.clone(), now()).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(failed.error, Some(TokenError::RefreshAccessTokenError));
    assert_eq!(failed.access_token, stale.access_token);
    assert_eq!(failed.refresh_token, stale.refresh_token);
    assert_eq!(failed.access_token_expires_at, stale.access_token_expires_at);
}

#[tokio::test]
async fn test_refresh_malformed_body_flags_record() {
    let (manager, _) = token_manager(StatusCode::OK, json!({ "expires_in": 3600 })).await;

    let failed = manager.resolve(record_expiring_in(0), now()).await;

    assert!(failed.is_errored());
    assert_eq!(failed.access_token, "access-1");
}

#[tokio::test]
async fn test_refresh_transport_error_flags_record() {
    let manager = SessionTokenManager::new(
        common::client(),
        &common::spotify_settings(&common::unreachable_url()),
    );

    let failed = manager.resolve(record_expiring_in(0), now()).await;

    assert_eq!(failed.error, Some(TokenError::RefreshAccessTokenError));
    assert_eq!(failed.access_token, "access-1");
}

#[tokio::test]
async fn test_errored_record_is_terminal() {
    let (manager, calls) = token_manager(
        StatusCode::OK,
        json!({ "access_token": "access-2", "expires_in": 3600 }),
    )
    .await;
    let errored = TokenRecord {
        error: Some(TokenError::RefreshAccessTokenError),
        ..record_expiring_in(-60)
    };

    let resolved = manager.resolve(errored.clone(), now()).await;

    assert_eq!(resolved, errored);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_session_store_round_trip_and_clear() {
    let path = std::env::temp_dir()
        .join(format!("spotroast-test-{}", spotroast::utils::generate_state()))
        .join("session.json");
    let store = SessionStore::new(path.clone());
    let record = TokenRecord {
        error: Some(TokenError::RefreshAccessTokenError),
        ..record_expiring_in(3600)
    };

    store.persist(&record).await.unwrap();
    assert_eq!(store.load().await.unwrap(), record);

    store.clear().await.unwrap();
    assert!(!path.exists());
    assert!(store.load().await.is_err());
    // clearing twice is fine
    store.clear().await.unwrap();
}

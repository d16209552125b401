#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use reqwest::Client;
use spotroast::{
    config::{InferenceSettings, SpotifySettings},
    utils,
};

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const GEMINI_KEY: &str = "test-gemini-key";
pub const OPENROUTER_KEY: &str = "test-openrouter-key";

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    format!("http://{}", addr)
}

/// Base URL nothing listens on.
pub fn unreachable_url() -> String {
    "http://127.0.0.1:1".to_string()
}

pub fn client() -> Client {
    utils::http_client(Duration::from_secs(5)).expect("http client")
}

pub fn spotify_settings(base_url: &str) -> SpotifySettings {
    SpotifySettings {
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        auth_url: format!("{}/authorize", base_url),
        token_url: format!("{}/api/token", base_url),
        api_url: format!("{}/v1", base_url),
    }
}

pub fn inference_settings(gemini_url: &str, openrouter_url: Option<&str>) -> InferenceSettings {
    InferenceSettings {
        gemini_api_key: GEMINI_KEY.to_string(),
        gemini_api_url: gemini_url.to_string(),
        gemini_model: "test-model".to_string(),
        openrouter_api_key: openrouter_url.map(|_| OPENROUTER_KEY.to_string()),
        openrouter_api_url: openrouter_url.map(str::to_string).unwrap_or_else(unreachable_url),
        openrouter_model: "test/fallback".to_string(),
        openrouter_referer: None,
    }
}

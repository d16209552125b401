//! Error types shared across the roast pipeline, the inference providers and
//! the configuration layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::warning;

/// User-facing message returned by the HTTP boundary for every failure.
pub const ROAST_FAILURE_MESSAGE: &str =
    "Failed to generate roast. Both AI providers are tired of this playlist.";

/// Failures of the roast pipeline.
#[derive(Error, Debug)]
pub enum RoastError {
    /// The data API rejected the access token (HTTP 401).
    #[error("Spotify session expired, sign in again")]
    AuthExpired,

    /// The playlist URL does not contain a playlist id.
    #[error("Invalid playlist URL: {0}")]
    InvalidInput(String),

    /// The data API was unreachable, answered non-2xx or sent an unexpected payload.
    #[error("Failed to fetch data: {0}")]
    DataFetch(String),

    /// Neither inference provider produced any text.
    #[error("Inference unavailable: {0}")]
    InferenceUnavailable(String),

    /// Provider text could not be parsed into a roast report.
    #[error("Malformed inference output: {0}")]
    MalformedInferenceOutput(String),
}

impl IntoResponse for RoastError {
    fn into_response(self) -> Response {
        warning!("Critical roast error: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": ROAST_FAILURE_MESSAGE })),
        )
            .into_response()
    }
}

/// Failure of a single inference provider call.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned no content")]
    EmptyResponse,

    #[error("{0} is not configured")]
    MissingCredential(&'static str),
}

/// Invalid or incomplete settings.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

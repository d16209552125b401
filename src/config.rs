//! Configuration management for spotroast.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! Every settings struct is built from a key lookup function, so the same code
//! reads the process environment in production and a plain map in tests.

use std::{env, path::PathBuf, time::Duration};

use crate::error::ConfigError;

/// OAuth scopes requested at sign-in.
pub const SPOTIFY_SCOPE: &str = "user-read-email user-top-read playlist-read-private";

const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_OPENROUTER_MODEL: &str = "meta-llama/llama-3.1-8b-instruct:free";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Loads environment variables from `spotroast/.env` in the local data directory.
///
/// Creates the directory if it doesn't exist. A missing `.env` file is fine,
/// the process environment is used as is.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotroast/.env`
/// - macOS: `~/Library/Application Support/spotroast/.env`
/// - Windows: `%LOCALAPPDATA%/spotroast/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the application's local data directory (`<data_local_dir>/spotroast`).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotroast");
    path
}

/// Reads a key from the process environment, treating empty values as unset.
pub fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key).ok_or(ConfigError::Missing(key))
}

fn or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Spotify application credentials and endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl SpotifySettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Builds the settings from an arbitrary key lookup.
    ///
    /// `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET` are required, the
    /// endpoints default to Spotify's public URLs.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: required(&lookup, "SPOTIFY_CLIENT_ID")?,
            client_secret: required(&lookup, "SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: or_default(&lookup, "SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            auth_url: or_default(&lookup, "SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default(&lookup, "SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: or_default(&lookup, "SPOTIFY_API_URL", DEFAULT_API_URL),
        })
    }
}

/// Primary (Gemini) and fallback (OpenRouter) provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceSettings {
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub gemini_model: String,
    /// `None` disables the fallback provider.
    pub openrouter_api_key: Option<String>,
    pub openrouter_api_url: String,
    pub openrouter_model: String,
    pub openrouter_referer: Option<String>,
}

impl InferenceSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            gemini_api_key: required(&lookup, "GEMINI_API_KEY")?,
            gemini_api_url: or_default(&lookup, "GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
            gemini_model: or_default(&lookup, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            openrouter_api_key: lookup("OPENROUTER_API_KEY"),
            openrouter_api_url: or_default(
                &lookup,
                "OPENROUTER_API_URL",
                DEFAULT_OPENROUTER_API_URL,
            ),
            openrouter_model: or_default(&lookup, "OPENROUTER_MODEL", DEFAULT_OPENROUTER_MODEL),
            openrouter_referer: lookup("OPENROUTER_REFERER"),
        })
    }
}

/// Address the HTTP server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    server_addr_from(env_lookup)
}

pub fn server_addr_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    or_default(&lookup, "SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Timeout applied to every outbound HTTP call (`HTTP_TIMEOUT_SECS`).
pub fn http_timeout() -> Result<Duration, ConfigError> {
    http_timeout_from(env_lookup)
}

pub fn http_timeout_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Duration, ConfigError> {
    match lookup("HTTP_TIMEOUT_SECS") {
        None => Ok(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ConfigError::Invalid {
                key: "HTTP_TIMEOUT_SECS",
                value,
            }),
        },
    }
}

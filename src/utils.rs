use std::{sync::LazyLock, time::Duration};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use reqwest::Client;
use sha2::{Digest, Sha256};

use crate::types::NamedItem;

static PLAYLIST_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"playlist/([a-zA-Z0-9]+)").expect("playlist id pattern is valid")
});

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    random_alphanumeric(32)
}

/// Extracts the playlist id from a share URL such as
/// `https://open.spotify.com/playlist/37i9dQZF1?si=abc`.
pub fn extract_playlist_id(url: &str) -> Option<String> {
    PLAYLIST_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Removes Markdown code fences (```` ```json ```` and ```` ``` ````) from model output.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Joins item names into the comma separated list embedded in the prompt.
pub fn join_names(items: &[NamedItem]) -> String {
    items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// HTTP client used for every outbound call, bounded by `timeout`.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
}

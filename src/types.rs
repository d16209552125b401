use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Credentials returned by the first authorization-code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of `access_token` in seconds, if the provider reported one.
    pub expires_in: Option<u64>,
}

/// Body of a successful token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

/// Marker stored on a record whose refresh failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenError {
    RefreshAccessTokenError,
}

/// Authorization state of one user session.
///
/// `access_token_expires_at` is an absolute UTC instant. `refresh_token` is
/// carried over from the previous record when a refresh does not rotate it.
/// Once `error` is set the record is terminal and only a new sign-in
/// replaces it.
///
/// # Example
///
/// ```json
/// {
///   "access_token": "BQC...",
///   "access_token_expires_at": "2024-05-01T12:00:00Z",
///   "refresh_token": "AQD...",
///   "error": "RefreshAccessTokenError"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TokenError>,
}

/// Classification of a [`TokenRecord`] at a given instant.
///
/// * `Fresh` - Usable for at least ten more seconds
/// * `Stale` - Expired or about to expire, needs a refresh
/// * `Errored` - A previous refresh failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Fresh,
    Stale,
    Errored,
}

/// Sign-in in progress, shared between the auth flow and the callback handler.
#[derive(Debug, Clone)]
pub struct PendingSignIn {
    pub state: String,
    pub code_verifier: String,
    pub grant: Option<AuthGrant>,
}

// ---------------------------------------------------------------------------
// Spotify Web API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtistsResponse {
    pub items: Vec<TopArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtist {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<TopTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTrack {
    pub name: String,
    pub album: Option<TrackAlbum>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// `null` for removed or unavailable entries.
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    pub album: Option<TrackAlbum>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

/// What to roast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectMode {
    /// The signed-in user's top artists and tracks.
    UserTaste,
    /// The first page of a playlist, identified by its share URL.
    Playlist { url: String },
}

/// One artist, track or playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedItem {
    pub name: String,
    pub image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Roasts
// ---------------------------------------------------------------------------

/// Parsed model answer, also the JSON body of a successful `POST /api/roast`.
///
/// # Example
///
/// ```json
/// {
///   "score": 72,
///   "playlist_roast": "You peaked in 2019 and your playlist knows it.",
///   "roasts": [{ "name": "Blinding Lights", "roast": "Night-drive music for bus riders." }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoastReport {
    pub score: f64,
    pub playlist_roast: String,
    pub roasts: Vec<ItemRoast>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRoast {
    pub name: String,
    pub roast: String,
}

/// An item roast matched back to its source item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoastCard {
    pub name: String,
    pub roast: String,
    /// Empty when no source item matched.
    pub image: String,
}

#[derive(Tabled)]
pub struct RoastTableRow {
    pub name: String,
    pub roast: String,
    pub image: String,
}

/// Body of `POST /api/roast`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoastRequest {
    #[serde(default)]
    pub names: Option<String>,
}

// ---------------------------------------------------------------------------
// Inference providers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub response_mime_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    pub content: Option<GeminiContent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatMessage>,
}

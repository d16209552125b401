//! # Spotify Integration Module
//!
//! Everything spotroast needs from Spotify: the authorization-code sign-in
//! that produces the first token grant, and a small read-only client for the
//! listening data that gets roasted.
//!
//! ## Architecture
//!
//! ```text
//! CLI / HTTP layer
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (code flow, PKCE + client secret)
//!     └── Items (top artists, top tracks, playlist entries)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /me/top/artists` - top artists, `medium_term`, 5 items
//! - `GET /me/top/tracks` - top tracks, `medium_term`, 5 items
//! - `GET /playlists/{id}/tracks` - first 8 playlist entries
//! - `POST /api/token` - code exchange (refresh lives in [`crate::session`])
//!
//! The page sizes are deliberately small, they bound the prompt size.
//!
//! ## Error Types
//!
//! Data calls return [`crate::error::RoastError`]; a 401 on the top-items
//! calls is reported as `AuthExpired` so callers can ask for a new sign-in
//! instead of retrying.

pub mod auth;
mod items;

pub use items::PLAYLIST_PAGE_SIZE;
pub use items::SpotifyClient;
pub use items::TOP_ITEMS_LIMIT;

//! # CLI Module
//!
//! User-facing commands of spotroast. Each command loads the settings it
//! needs, delegates to the session, Spotify, roast and server modules, and
//! reports progress with the console macros.
//!
//! ## Commands
//!
//! - [`auth`] - signs in with Spotify and stores the session
//! - [`logout`] - deletes the stored session
//! - [`roast`] - roasts your top artists and tracks, or a playlist
//! - [`serve`] - runs the `POST /api/roast` HTTP endpoint
//!
//! ## Data Flow
//!
//! ```text
//! load session → resolve (refresh if stale) → collect items
//!     → generate roast (Gemini, then OpenRouter) → reconcile → table
//! ```
//!
//! An errored session or a 401 from Spotify ends with a request to run
//! `spotroast auth` again; refreshes are never retried automatically.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotroast auth
//! spotroast roast
//! spotroast roast --playlist https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! spotroast serve
//! spotroast logout
//! ```

mod auth;
mod logout;
mod roast;
mod serve;

pub use auth::auth;
pub use logout::logout;
pub use roast::roast;
pub use serve::serve;

use reqwest::Client;

use crate::{config, error, utils};

/// Shared HTTP client with the configured timeout. Exits on invalid settings.
fn http_client() -> Client {
    let timeout = match config::http_timeout() {
        Ok(t) => t,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };
    match utils::http_client(timeout) {
        Ok(c) => c,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    }
}

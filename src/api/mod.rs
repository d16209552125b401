//! # API Module
//!
//! HTTP endpoints served by spotroast.
//!
//! ## Endpoints
//!
//! - [`roast`] - `POST /api/roast`, turns a comma-joined list of names into a
//!   roast report. Failures answer 500 with `{"error": "..."}`.
//! - [`callback`] - `GET /callback`, completes the Spotify sign-in by
//!   exchanging the authorization code. Only mounted while `spotroast auth` runs.
//! - [`health`] - `GET /health`, status and version for monitoring.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::{get, post}};
//! use spotroast::api::{health, roast};
//!
//! let app = Router::new()
//!     .route("/api/roast", post(roast))
//!     .route("/health", get(health))
//!     .with_state(state);
//! ```

mod callback;
mod health;
mod roast;

pub use callback::AuthState;
pub use callback::callback;
pub use health::health;
pub use roast::AppState;
pub use roast::roast;

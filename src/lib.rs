//! spotroast library
//!
//! Signs a user in to Spotify, keeps their OAuth session alive, collects a few
//! of their top artists and tracks (or the first entries of a playlist) and
//! asks a language model to roast them. The same pipeline is exposed over
//! HTTP as `POST /api/roast`.
//!
//! # Modules
//!
//! - `api` - HTTP handlers (`/api/roast`, `/callback`, `/health`)
//! - `cli` - Command-line interface implementations
//! - `config` - `.env` loading and typed settings
//! - `error` - Error types and their HTTP mapping
//! - `inference` - Gemini and OpenRouter providers, prompt template
//! - `roast` - Roast generation with fallback, parsing and reconciliation
//! - `server` - axum routers and server startup
//! - `session` - Token lifecycle and session persistence
//! - `spotify` - Sign-in flow and Spotify Web API client
//! - `types` - Data structures and wire shapes
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotroast::{config, roast::Roaster, utils};
//!
//! #[tokio::main]
//! async fn main() -> spotroast::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::InferenceSettings::from_env()?;
//!     let client = utils::http_client(config::http_timeout()?)?;
//!     let report = Roaster::from_settings(client, &settings)
//!         .roast_names("Blinding Lights by The Weeknd")
//!         .await?;
//!     println!("{}", report.playlist_roast);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod inference;
pub mod roast;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for command-level plumbing.
///
/// Boxes any `Send + Sync` error so the CLI can chain settings, I/O and
/// pipeline failures with `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line prefixed with a blue `o`.
///
/// ```
/// info!("Roasting {} items", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line to stderr and exits the process with status 1.
///
/// Only for fatal errors in CLI commands; library code returns errors instead.
///
/// ```
/// error!("Cannot load Spotify settings. Err: {}", e);
/// // unreachable
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line to stderr prefixed with a yellow `!`.
///
/// Used for recoverable problems: provider fallbacks, failed refreshes,
/// unparsable model output.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

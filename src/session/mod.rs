//! Session token lifecycle: creating, reusing, refreshing and persisting the
//! OAuth token record of one signed-in user.

mod store;
mod token;

pub use store::SessionStore;
pub use token::DEFAULT_EXPIRES_IN_SECS;
pub use token::EXPIRY_MARGIN_SECS;
pub use token::SessionTokenManager;

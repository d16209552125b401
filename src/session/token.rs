use chrono::{DateTime, Duration, Utc};
use reqwest::Client;

use crate::{
    config::SpotifySettings,
    types::{AuthGrant, TokenError, TokenRecord, TokenResponse, TokenState},
    warning,
};

/// Lifetime assumed when the grant does not report one.
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// A token this close to its expiry is refreshed before use.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

impl TokenRecord {
    pub fn state(&self, now: DateTime<Utc>) -> TokenState {
        if self.error.is_some() {
            TokenState::Errored
        } else if now < self.access_token_expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) {
            TokenState::Fresh
        } else {
            TokenState::Stale
        }
    }

    pub fn is_errored(&self) -> bool {
        self.error.is_some()
    }
}

/// Owns the refresh side of the OAuth token lifecycle.
///
/// Records move `Fresh -> Stale -> Fresh` on a successful refresh and
/// `Stale -> Errored` on a failed one. An errored record stays errored until a
/// new sign-in replaces it; refreshes are never retried here since Spotify may
/// have revoked or rotated the refresh token.
pub struct SessionTokenManager {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl SessionTokenManager {
    pub fn new(client: Client, settings: &SpotifySettings) -> Self {
        Self {
            client,
            token_url: settings.token_url.clone(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
        }
    }

    /// Creates the record for a fresh sign-in.
    pub fn initiate(grant: AuthGrant, now: DateTime<Utc>) -> TokenRecord {
        let expires_in = grant.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        TokenRecord {
            access_token: grant.access_token,
            access_token_expires_at: now + seconds(expires_in),
            refresh_token: grant.refresh_token,
            error: None,
        }
    }

    /// Returns a record whose access token can be used for the current request.
    ///
    /// Fresh and errored records come back untouched without a network call;
    /// stale ones go through [`Self::refresh`]. Callers must check
    /// [`TokenRecord::is_errored`] on the result.
    pub async fn resolve(&self, record: TokenRecord, now: DateTime<Utc>) -> TokenRecord {
        match record.state(now) {
            TokenState::Fresh | TokenState::Errored => record,
            TokenState::Stale => self.refresh(&record, now).await,
        }
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// On failure the returned record keeps the old tokens and carries
    /// [`TokenError::RefreshAccessTokenError`].
    pub async fn refresh(&self, record: &TokenRecord, now: DateTime<Utc>) -> TokenRecord {
        match self.request_refresh(&record.refresh_token).await {
            Ok(response) => TokenRecord {
                access_token: response.access_token,
                access_token_expires_at: now
                    + seconds(response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS)),
                refresh_token: response
                    .refresh_token
                    .unwrap_or_else(|| record.refresh_token.clone()),
                error: None,
            },
            Err(e) => {
                warning!("RefreshAccessTokenError: {}", e);
                TokenRecord {
                    error: Some(TokenError::RefreshAccessTokenError),
                    ..record.clone()
                }
            }
        }
    }

    async fn request_refresh(&self, refresh_token: &str) -> Result<TokenResponse, String> {
        let res = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(format!("token endpoint answered {}: {}", status, body));
        }

        res.json::<TokenResponse>().await.map_err(|e| e.to_string())
    }
}

fn seconds(secs: u64) -> Duration {
    Duration::seconds(secs.min(u64::from(u32::MAX)) as i64)
}

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    Res,
    api::AuthState,
    config::{self, SpotifySettings},
    info,
    server,
    session::{SessionStore, SessionTokenManager},
    types::{AuthGrant, PendingSignIn, TokenRecord, TokenResponse},
    utils, warning,
};

const SIGN_IN_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the authorization-code sign-in and persists the new token record.
///
/// 1. Generates the PKCE verifier/challenge and a random `state`
/// 2. Starts the local callback server on `server_addr`
/// 3. Opens the authorization URL in the browser (or prints it)
/// 4. Waits up to two minutes for the callback to exchange the code
/// 5. Creates the token record and writes it to `store`
///
/// Any previously stored session is superseded.
pub async fn auth(
    settings: SpotifySettings,
    client: Client,
    server_addr: &str,
    store: &SessionStore,
) -> Res<TokenRecord> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_state();

    let auth_url = authorize_url(&settings, &state, &code_challenge)?;

    let pending = Arc::new(Mutex::new(Some(PendingSignIn {
        state,
        code_verifier,
        grant: None,
    })));

    let listener = server::bind(server_addr).await?;
    let app = server::auth_router(AuthState {
        pending: Arc::clone(&pending),
        client,
        settings: Arc::new(settings),
    });
    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for Spotify authorization in your browser...");
    }

    let grant = wait_for_grant(pending, SIGN_IN_TIMEOUT).await;
    server_handle.abort();

    let Some(grant) = grant else {
        return Err("Authentication failed or timed out.".into());
    };

    let record = SessionTokenManager::initiate(grant, Utc::now());
    store.persist(&record).await?;
    Ok(record)
}

/// Builds the Spotify authorization URL for the code flow with PKCE.
pub fn authorize_url(
    settings: &SpotifySettings,
    state: &str,
    code_challenge: &str,
) -> Result<Url, String> {
    Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("scope", config::SPOTIFY_SCOPE),
            ("state", state),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
        ],
    )
    .map_err(|e| format!("invalid SPOTIFY_AUTH_URL {}: {}", settings.auth_url, e))
}

/// Exchanges an authorization code for the initial grant.
///
/// Authenticates with the client credentials (HTTP Basic) and sends the PKCE
/// verifier along with the code.
///
/// # Errors
///
/// Fails on transport errors, non-2xx answers and responses without an
/// access or refresh token.
pub async fn exchange_code(
    client: &Client,
    settings: &SpotifySettings,
    code: &str,
    verifier: &str,
) -> Result<AuthGrant, String> {
    let res = client
        .post(&settings.token_url)
        .basic_auth(&settings.client_id, Some(&settings.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("code_verifier", verifier),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(format!("token endpoint answered {}: {}", status, body));
    }

    let token: TokenResponse = res.json().await.map_err(|e| e.to_string())?;
    let refresh_token = token
        .refresh_token
        .ok_or_else(|| "token response is missing refresh_token".to_string())?;

    Ok(AuthGrant {
        access_token: token.access_token,
        refresh_token,
        expires_in: token.expires_in,
    })
}

/// Polls the shared sign-in state until the callback stored a grant or
/// `max_wait` elapsed.
async fn wait_for_grant(
    pending: Arc<Mutex<Option<PendingSignIn>>>,
    max_wait: Duration,
) -> Option<AuthGrant> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = pending.lock().await;
        if let Some(grant) = lock.as_ref().and_then(|p| p.grant.clone()) {
            return Some(grant);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}

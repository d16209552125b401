use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{config::SpotifySettings, spotify::auth::exchange_code, types::PendingSignIn, warning};

/// Shared state of the sign-in callback server.
#[derive(Clone)]
pub struct AuthState {
    pub pending: Arc<Mutex<Option<PendingSignIn>>>,
    pub client: Client,
    pub settings: Arc<SpotifySettings>,
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(auth): Extension<AuthState>,
) -> Html<&'static str> {
    if let Some(err) = params.get("error") {
        warning!("Authorization was denied: {}", err);
        return Html("<h4>Login failed.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = auth.pending.lock().await;
    let Some(pending) = state.as_mut() else {
        return Html("<h4>No sign-in in progress.</h4>");
    };

    if params.get("state") != Some(&pending.state) {
        warning!("Ignoring callback with mismatched state");
        return Html("<h4>Login failed.</h4>");
    }

    match exchange_code(&auth.client, &auth.settings, code, &pending.code_verifier).await {
        Ok(grant) => {
            pending.grant = Some(grant);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}

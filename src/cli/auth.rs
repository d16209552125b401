use crate::{
    cli::http_client,
    config::{self, SpotifySettings},
    error,
    session::SessionStore,
    spotify, success,
};

pub async fn auth() {
    let settings = match SpotifySettings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Cannot load Spotify settings. Err: {}", e),
    };

    let store = SessionStore::default();
    match spotify::auth::auth(settings, http_client(), &config::server_addr(), &store).await {
        Ok(record) => success!(
            "Authentication successful! Access token valid until {}.",
            record.access_token_expires_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        Err(e) => error!("Authentication failed. Err: {}", e),
    }
}

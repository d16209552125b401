use std::{future::Future, net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tokio::net::TcpListener;

use crate::{
    api::{self, AppState, AuthState},
    roast::Roaster,
};

/// Routes of the temporary sign-in server.
pub fn auth_router(state: AuthState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Routes of the roast API.
pub fn roast_router(roaster: Arc<Roaster>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/roast", post(api::roast))
        .with_state(AppState { roaster })
}

pub async fn bind(addr: &str) -> std::io::Result<TcpListener> {
    let addr = SocketAddr::from_str(addr).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Failed to parse server address {}: {}", addr, e),
        )
    })?;
    TcpListener::bind(&addr).await
}

/// Serves the roast API until `shutdown` resolves.
pub async fn start_api_server(
    listener: TcpListener,
    roaster: Arc<Roaster>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, roast_router(roaster))
        .with_graceful_shutdown(shutdown)
        .await
}

use std::sync::Arc;

use crate::{
    cli::http_client,
    config::{self, InferenceSettings},
    error, info,
    roast::Roaster,
    server, success, warning,
};

pub async fn serve() {
    let settings = match InferenceSettings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Cannot load inference settings. Err: {}", e),
    };
    if settings.openrouter_api_key.is_none() {
        warning!("OPENROUTER_API_KEY is not set, the fallback provider is disabled");
    }

    let roaster = Arc::new(Roaster::from_settings(http_client(), &settings));
    let addr = config::server_addr();
    let listener = match server::bind(&addr).await {
        Ok(l) => l,
        Err(e) => error!("Cannot bind {}. Err: {}", addr, e),
    };

    info!("Serving roasts on http://{}/api/roast", addr);
    if let Err(e) = server::start_api_server(listener, roaster, shutdown_signal()).await {
        error!("Server failed. Err: {}", e);
    }
    success!("Server stopped.");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warning!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

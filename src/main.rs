use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use careview::analyzer::Analyzer;
use careview::api::{self, AppState};
use careview::config;
use careview::store::ReviewStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let store = match ReviewStore::open(config::reviews_file()) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, "failed to open review store");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(Analyzer::default(), store));
    let app = api::router(state);

    let addr = ("127.0.0.1", config::DEFAULT_PORT);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, port = config::DEFAULT_PORT, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(port = config::DEFAULT_PORT, "review API listening");
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }
}

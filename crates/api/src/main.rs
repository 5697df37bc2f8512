use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tombola_api::backend::BackendClient;
use tombola_api::config::ServerConfig;
use tombola_api::router::build_app_router;
use tombola_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tombola_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = Arc::new(ServerConfig::from_env());
    tracing::info!(
        host = %config.host,
        port = %config.port,
        backend = %config.backend_base_url,
        "Loaded server configuration"
    );

    // --- Upstream backend client ---
    let backend = Arc::new(BackendClient::from_config(&config));

    // --- Router ---
    let state = AppState {
        config: Arc::clone(&config),
        backend,
    };
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await.expect("Server error");
}

mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    let port = config.port;
    tracing::info!(
        auth_mode = ?config.auth_mode,
        search_mode = ?config.search_mode,
        panda_api_url = %config.panda_api_url,
        "backends configured"
    );

    let auth = Arc::new(services::auth::AuthClient::from_config(&config));
    let search = Arc::new(services::search::SearchClient::from_config(&config));
    let state = state::AppState::new(config, auth, search);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "panda-search listening");
    axum::serve(listener, app).await.expect("server failed");
}

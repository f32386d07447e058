mod auth;
mod config;
mod error;
mod routes;
mod seed;

use std::sync::Arc;

use config::AppConfig;
use quorum_core::store::FixtureStore;
use routes::{app_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only load .env in development; production uses platform-native env injection.
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quorum_api=info".parse().expect("valid directive")),
        )
        .init();

    let config = Arc::new(AppConfig::from_env()?);
    tracing::info!("Starting quorum-api with config: {:?}", config);

    let store = match &config.fixture_path {
        Some(path) => FixtureStore::load(path).await?,
        None => FixtureStore::in_memory(),
    };
    let store = Arc::new(store);

    if config.seed_demo && !store.has_users().await {
        let users = seed::demo_users();
        tracing::info!(count = users.len(), "Seeding demo users");
        for user in &users {
            tracing::info!(email = %user.email, token = %user.session_token, "Demo session");
        }
        store.seed_users(users).await;
    }

    let state = AppState::new(config.clone(), store);
    let router = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("quorum-api listening on {}", config.bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}

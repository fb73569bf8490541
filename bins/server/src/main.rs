//! Postwall API Server
//!
//! Main entry point for the Postwall backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postwall_api::{AppState, create_router};
use postwall_core::post::{InMemoryPostStore, PostService, PostStore};
use postwall_core::storage::{StorageConfig, StorageService};
use postwall_db::{PostRepository, connect_with};
use postwall_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postwall=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let store: Arc<dyn PostStore> = if config.database.url.is_some() {
        let db = connect_with(&config.database).await?;
        info!("Connected to database");
        Arc::new(PostRepository::new(db))
    } else {
        warn!("database.url is not set; posts are kept in memory and lost on restart");
        Arc::new(InMemoryPostStore::new())
    };

    let jwt_service = JwtService::new(JwtConfig::from(&config.jwt));

    let storage_config = StorageConfig::from_settings(&config.storage)?;
    let storage = StorageService::from_config(storage_config)?;
    info!(
        provider = storage.provider_name(),
        max_file_size = storage.config().max_file_size,
        "Storage configured"
    );

    if config.auth.protect_writes {
        info!("Write routes require a bearer token");
    }

    let state = AppState {
        posts: PostService::new(store),
        jwt_service: Arc::new(jwt_service),
        storage: Arc::new(storage),
        auth: Arc::new(config.auth.clone()),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

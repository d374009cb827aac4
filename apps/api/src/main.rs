mod admin;
mod applications;
mod catalog;
mod chat;
mod config;
mod db;
mod errors;
mod models;
mod profiles;
mod recommendation;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::store::PgInternshipSource;
use crate::chat::client::ChatClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting InternLink API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Recommendation engine only ever sees this read-only view of the catalog
    let catalog = Arc::new(PgInternshipSource::new(db.clone()));

    let chat = match &config.ai_gateway_api_key {
        Some(key) => {
            let client = ChatClient::new(
                key.clone(),
                config.ai_gateway_url.clone(),
                config.chat_model.clone(),
            )?;
            info!("Chat client initialized (model: {})", client.model());
            Some(client)
        }
        None => {
            warn!("AI_GATEWAY_API_KEY not set; assistant chat disabled");
            None
        }
    };

    info!("Scoring weights: {:?}", config.scoring_weights);

    let state = AppState {
        db,
        catalog,
        chat,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use sqlx::PgPool;

use crate::catalog::store::InternshipSource;
use crate::chat::client::ChatClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Read-only view of the active catalog used by recommendations.
    pub catalog: Arc<dyn InternshipSource>,
    /// `None` when no AI gateway key is configured.
    pub chat: Option<ChatClient>,
    pub config: Config,
}

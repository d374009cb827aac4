use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::applications::store::count_user_applications;
use crate::catalog::store::sample_active_internships;
use crate::chat::prompts::{build_system_prompt, UserContext, CONTEXT_INTERNSHIP_LIMIT};
use crate::errors::AppError;
use crate::profiles::store::get_profile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/v1/chat
///
/// Catalog and profile context are best-effort: lookup failures are logged and
/// the question is answered without them.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let chat = state
        .chat
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable("Assistant chat is not configured".to_string()))?;

    let internships = sample_active_internships(&state.db, CONTEXT_INTERNSHIP_LIMIT)
        .await
        .unwrap_or_else(|e| {
            warn!("Could not load internships for chat context: {e}");
            Vec::new()
        });

    let user = match req.user_id {
        Some(user_id) => load_user_context(&state.db, user_id).await,
        None => None,
    };

    let system = build_system_prompt(&internships, user.as_ref());
    let response = chat.complete(&system, message).await?;

    Ok(Json(ChatResponse { response }))
}

async fn load_user_context(pool: &PgPool, user_id: Uuid) -> Option<UserContext> {
    let profile = match get_profile(pool, user_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return None,
        Err(e) => {
            warn!("Could not load profile {user_id} for chat context: {e}");
            return None;
        }
    };

    let application_count = count_user_applications(pool, user_id)
        .await
        .unwrap_or_else(|e| {
            warn!("Could not count applications for {user_id}: {e}");
            0
        });

    Some(UserContext {
        profile,
        application_count,
    })
}

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::profiles::store::{get_profile, upsert_profile, ProfileUpdate};
use crate::state::AppState;

/// GET /api/v1/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileRow>, AppError> {
    let profile = get_profile(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok(Json(profile))
}

/// PUT /api/v1/profiles/:id
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileRow>, AppError> {
    let update = update.normalized();
    if update.full_name.is_empty() {
        return Err(AppError::Validation("full_name cannot be empty".to_string()));
    }
    let profile = upsert_profile(&state.db, id, &update).await?;
    Ok(Json(profile))
}

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::applications::store::{
    application_insert_error, list_user_applications, record_application,
};
use crate::catalog::store::get_internship;
use crate::errors::AppError;
use crate::models::application::UserApplicationRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub user_id: Uuid,
    pub internship_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub internship_id: Uuid,
    pub application_url: String,
    /// `false` when the user had already applied; the call is still a success.
    pub newly_recorded: bool,
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// POST /api/v1/applications
///
/// Accounts without a stored profile may apply.
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(req): Json<ApplyRequest>,
) -> Result<Json<ApplyResponse>, AppError> {
    let internship = get_internship(&state.db, req.internship_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Internship {} not found", req.internship_id)))?;

    let newly_recorded = record_application(&state.db, req.user_id, internship.id)
        .await
        .map_err(|e| application_insert_error(e, internship.id))?;
    if newly_recorded {
        info!("User {} applied to internship {}", req.user_id, internship.id);
    }

    Ok(Json(ApplyResponse {
        internship_id: internship.id,
        application_url: internship.application_url,
        newly_recorded,
    }))
}

/// GET /api/v1/applications?user_id=
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<UserApplicationRow>>, AppError> {
    Ok(Json(list_user_applications(&state.db, params.user_id).await?))
}

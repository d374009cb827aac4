use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::applications::store::{clamp_recent_limit, recent_applications};
use crate::catalog::store::{catalog_overview, CatalogOverview};
use crate::errors::AppError;
use crate::models::application::RecentApplicationRow;
use crate::models::profile::ProfileSummaryRow;
use crate::profiles::store::{delete_profile, list_profile_summaries};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/admin/overview
pub async fn handle_overview(
    State(state): State<AppState>,
) -> Result<Json<CatalogOverview>, AppError> {
    Ok(Json(catalog_overview(&state.db).await?))
}

/// GET /api/v1/admin/applications/recent?limit=
pub async fn handle_recent_applications(
    State(state): State<AppState>,
    Query(params): Query<RecentQuery>,
) -> Result<Json<Vec<RecentApplicationRow>>, AppError> {
    let limit = clamp_recent_limit(params.limit);
    Ok(Json(recent_applications(&state.db, limit).await?))
}

/// GET /api/v1/admin/users
pub async fn handle_list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileSummaryRow>>, AppError> {
    Ok(Json(list_profile_summaries(&state.db).await?))
}

/// DELETE /api/v1/admin/users/:id
///
/// Removes the profile and the applications recorded under its id.
pub async fn handle_delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !delete_profile(&state.db, id).await? {
        return Err(AppError::NotFound(format!("User {id} not found")));
    }
    info!("Deleted user profile {id} and its applications");
    Ok(StatusCode::NO_CONTENT)
}

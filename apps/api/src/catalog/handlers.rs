//! Axum route handlers for catalog curation. Mounted behind the admin guard.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::csv_import::{
    parse_internships_csv, plan_import, CsvImportError, RejectedRow, SkippedRow,
};
use crate::catalog::store::{
    create_internship, delete_internship, existing_duplicate_keys, insert_internships,
    list_internships, update_internship,
};
use crate::catalog::validation::{normalize_input, validate_input};
use crate::errors::AppError;
use crate::models::internship::{Internship, InternshipInput};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub inserted: usize,
    pub skipped: Vec<SkippedRow>,
    pub rejected: Vec<RejectedRow>,
}

fn validated(input: InternshipInput) -> Result<InternshipInput, AppError> {
    let input = normalize_input(input);
    let problems = validate_input(&input);
    if problems.is_empty() {
        Ok(input)
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}

/// GET /api/v1/admin/internships
pub async fn handle_list_internships(
    State(state): State<AppState>,
) -> Result<Json<Vec<Internship>>, AppError> {
    Ok(Json(list_internships(&state.db).await?))
}

/// POST /api/v1/admin/internships
pub async fn handle_create_internship(
    State(state): State<AppState>,
    Json(input): Json<InternshipInput>,
) -> Result<(StatusCode, Json<Internship>), AppError> {
    let input = validated(input)?;
    let created = create_internship(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/v1/admin/internships/:id
pub async fn handle_update_internship(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<InternshipInput>,
) -> Result<Json<Internship>, AppError> {
    let input = validated(input)?;
    let updated = update_internship(&state.db, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Internship {id} not found")))?;
    info!("Updated internship {id}");
    Ok(Json(updated))
}

/// DELETE /api/v1/admin/internships/:id
pub async fn handle_delete_internship(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !delete_internship(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Internship {id} not found")));
    }
    info!("Deleted internship {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/internships/import
///
/// Multipart upload with the CSV in field `file`. Valid, non-duplicate rows are
/// inserted in one transaction; skipped and rejected rows are reported back.
pub async fn handle_import_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImportResponse>), AppError> {
    let mut upload: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::Validation("CSV must be UTF-8 encoded".to_string()))?;
        upload = Some(text);
    }

    let text = upload
        .ok_or_else(|| AppError::Validation(format!("Missing '{UPLOAD_FIELD}' field")))?;

    let parsed = parse_internships_csv(&text)?;
    let existing = existing_duplicate_keys(&state.db).await?;
    let plan = plan_import(parsed, &existing);

    if plan.accepted.is_empty() {
        warn!(
            skipped = plan.skipped.len(),
            rejected = plan.rejected.len(),
            "CSV import produced no insertable rows"
        );
        return Err(CsvImportError::NoValidRows.into());
    }

    let inserted = insert_internships(&state.db, &plan.accepted).await?;
    info!(
        inserted = inserted.len(),
        skipped = plan.skipped.len(),
        rejected = plan.rejected.len(),
        "CSV import committed"
    );

    Ok((
        StatusCode::CREATED,
        Json(ImportResponse {
            inserted: inserted.len(),
            skipped: plan.skipped,
            rejected: plan.rejected,
        }),
    ))
}

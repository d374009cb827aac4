//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::recommendation::preference::{
    PreferenceForm, INTERESTS, POPULAR_CITIES, REMOTE_LOCATION, SECTORS, SUGGESTED_SKILLS,
};
use crate::recommendation::service::{recommend, Recommendations};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WizardOptions {
    pub skills: &'static [&'static str],
    pub interests: &'static [&'static str],
    pub sectors: &'static [&'static str],
    pub cities: &'static [&'static str],
    pub remote_location: &'static str,
}

/// POST /api/v1/recommendations
///
/// Ranks the active catalog against the submitted preference wizard.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(form): Json<PreferenceForm>,
) -> Result<Json<Recommendations>, AppError> {
    let preference = form.into_preference();
    let result = recommend(
        state.catalog.as_ref(),
        &preference,
        &state.config.scoring_weights,
        rand::thread_rng,
    )
    .await?;
    Ok(Json(result))
}

/// GET /api/v1/recommendations/options
///
/// Curated vocabularies the wizard offers as one-click choices.
pub async fn handle_wizard_options() -> Json<WizardOptions> {
    Json(WizardOptions {
        skills: SUGGESTED_SKILLS,
        interests: INTERESTS,
        sectors: SECTORS,
        cities: POPULAR_CITIES,
        remote_location: REMOTE_LOCATION,
    })
}

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::catalog::store::InternshipSource;
use crate::errors::AppError;
use crate::recommendation::engine::{is_fallback, rank, ScoredInternship, ScoringWeights};
use crate::recommendation::preference::Preference;

/// Result of one recommendation request.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub recommendations: Vec<ScoredInternship>,
    /// True when nothing matched and a random sample was returned instead.
    pub fallback: bool,
    /// Number of active postings considered.
    pub candidates: usize,
}

/// Loads the active catalog from `source` and ranks it against `preference`.
///
/// The random source is built only after the catalog is fetched, so a
/// thread-local generator never lives across an await point.
pub async fn recommend<R, F>(
    source: &dyn InternshipSource,
    preference: &Preference,
    weights: &ScoringWeights,
    make_rng: F,
) -> Result<Recommendations, AppError>
where
    R: Rng,
    F: FnOnce() -> R,
{
    let internships = source.fetch_active_internships().await?;
    let candidates = internships.len();

    let mut rng = make_rng();
    let recommendations = rank(internships, preference, weights, &mut rng);
    let fallback = is_fallback(&recommendations);

    info!(
        candidates,
        returned = recommendations.len(),
        top_score = recommendations.first().map(|r| r.score).unwrap_or(0),
        fallback,
        "Ranked internship recommendations"
    );

    Ok(Recommendations {
        recommendations,
        fallback,
        candidates,
    })
}

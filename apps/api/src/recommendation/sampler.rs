use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::internship::Internship;
use crate::recommendation::engine::ScoredInternship;

/// Draws up to `count` internships uniformly at random without replacement,
/// each reported with a zero score and no matched skills.
pub fn sample_fallback<R: Rng + ?Sized>(
    mut internships: Vec<Internship>,
    count: usize,
    rng: &mut R,
) -> Vec<ScoredInternship> {
    let count = count.min(internships.len());
    let (picked, _) = internships.partial_shuffle(rng, count);
    picked
        .iter()
        .cloned()
        .map(ScoredInternship::unscored)
        .collect()
}

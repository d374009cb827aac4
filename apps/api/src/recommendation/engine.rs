//! Recommendation Engine — rule-based scoring of catalog internships against a preference.
//!
//! Pure and synchronous: no I/O, no shared state. The only non-deterministic
//! branch (fallback sampling) draws from a caller-supplied `Rng`, so handlers pass
//! a thread-local generator and tests pass a seeded one.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::internship::Internship;
use crate::recommendation::preference::{Preference, REMOTE_LOCATION};
use crate::recommendation::sampler::sample_fallback;

/// Maximum number of recommendations surfaced per request.
pub const TOP_N: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

/// Points awarded per rule. Defaults: sector 20, skill 10 (per matched skill),
/// remote 15, city 15, education 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub sector: u32,
    pub skill: u32,
    pub remote: u32,
    pub city: u32,
    pub education: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            sector: 20,
            skill: 10,
            remote: 15,
            city: 15,
            education: 5,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// An internship with its match score and the required skills that matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredInternship {
    #[serde(flatten)]
    pub internship: Internship,
    pub score: u32,
    pub matched_skills: Vec<String>,
}

impl ScoredInternship {
    /// Wraps an internship with a zero score, as the fallback path reports it.
    pub fn unscored(internship: Internship) -> Self {
        Self {
            internship,
            score: 0,
            matched_skills: Vec::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Ranking
// ────────────────────────────────────────────────────────────────────────────

/// Scores every internship, keeps the top `TOP_N` and falls back to a random
/// sample when none of them matched anything.
///
/// `internships` must already be restricted to active postings. A non-empty
/// result whose scores are all zero is always the fallback sample.
pub fn rank<R: Rng + ?Sized>(
    internships: Vec<Internship>,
    preference: &Preference,
    weights: &ScoringWeights,
    rng: &mut R,
) -> Vec<ScoredInternship> {
    let mut scored: Vec<ScoredInternship> = internships
        .iter()
        .map(|internship| score_internship(internship, preference, weights))
        .collect();

    // `sort_by` is stable: equal scores keep catalog order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(TOP_N);

    if is_fallback(&scored) {
        return sample_fallback(internships, TOP_N, rng);
    }

    scored
}

/// True when a ranked list came from the random fallback rather than matches.
pub fn is_fallback(ranked: &[ScoredInternship]) -> bool {
    !ranked.is_empty() && ranked.iter().all(|s| s.score == 0)
}

/// Applies every rule to a single internship. Points saturate at `u32::MAX`.
pub fn score_internship(
    internship: &Internship,
    preference: &Preference,
    weights: &ScoringWeights,
) -> ScoredInternship {
    let mut score: u32 = 0;

    // Sector: exact, case-sensitive
    if preference.sectors.iter().any(|s| *s == internship.sector) {
        score = score.saturating_add(weights.sector);
    }

    let matched_skills = match_skills(&internship.required_skills, &preference.skills);
    let matched_count = u32::try_from(matched_skills.len()).unwrap_or(u32::MAX);
    score = score.saturating_add(weights.skill.saturating_mul(matched_count));

    score = score.saturating_add(location_points(internship, &preference.preferred_locations, weights));

    let has_education = preference
        .education
        .as_deref()
        .is_some_and(|e| !e.trim().is_empty());
    if internship.min_education.is_some() && has_education {
        score = score.saturating_add(weights.education);
    }

    ScoredInternship {
        internship: internship.clone(),
        score,
        matched_skills,
    }
}

/// Returns the required skills (internship's own labels, in order) that match
/// at least one user skill by case-insensitive substring in either direction.
///
/// Repeated required labels are counted once. Blank user skills are ignored
/// since an empty string is a substring of everything.
pub fn match_skills(required: &[String], user_skills: &[String]) -> Vec<String> {
    let user_lower: Vec<String> = user_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let mut matched: Vec<String> = Vec::new();
    for skill in required {
        let req_lower = skill.to_lowercase();
        let hit = user_lower
            .iter()
            .any(|u| u.contains(&req_lower) || req_lower.contains(u.as_str()));
        if hit && !matched.iter().any(|m| m.to_lowercase() == req_lower) {
            matched.push(skill.clone());
        }
    }
    matched
}

/// Remote and city rules are independent; both may apply to one posting.
fn location_points(
    internship: &Internship,
    locations: &[String],
    weights: &ScoringWeights,
) -> u32 {
    let mut points: u32 = 0;

    if internship.remote && locations.iter().any(|l| l == REMOTE_LOCATION) {
        points = points.saturating_add(weights.remote);
    }

    if let Some(city) = internship.city.as_deref() {
        let city_lower = city.to_lowercase();
        if locations.iter().any(|l| l.to_lowercase() == city_lower) {
            points = points.saturating_add(weights.city);
        }
    }

    points
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn make_internship(title: &str, sector: &str, skills: &[&str], city: Option<&str>) -> Internship {
        Internship {
            id: Uuid::new_v4(),
            title: title.to_string(),
            org_name: "Acme".to_string(),
            sector: sector.to_string(),
            description: String::new(),
            city: city.map(str::to_string),
            state: None,
            pin: None,
            remote: false,
            min_education: None,
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            stipend_min: None,
            stipend_max: None,
            application_url: "https://example.com/apply".to_string(),
            deadline: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_scenario_single_match_ranks_first() {
        let catalog = vec![
            make_internship("Nurse Aide", "Healthcare", &["Patient Care"], Some("Delhi")),
            make_internship("Farm Survey", "Agriculture", &["Fieldwork"], Some("Jaipur")),
            make_internship("Data Analyst Intern", "IT Sector", &["Python", "SQL"], Some("Mumbai")),
            make_internship("Tour Guide", "Tourism", &["Hindi"], Some("Kochi")),
            make_internship("Teaching Assistant", "Education", &["Pedagogy"], Some("Lucknow")),
            make_internship("Field Reporter", "Media", &["Journalism"], Some("Kolkata")),
        ];
        let preference = Preference {
            skills: strings(&["Python", "Excel"]),
            sectors: strings(&["IT Sector"]),
            preferred_locations: strings(&["Mumbai"]),
            education: None,
        };

        let ranked = rank(catalog.clone(), &preference, &ScoringWeights::default(), &mut rng());

        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].internship.title, "Data Analyst Intern");
        assert_eq!(ranked[0].score, 45);
        assert_eq!(ranked[0].matched_skills, vec!["Python".to_string()]);

        let rest: Vec<&str> = ranked[1..].iter().map(|s| s.internship.title.as_str()).collect();
        assert_eq!(
            rest,
            vec!["Nurse Aide", "Farm Survey", "Tour Guide", "Teaching Assistant"]
        );
        assert!(ranked[1..].iter().all(|s| s.score == 0));
    }

    #[test]
    fn test_scores_are_deterministic() {
        let catalog = vec![
            make_internship("A", "IT Sector", &["Rust", "SQL"], Some("Pune")),
            make_internship("B", "Finance", &["Excel"], None),
        ];
        let preference = Preference {
            skills: strings(&["rust", "excel"]),
            sectors: strings(&["Finance"]),
            preferred_locations: strings(&["pune"]),
            education: Some("B.Tech".to_string()),
        };
        let weights = ScoringWeights::default();

        let first = rank(catalog.clone(), &preference, &weights, &mut rng());
        let second = rank(catalog, &preference, &weights, &mut StdRng::seed_from_u64(99));
        let scores = |r: &[ScoredInternship]| {
            r.iter().map(|s| (s.internship.id, s.score)).collect::<Vec<_>>()
        };
        assert_eq!(scores(&first), scores(&second));
    }

    #[test]
    fn test_each_newly_matched_skill_adds_ten() {
        let internship = make_internship("X", "IT Sector", &["Python", "SQL", "Docker"], None);
        let weights = ScoringWeights::default();
        let mut preference = Preference {
            skills: strings(&["Python"]),
            ..Preference::default()
        };
        let base = score_internship(&internship, &preference, &weights).score;

        preference.skills.push("sql".to_string());
        let one_more = score_internship(&internship, &preference, &weights).score;
        assert_eq!(one_more, base + 10);

        preference.skills.push("Docker".to_string());
        let two_more = score_internship(&internship, &preference, &weights).score;
        assert_eq!(two_more, base + 20);
    }

    #[test]
    fn test_sector_match_adds_twenty() {
        let inside = make_internship("X", "Finance", &[], None);
        let outside = make_internship("X", "Media", &[], None);
        let preference = Preference {
            sectors: strings(&["Finance"]),
            ..Preference::default()
        };
        let weights = ScoringWeights::default();

        let a = score_internship(&inside, &preference, &weights).score;
        let b = score_internship(&outside, &preference, &weights).score;
        assert_eq!(a, b + 20);
    }

    #[test]
    fn test_sector_match_is_case_sensitive() {
        let internship = make_internship("X", "Finance", &[], None);
        let preference = Preference {
            sectors: strings(&["finance"]),
            ..Preference::default()
        };
        assert_eq!(
            score_internship(&internship, &preference, &ScoringWeights::default()).score,
            0
        );
    }

    #[test]
    fn test_remote_and_city_are_additive() {
        let mut internship = make_internship("X", "IT Sector", &[], Some("Pune"));
        internship.remote = true;
        let preference = Preference {
            preferred_locations: strings(&["Remote", "Pune"]),
            ..Preference::default()
        };
        let scored = score_internship(&internship, &preference, &ScoringWeights::default());
        assert_eq!(scored.score, 30);
    }

    #[test]
    fn test_remote_rule_needs_remote_flag() {
        let internship = make_internship("X", "IT Sector", &[], Some("Delhi"));
        let preference = Preference {
            preferred_locations: strings(&["Remote"]),
            ..Preference::default()
        };
        assert_eq!(
            score_internship(&internship, &preference, &ScoringWeights::default()).score,
            0
        );
    }

    #[test]
    fn test_city_match_is_case_insensitive() {
        let internship = make_internship("X", "IT Sector", &[], Some("Bangalore"));
        let preference = Preference {
            preferred_locations: strings(&["bangalore"]),
            ..Preference::default()
        };
        assert_eq!(
            score_internship(&internship, &preference, &ScoringWeights::default()).score,
            15
        );
    }

    #[test]
    fn test_education_is_presence_only() {
        let mut internship = make_internship("X", "IT Sector", &[], None);
        internship.min_education = Some("PhD".to_string());
        let weights = ScoringWeights::default();

        let with_level = Preference {
            education: Some("12th Pass".to_string()),
            ..Preference::default()
        };
        assert_eq!(score_internship(&internship, &with_level, &weights).score, 5);

        let blank = Preference {
            education: Some("  ".to_string()),
            ..Preference::default()
        };
        assert_eq!(score_internship(&internship, &blank, &weights).score, 0);
    }

    #[test]
    fn test_skill_match_is_bidirectional_substring() {
        let required = strings(&["Java", "Machine Learning", "Figma"]);
        let user = strings(&["JavaScript", "learning"]);
        let matched = match_skills(&required, &user);
        assert_eq!(matched, strings(&["Java", "Machine Learning"]));
    }

    #[test]
    fn test_duplicate_required_skills_count_once() {
        let internship = make_internship("X", "IT Sector", &["SQL", "sql", "SQL"], None);
        let preference = Preference {
            skills: strings(&["SQL"]),
            ..Preference::default()
        };
        let scored = score_internship(&internship, &preference, &ScoringWeights::default());
        assert_eq!(scored.score, 10);
        assert_eq!(scored.matched_skills, strings(&["SQL"]));
    }

    #[test]
    fn test_blank_user_skill_matches_nothing() {
        let matched = match_skills(&strings(&["Rust"]), &strings(&["", "   "]));
        assert!(matched.is_empty());
    }

    #[test]
    fn test_never_returns_more_than_top_n() {
        let catalog: Vec<Internship> = (0..20)
            .map(|i| make_internship(&format!("Role {i}"), "IT Sector", &["Rust"], None))
            .collect();
        let preference = Preference {
            skills: strings(&["Rust"]),
            ..Preference::default()
        };
        let ranked = rank(catalog, &preference, &ScoringWeights::default(), &mut rng());
        assert_eq!(ranked.len(), TOP_N);
    }

    #[test]
    fn test_all_zero_triggers_fallback() {
        let catalog: Vec<Internship> = (0..8)
            .map(|i| make_internship(&format!("Role {i}"), "Media", &["Editing"], None))
            .collect();
        let preference = Preference {
            skills: strings(&["Welding"]),
            ..Preference::default()
        };

        let ranked = rank(catalog.clone(), &preference, &ScoringWeights::default(), &mut rng());
        assert!(is_fallback(&ranked));
        assert_eq!(ranked.len(), 5);
        assert!(ranked
            .iter()
            .all(|s| s.score == 0 && s.matched_skills.is_empty()));
        assert!(ranked
            .iter()
            .all(|s| catalog.iter().any(|c| c.id == s.internship.id)));
    }

    #[test]
    fn test_fallback_on_small_catalog_returns_everything() {
        let catalog = vec![
            make_internship("A", "Media", &[], None),
            make_internship("B", "Media", &[], None),
        ];
        let ranked = rank(catalog, &Preference::default(), &ScoringWeights::default(), &mut rng());
        assert!(is_fallback(&ranked));
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_empty_catalog_returns_empty() {
        let preference = Preference {
            skills: strings(&["Rust"]),
            ..Preference::default()
        };
        let ranked = rank(Vec::new(), &preference, &ScoringWeights::default(), &mut rng());
        assert!(ranked.is_empty());
        assert!(!is_fallback(&ranked));
    }

    #[test]
    fn test_custom_weights_are_applied() {
        let internship = make_internship("X", "Finance", &["Excel"], None);
        let preference = Preference {
            skills: strings(&["excel"]),
            sectors: strings(&["Finance"]),
            ..Preference::default()
        };
        let weights = ScoringWeights {
            sector: 10,
            skill: 5,
            remote: 5,
            city: 5,
            education: 0,
        };
        assert_eq!(score_internship(&internship, &preference, &weights).score, 15);
    }

    #[test]
    fn test_huge_weights_saturate_instead_of_overflowing() {
        let mut internship = make_internship("X", "Finance", &["Rust", "SQL"], Some("Pune"));
        internship.remote = true;
        internship.min_education = Some("B.Tech".to_string());
        let preference = Preference {
            skills: strings(&["rust", "sql"]),
            sectors: strings(&["Finance"]),
            preferred_locations: strings(&["Remote", "Pune"]),
            education: Some("B.Tech".to_string()),
        };
        let weights = ScoringWeights {
            sector: u32::MAX,
            skill: 3_000_000_000,
            remote: u32::MAX,
            city: u32::MAX,
            education: u32::MAX,
        };

        let scored = score_internship(&internship, &preference, &weights);
        assert_eq!(scored.score, u32::MAX);
        assert_eq!(scored.matched_skills, strings(&["Rust", "SQL"]));

        let plain = make_internship("Y", "Media", &[], None);
        let ranked = rank(vec![plain, internship], &preference, &weights, &mut rng());
        assert_eq!(ranked[0].internship.title, "X");
        assert_eq!(ranked[0].score, u32::MAX);
    }

    #[test]
    fn test_scored_internship_serializes_flat() {
        let internship = make_internship("X", "Finance", &["Excel"], None);
        let scored = ScoredInternship {
            internship,
            score: 10,
            matched_skills: strings(&["Excel"]),
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["title"], "X");
        assert_eq!(value["score"], 10);
        assert_eq!(value["matched_skills"][0], "Excel");
    }
}

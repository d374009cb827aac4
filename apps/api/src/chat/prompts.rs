use crate::models::internship::Internship;
use crate::models::profile::ProfileRow;

/// Number of active postings summarised in the assistant's context.
pub const CONTEXT_INTERNSHIP_LIMIT: i64 = 10;

const ASSISTANT_PREAMBLE: &str = "You are InternLink Bot, a helpful assistant for the PM Internship Scheme platform.

Context: This platform helps students find internships through personalised recommendations.";

const PLATFORM_FAQ: &str = "FAQs:
- How to find internships: Click \"Find My Internship\" and fill out your preferences
- Eligibility: Students from 10+2 to PG levels can apply
- Application process: Browse recommendations and apply through provided links
- Profile management: Edit your profile from the dashboard";

const CLOSING_INSTRUCTIONS: &str = "Be helpful, concise, and friendly. Keep responses short and to the point. If asked about the user's profile or applications, use the information provided above.";

/// What the assistant may know about the person asking.
pub struct UserContext {
    pub profile: ProfileRow,
    pub application_count: i64,
}

pub fn build_system_prompt(internships: &[Internship], user: Option<&UserContext>) -> String {
    let mut prompt = String::from(ASSISTANT_PREAMBLE);

    if !internships.is_empty() {
        prompt.push_str("\n\nAvailable internships include:\n");
        let lines: Vec<String> = internships
            .iter()
            .map(|i| {
                format!(
                    "- {} at {} ({}) in {}",
                    i.title,
                    i.org_name,
                    i.sector,
                    i.location_label()
                )
            })
            .collect();
        prompt.push_str(&lines.join("\n"));
    }

    prompt.push_str("\n\n");
    prompt.push_str(PLATFORM_FAQ);

    if let Some(user) = user {
        let profile = &user.profile;
        let or_unset = |v: &Option<String>| v.clone().unwrap_or_else(|| "Not specified".to_string());
        prompt.push_str(&format!(
            "\n\nUser Information:\n- Name: {}\n- Education: {}\n- Branch: {}\n- College: {}\n- Applications submitted: {}",
            profile.full_name,
            or_unset(&profile.degree),
            or_unset(&profile.branch),
            or_unset(&profile.college_name),
            user.application_count
        ));
    }

    prompt.push_str("\n\n");
    prompt.push_str(CLOSING_INSTRUCTIONS);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn internship(title: &str, remote: bool, city: Option<&str>) -> Internship {
        Internship {
            id: Uuid::new_v4(),
            title: title.to_string(),
            org_name: "Acme".to_string(),
            sector: "IT Sector".to_string(),
            description: String::new(),
            city: city.map(str::to_string),
            state: None,
            pin: None,
            remote,
            min_education: None,
            required_skills: vec![],
            stipend_min: None,
            stipend_max: None,
            application_url: "https://example.com".to_string(),
            deadline: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_lists_internship_locations() {
        let prompt = build_system_prompt(
            &[
                internship("Backend Intern", true, Some("Pune")),
                internship("Data Intern", false, Some("Mumbai")),
                internship("Field Intern", false, None),
            ],
            None,
        );
        assert!(prompt.contains("- Backend Intern at Acme (IT Sector) in Remote"));
        assert!(prompt.contains("- Data Intern at Acme (IT Sector) in Mumbai"));
        assert!(prompt.contains("- Field Intern at Acme (IT Sector) in Various locations"));
        assert!(!prompt.contains("User Information"));
    }

    #[test]
    fn test_prompt_without_catalog_skips_listing() {
        let prompt = build_system_prompt(&[], None);
        assert!(!prompt.contains("Available internships"));
        assert!(prompt.contains("FAQs:"));
        assert!(prompt.ends_with(CLOSING_INSTRUCTIONS));
    }

    #[test]
    fn test_prompt_includes_user_profile() {
        let user = UserContext {
            profile: ProfileRow {
                id: Uuid::new_v4(),
                full_name: "Asha Rao".to_string(),
                date_of_birth: None,
                college_name: Some("IIT Delhi".to_string()),
                degree: Some("B.Tech".to_string()),
                branch: None,
                created_at: Utc::now(),
            },
            application_count: 3,
        };
        let prompt = build_system_prompt(&[], Some(&user));
        assert!(prompt.contains("- Name: Asha Rao"));
        assert!(prompt.contains("- Education: B.Tech"));
        assert!(prompt.contains("- Branch: Not specified"));
        assert!(prompt.contains("- Applications submitted: 3"));
    }
}

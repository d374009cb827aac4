use crate::models::internship::InternshipInput;

/// Trims text fields, turns blank optionals into `None` and drops blank skills.
pub fn normalize_input(mut input: InternshipInput) -> InternshipInput {
    input.title = input.title.trim().to_string();
    input.org_name = input.org_name.trim().to_string();
    input.sector = input.sector.trim().to_string();
    input.description = input.description.trim().to_string();
    input.application_url = input.application_url.trim().to_string();
    input.city = blank_to_none(input.city);
    input.state = blank_to_none(input.state);
    input.pin = blank_to_none(input.pin);
    input.min_education = blank_to_none(input.min_education);
    input.required_skills = input
        .required_skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    input
}

/// Returns every problem found; empty means the posting can be stored.
pub fn validate_input(input: &InternshipInput) -> Vec<String> {
    let mut problems = Vec::new();

    if input.title.trim().is_empty() {
        problems.push("title is required".to_string());
    }
    if input.org_name.trim().is_empty() {
        problems.push("org_name is required".to_string());
    }
    if input.sector.trim().is_empty() {
        problems.push("sector is required".to_string());
    }

    let url = input.application_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        problems.push("application_url must start with http:// or https://".to_string());
    }

    for (field, value) in [("stipend_min", input.stipend_min), ("stipend_max", input.stipend_max)] {
        if matches!(value, Some(v) if v < 0) {
            problems.push(format!("{field} cannot be negative"));
        }
    }
    if let (Some(min), Some(max)) = (input.stipend_min, input.stipend_max) {
        if min > max {
            problems.push(format!("stipend_min ({min}) exceeds stipend_max ({max})"));
        }
    }

    problems
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

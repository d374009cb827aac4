use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog posting as stored in `internships`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Internship {
    pub id: Uuid,
    pub title: String,
    pub org_name: String,
    pub sector: String,
    pub description: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin: Option<String>,
    pub remote: bool,
    pub min_education: Option<String>,
    pub required_skills: Vec<String>,
    pub stipend_min: Option<i32>,
    pub stipend_max: Option<i32>,
    pub application_url: String,
    pub deadline: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Writable fields of an internship, shared by the admin form and CSV import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternshipInput {
    pub title: String,
    pub org_name: String,
    pub sector: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub min_education: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub stipend_min: Option<i32>,
    #[serde(default)]
    pub stipend_max: Option<i32>,
    pub application_url: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl InternshipInput {
    /// Case-insensitive `(title, org_name)` pair used to spot duplicate postings.
    pub fn duplicate_key(&self) -> (String, String) {
        duplicate_key(&self.title, &self.org_name)
    }
}

impl Internship {
    /// Human-readable location used in chat context and listings.
    pub fn location_label(&self) -> &str {
        if self.remote {
            "Remote"
        } else {
            self.city.as_deref().unwrap_or("Various locations")
        }
    }
}

pub fn duplicate_key(title: &str, org_name: &str) -> (String, String) {
    (
        title.trim().to_lowercase(),
        org_name.trim().to_lowercase(),
    )
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An application joined with the posting it targets, for the "my internships" view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserApplicationRow {
    pub id: Uuid,
    pub internship_id: Uuid,
    pub title: String,
    pub org_name: String,
    pub sector: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub remote: bool,
    pub application_url: String,
    pub created_at: DateTime<Utc>,
}

/// An application joined with applicant and posting names, for the admin feed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecentApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub applicant_name: Option<String>,
    pub internship_id: Uuid,
    pub internship_title: String,
    pub org_name: String,
    pub created_at: DateTime<Utc>,
}

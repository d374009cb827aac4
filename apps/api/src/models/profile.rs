use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub college_name: Option<String>,
    pub degree: Option<String>,
    pub branch: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Profile row plus its application count, for the admin user list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileSummaryRow {
    pub id: Uuid,
    pub full_name: String,
    pub college_name: Option<String>,
    pub degree: Option<String>,
    pub branch: Option<String>,
    pub created_at: DateTime<Utc>,
    pub application_count: i64,
}

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{ProfileRow, ProfileSummaryRow};

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub college_name: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

impl ProfileUpdate {
    /// Trims every field; blank optionals become `None`.
    pub fn normalized(self) -> Self {
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            full_name: self.full_name.trim().to_string(),
            date_of_birth: self.date_of_birth,
            college_name: clean(self.college_name),
            degree: clean(self.degree),
            branch: clean(self.branch),
        }
    }
}

pub async fn get_profile(pool: &PgPool, id: Uuid) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Inserts or replaces the profile for an account id.
pub async fn upsert_profile(
    pool: &PgPool,
    id: Uuid,
    update: &ProfileUpdate,
) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles (id, full_name, date_of_birth, college_name, degree, branch)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (id) DO UPDATE SET
            full_name = EXCLUDED.full_name,
            date_of_birth = EXCLUDED.date_of_birth,
            college_name = EXCLUDED.college_name,
            degree = EXCLUDED.degree,
            branch = EXCLUDED.branch
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.full_name)
    .bind(update.date_of_birth)
    .bind(&update.college_name)
    .bind(&update.degree)
    .bind(&update.branch)
    .fetch_one(pool)
    .await
}

/// All profiles with how many applications each has submitted, newest first.
pub async fn list_profile_summaries(pool: &PgPool) -> Result<Vec<ProfileSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileSummaryRow>(
        r#"
        SELECT p.id, p.full_name, p.college_name, p.degree, p.branch, p.created_at,
               COUNT(a.id) AS application_count
        FROM profiles p
        LEFT JOIN applications a ON a.user_id = p.id
        GROUP BY p.id
        ORDER BY p.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Deletes a profile together with the applications recorded under its id.
/// Nothing is removed when no profile has this id.
pub async fn delete_profile(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    sqlx::query("DELETE FROM applications WHERE user_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{RecentApplicationRow, UserApplicationRow};

/// Default and maximum page sizes for the admin feed.
pub const RECENT_DEFAULT_LIMIT: i64 = 10;
pub const RECENT_MAX_LIMIT: i64 = 100;

/// Records an application. Returns `false` when the pair was already recorded.
pub async fn record_application(
    pool: &PgPool,
    user_id: Uuid,
    internship_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO applications (user_id, internship_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, internship_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(internship_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_user_applications(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<UserApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, UserApplicationRow>(
        r#"
        SELECT a.id, a.internship_id, i.title, i.org_name, i.sector, i.city, i.state,
               i.remote, i.application_url, a.created_at
        FROM applications a
        JOIN internships i ON i.id = a.internship_id
        WHERE a.user_id = $1
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn count_user_applications(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn recent_applications(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<RecentApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, RecentApplicationRow>(
        r#"
        SELECT a.id, a.user_id, p.full_name AS applicant_name, a.internship_id,
               i.title AS internship_title, i.org_name, a.created_at
        FROM applications a
        JOIN internships i ON i.id = a.internship_id
        LEFT JOIN profiles p ON p.id = a.user_id
        ORDER BY a.created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Maps a failed application insert. A foreign-key violation means the
/// internship was deleted after it was looked up, which is reported as 404.
pub fn application_insert_error(err: sqlx::Error, internship_id: Uuid) -> AppError {
    let internship_gone =
        matches!(&err, sqlx::Error::Database(db) if db.is_foreign_key_violation());
    if internship_gone {
        AppError::NotFound(format!("Internship {internship_id} not found"))
    } else {
        AppError::Database(err)
    }
}

/// Clamps a requested feed size into `1..=RECENT_MAX_LIMIT`.
pub fn clamp_recent_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(RECENT_DEFAULT_LIMIT)
        .clamp(1, RECENT_MAX_LIMIT)
}

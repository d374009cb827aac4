//! Catalog persistence — reads and writes against the `internships` table.
//!
//! Recommendation code only sees the narrow `InternshipSource` trait; the admin
//! console uses the free functions below directly against the pool.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::internship::{duplicate_key, Internship, InternshipInput};

/// Read-only access to the postings eligible for recommendation.
///
/// Carried in `AppState` as `Arc<dyn InternshipSource>`.
#[async_trait]
pub trait InternshipSource: Send + Sync {
    async fn fetch_active_internships(&self) -> Result<Vec<Internship>, AppError>;
}

/// `InternshipSource` backed by PostgreSQL.
pub struct PgInternshipSource {
    pool: PgPool,
}

impl PgInternshipSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InternshipSource for PgInternshipSource {
    async fn fetch_active_internships(&self) -> Result<Vec<Internship>, AppError> {
        // Stable order so equal scores rank the same way on every request
        Ok(sqlx::query_as::<_, Internship>(
            "SELECT * FROM internships WHERE active = true ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?)
    }
}

/// Fetches up to `limit` active postings for assistant context.
pub async fn sample_active_internships(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<Internship>, sqlx::Error> {
    sqlx::query_as::<_, Internship>(
        "SELECT * FROM internships WHERE active = true ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Returns every posting, newest first.
pub async fn list_internships(pool: &PgPool) -> Result<Vec<Internship>, sqlx::Error> {
    sqlx::query_as::<_, Internship>("SELECT * FROM internships ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn get_internship(pool: &PgPool, id: Uuid) -> Result<Option<Internship>, sqlx::Error> {
    sqlx::query_as::<_, Internship>("SELECT * FROM internships WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_internship(
    pool: &PgPool,
    input: &InternshipInput,
) -> Result<Internship, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let created = insert_one(&mut tx, input).await?;
    tx.commit().await?;
    info!("Created internship {} ({})", created.id, created.title);
    Ok(created)
}

/// Replaces all writable fields. Returns `None` when no row has this id.
pub async fn update_internship(
    pool: &PgPool,
    id: Uuid,
    input: &InternshipInput,
) -> Result<Option<Internship>, sqlx::Error> {
    sqlx::query_as::<_, Internship>(
        r#"
        UPDATE internships SET
            title = $2, org_name = $3, sector = $4, description = $5,
            city = $6, state = $7, pin = $8, remote = $9, min_education = $10,
            required_skills = $11, stipend_min = $12, stipend_max = $13,
            application_url = $14, deadline = $15, active = $16
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.org_name)
    .bind(&input.sector)
    .bind(&input.description)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.pin)
    .bind(input.remote)
    .bind(&input.min_education)
    .bind(&input.required_skills)
    .bind(input.stipend_min)
    .bind(input.stipend_max)
    .bind(&input.application_url)
    .bind(input.deadline)
    .bind(input.active)
    .fetch_optional(pool)
    .await
}

/// Returns `true` when a row was deleted.
pub async fn delete_internship(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM internships WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Case-insensitive `(title, org_name)` keys of everything already in the catalog.
pub async fn existing_duplicate_keys(pool: &PgPool) -> Result<HashSet<(String, String)>, sqlx::Error> {
    let rows: Vec<(String, String)> = sqlx::query_as("SELECT title, org_name FROM internships")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(title, org)| duplicate_key(&title, &org))
        .collect())
}

/// Inserts a batch atomically: either every posting lands or none does.
pub async fn insert_internships(
    pool: &PgPool,
    inputs: &[InternshipInput],
) -> Result<Vec<Internship>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(inputs.len());
    for input in inputs {
        created.push(insert_one(&mut tx, input).await?);
    }
    tx.commit().await?;
    Ok(created)
}

async fn insert_one(
    tx: &mut Transaction<'_, Postgres>,
    input: &InternshipInput,
) -> Result<Internship, sqlx::Error> {
    sqlx::query_as::<_, Internship>(
        r#"
        INSERT INTO internships
            (title, org_name, sector, description, city, state, pin, remote,
             min_education, required_skills, stipend_min, stipend_max,
             application_url, deadline, active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.org_name)
    .bind(&input.sector)
    .bind(&input.description)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.pin)
    .bind(input.remote)
    .bind(&input.min_education)
    .bind(&input.required_skills)
    .bind(input.stipend_min)
    .bind(input.stipend_max)
    .bind(&input.application_url)
    .bind(input.deadline)
    .bind(input.active)
    .fetch_one(&mut **tx)
    .await
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogOverview {
    pub total_internships: i64,
    pub active_internships: i64,
    pub registered_users: i64,
    pub total_applications: i64,
}

pub async fn catalog_overview(pool: &PgPool) -> Result<CatalogOverview, sqlx::Error> {
    let (total_internships, active_internships, registered_users, total_applications): (
        i64,
        i64,
        i64,
        i64,
    ) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM internships),
            (SELECT COUNT(*) FROM internships WHERE active = true),
            (SELECT COUNT(*) FROM profiles),
            (SELECT COUNT(*) FROM applications)
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(CatalogOverview {
        total_internships,
        active_internships,
        registered_users,
        total_applications,
    })
}

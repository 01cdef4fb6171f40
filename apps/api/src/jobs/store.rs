//! Job Store — PostgreSQL persistence for job postings.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobRow, JobSummaryRow};

/// A validated job posting ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub company: String,
    pub title: String,
    /// Already carries the `Required Keywords:` line when keywords were given.
    pub description: String,
    pub vacancies: i32,
}

pub async fn create_job(pool: &PgPool, job: &NewJob) -> Result<JobRow, AppError> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (id, company, title, description, vacancies)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&job.company)
    .bind(&job.title)
    .bind(&job.description)
    .bind(job.vacancies)
    .fetch_one(pool)
    .await?;

    info!("Created job {} ({} at {})", row.id, row.title, row.company);
    Ok(row)
}

pub async fn get_job(pool: &PgPool, job_id: Uuid) -> Result<JobRow, AppError> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// All jobs, newest first, with their application counts.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobSummaryRow>, AppError> {
    Ok(sqlx::query_as::<_, JobSummaryRow>(
        r#"
        SELECT j.id, j.company, j.title, j.description, j.vacancies, j.created_at,
               COUNT(a.id) AS applicants
        FROM jobs j
        LEFT JOIN applications a ON a.job_id = j.id
        GROUP BY j.id
        ORDER BY j.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?)
}

/// Deletes a job; its applications go with it (ON DELETE CASCADE).
pub async fn delete_job(pool: &PgPool, job_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    info!("Deleted job {job_id}");
    Ok(())
}

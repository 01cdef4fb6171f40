//! Application Store — PostgreSQL persistence for submitted applications.

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::report::MatchReport;
use crate::models::application::ApplicationRow;

pub struct NewApplication<'a> {
    pub job_id: Uuid,
    pub candidate_name: &'a str,
    pub candidate_email: &'a str,
    pub resume_file_name: &'a str,
    pub resume_text: &'a str,
    pub analysis: &'a MatchReport,
}

pub async fn create_application(
    pool: &PgPool,
    application: NewApplication<'_>,
) -> Result<ApplicationRow, AppError> {
    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (id, job_id, candidate_name, candidate_email, resume_file_name, resume_text, analysis)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(application.job_id)
    .bind(application.candidate_name)
    .bind(application.candidate_email)
    .bind(application.resume_file_name)
    .bind(application.resume_text)
    .bind(Json(application.analysis))
    .fetch_one(pool)
    .await?;

    info!(
        "Stored application {} for job {} (score {}, {})",
        row.id, row.job_id, row.analysis.match_score, row.analysis.recommendation
    );
    Ok(row)
}

/// Applications for one job, newest first.
pub async fn list_applications_for_job(
    pool: &PgPool,
    job_id: Uuid,
) -> Result<Vec<ApplicationRow>, AppError> {
    Ok(sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE job_id = $1 ORDER BY submitted_at DESC",
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_application(pool: &PgPool, application_id: Uuid) -> Result<ApplicationRow, AppError> {
    sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
        .bind(application_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))
}

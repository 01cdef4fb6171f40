//! Axum route handlers for the Applications API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::applications::extractor::extract_text;
use crate::applications::store::{
    create_application, get_application, list_applications_for_job, NewApplication,
};
use crate::errors::AppError;
use crate::jobs::store::get_job;
use crate::models::application::ApplicationRow;
use crate::state::AppState;

/// An uploaded resume file as received.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Raw multipart form fields, before validation.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub resume: Option<UploadedResume>,
}

/// A complete, validated submission.
#[derive(Debug)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub resume: UploadedResume,
}

impl SubmissionForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = SubmissionForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        {
            let field_name = field.name().map(str::to_string);
            match field_name.as_deref() {
                Some("name") => form.name = Some(read_text(field).await?),
                Some("email") => form.email = Some(read_text(field).await?),
                Some("resume") => {
                    let file_name = field.file_name().unwrap_or("resume").to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid resume upload: {e}")))?;
                    form.resume = Some(UploadedResume {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                _ => {}
            }
        }

        Ok(form)
    }

    pub fn validate(self) -> Result<Submission, AppError> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        let email = self.email.as_deref().map(str::trim).unwrap_or_default();

        if name.is_empty() || email.is_empty() {
            return Err(AppError::Validation(
                "name and email are required".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(AppError::Validation(format!(
                "'{email}' is not a valid email address"
            )));
        }

        let resume = self
            .resume
            .filter(|r| !r.bytes.is_empty())
            .ok_or_else(|| AppError::Validation("a resume file is required".to_string()))?;

        Ok(Submission {
            name: name.to_string(),
            email: email.to_string(),
            resume,
        })
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form field: {e}")))
}

/// POST /api/v1/jobs/:id/applications
///
/// Multipart form with `name`, `email` and a `resume` file. The resume is
/// turned into text, scored against the job description and stored.
pub async fn handle_submit_application(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let submission = SubmissionForm::from_multipart(multipart).await?.validate()?;
    let job = get_job(&state.db, job_id).await?;

    let resume = submission.resume.clone();
    let resume_text = tokio::task::spawn_blocking(move || {
        extract_text(&resume.file_name, resume.content_type.as_deref(), &resume.bytes)
    })
    .await
    .map_err(|e| {
        AppError::Validation(format!(
            "Could not read resume '{}': {e}",
            submission.resume.file_name
        ))
    })??;

    info!(
        "Scoring application from {} for job {} ({} chars of resume text)",
        submission.email,
        job.id,
        resume_text.len()
    );

    let analysis = state.scorer.score(&resume_text, &job.description, &[]).await;

    let application = create_application(
        &state.db,
        NewApplication {
            job_id: job.id,
            candidate_name: &submission.name,
            candidate_email: &submission.email,
            resume_file_name: &submission.resume.file_name,
            resume_text: &resume_text,
            analysis: &analysis,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/jobs/:id/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    get_job(&state.db, job_id).await?;
    Ok(Json(list_applications_for_job(&state.db, job_id).await?))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<ApplicationRow>, AppError> {
    Ok(Json(get_application(&state.db, application_id).await?))
}

//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::store::list_applications_for_job;
use crate::errors::AppError;
use crate::jobs::description::{draft_description, DraftedDescription, DEFAULT_COMPANY_NAME};
use crate::jobs::results::{build_results, JobResults};
use crate::jobs::store::{create_job, delete_job, get_job, list_jobs, NewJob};
use crate::matching::keywords::append_required_keywords;
use crate::models::job::{JobRow, JobSummaryRow};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_vacancies")]
    pub vacancies: i32,
    #[serde(default)]
    pub keywords: Vec<String>,
}

fn default_vacancies() -> i32 {
    1
}

impl CreateJobRequest {
    /// Checks required fields and folds recruiter keywords into the description.
    pub fn into_new_job(self) -> Result<NewJob, AppError> {
        let company = self.company.trim();
        let title = self.title.trim();
        let description = self.description.trim();

        if company.is_empty() || title.is_empty() || description.is_empty() {
            return Err(AppError::Validation(
                "company, title and description are required".to_string(),
            ));
        }
        if self.vacancies < 1 {
            return Err(AppError::Validation(
                "vacancies must be at least 1".to_string(),
            ));
        }

        let keywords: Vec<String> = self
            .keywords
            .iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        Ok(NewJob {
            company: company.to_string(),
            title: title.to_string(),
            description: append_required_keywords(description, &keywords),
            vacancies: self.vacancies,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct DraftDescriptionRequest {
    #[serde(default)]
    pub role_title: String,
    pub company_name: Option<String>,
    pub recruiter_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let new_job = request.into_new_job()?;
    let job = create_job(&state.db, &new_job).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobSummaryRow>>, AppError> {
    Ok(Json(list_jobs(&state.db).await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    Ok(Json(get_job(&state.db, job_id).await?))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_job(&state.db, job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/jobs/:id/results
///
/// Applications ranked by match score, with pool statistics.
pub async fn handle_job_results(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobResults>, AppError> {
    let job = get_job(&state.db, job_id).await?;
    let applications = list_applications_for_job(&state.db, job_id).await?;
    Ok(Json(build_results(job, applications)))
}

/// POST /api/v1/jobs/generate-description
pub async fn handle_draft_description(
    State(state): State<AppState>,
    Json(request): Json<DraftDescriptionRequest>,
) -> Result<Json<DraftedDescription>, AppError> {
    let role_title = request.role_title.trim();
    if role_title.is_empty() {
        return Err(AppError::Validation("role_title is required".to_string()));
    }

    let company_name = request
        .company_name
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_COMPANY_NAME);

    let draft = draft_description(
        state.llm.as_ref(),
        role_title,
        company_name,
        request.recruiter_name.as_deref(),
    )
    .await;

    Ok(Json(draft))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(keywords: &[&str]) -> CreateJobRequest {
        CreateJobRequest {
            company: " Acme ".to_string(),
            title: "Frontend Engineer".to_string(),
            description: "Build UIs with React.".to_string(),
            vacancies: 2,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_keywords_are_appended_to_description() {
        let job = request(&["TypeScript", " ", " Figma "]).into_new_job().unwrap();
        assert_eq!(job.company, "Acme");
        assert_eq!(
            job.description,
            "Build UIs with React.\n\nRequired Keywords: TypeScript, Figma"
        );
    }

    #[test]
    fn test_no_keywords_leaves_description_untouched() {
        let job = request(&[]).into_new_job().unwrap();
        assert_eq!(job.description, "Build UIs with React.");
        assert_eq!(job.vacancies, 2);
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let mut req = request(&[]);
        req.title = "   ".to_string();
        assert!(matches!(req.into_new_job(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_zero_vacancies_rejected() {
        let mut req = request(&[]);
        req.vacancies = 0;
        assert!(matches!(req.into_new_job(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_vacancies_default_to_one() {
        let req: CreateJobRequest = serde_json::from_str(
            r#"{"company": "Acme", "title": "Recruiter", "description": "Hiring"}"#,
        )
        .unwrap();
        assert_eq!(req.vacancies, 1);
        assert!(req.keywords.is_empty());
    }
}

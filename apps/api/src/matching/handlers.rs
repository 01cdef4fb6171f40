//! Axum route handler for ad-hoc resume analysis.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::matching::report::MatchReport;
use crate::matching::scorer::{analyze_with_llm, score_resume};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Pins one scoring path instead of the configured scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendOverride {
    Keyword,
    Llm,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub backend: Option<BackendOverride>,
}

/// POST /api/v1/analyze
///
/// Scores raw resume text against a job description with the configured scorer.
/// `?backend=keyword` forces the local scorer; `?backend=llm` forces the remote
/// one and reports its failure instead of falling back.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<MatchReport>, AppError> {
    if request.resume_text.trim().is_empty() || request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing required parameters: resumeText and jobDescription".to_string(),
        ));
    }

    let report = match params.backend {
        None => {
            state
                .scorer
                .score(
                    &request.resume_text,
                    &request.job_description,
                    &request.keywords,
                )
                .await
        }
        Some(BackendOverride::Keyword) => score_resume(
            &request.resume_text,
            &request.job_description,
            &request.keywords,
        ),
        Some(BackendOverride::Llm) => {
            let llm = state
                .llm
                .as_ref()
                .ok_or_else(|| AppError::Llm("GEMINI_API_KEY is not configured".to_string()))?;
            analyze_with_llm(llm, &request.resume_text, &request.job_description)
                .await
                .map_err(|e| AppError::Llm(e.to_string()))?
        }
    };

    Ok(Json(report))
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Ad-hoc scoring
        .route("/api/v1/analyze", post(matching::handle_analyze))
        // Jobs
        .route(
            "/api/v1/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/generate-description",
            post(jobs::handle_draft_description),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job).delete(jobs::handle_delete_job),
        )
        .route("/api/v1/jobs/:id/results", get(jobs::handle_job_results))
        // Applications
        .route(
            "/api/v1/jobs/:id/applications",
            post(applications::handle_submit_application)
                .get(applications::handle_list_applications),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::handle_get_application),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::matching::scorer::KeywordMatchScorer;

    // The pool is lazy; none of these requests touch the database.
    fn test_state() -> AppState {
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/recruit_test")
            .unwrap();
        AppState {
            db,
            llm: None,
            scorer: Arc::new(KeywordMatchScorer),
        }
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "recruit-api");
    }

    #[tokio::test]
    async fn test_analyze_scores_with_keyword_scorer() {
        let app = build_router(test_state());
        let request = json_request(
            "/api/v1/analyze",
            serde_json::json!({
                "resumeText": "Senior engineer with python and docker, 6 years",
                "jobDescription": "Backend role using python and docker",
            }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["matchScore"], 100);
        assert_eq!(body["recommendation"], "Shortlist for Next Round");
        assert_eq!(body["scorerBackend"], "keyword");
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_resume() {
        let app = build_router(test_state());
        let request = json_request(
            "/api/v1/analyze",
            serde_json::json!({ "resumeText": "  ", "jobDescription": "python" }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(
            body["error"]["message"],
            "Missing required parameters: resumeText and jobDescription"
        );
    }

    #[tokio::test]
    async fn test_analyze_llm_override_without_key_is_bad_gateway() {
        let app = build_router(test_state());
        let request = json_request(
            "/api/v1/analyze?backend=llm",
            serde_json::json!({ "resumeText": "python", "jobDescription": "python" }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_draft_description_falls_back_to_template() {
        let app = build_router(test_state());
        let request = json_request(
            "/api/v1/jobs/generate-description",
            serde_json::json!({ "role_title": "Data Engineer" }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::LlmClient;
use crate::matching::scorer::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// `None` when no Gemini key is configured.
    pub llm: Option<LlmClient>,
    /// Pluggable resume scorer. `LlmMatchScorer` when an LLM is configured,
    /// otherwise `KeywordMatchScorer`.
    pub scorer: Arc<dyn MatchScorer>,
}

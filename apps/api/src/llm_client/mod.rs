//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! Callers that can degrade (resume scoring, JD generation) must treat every
//! `LlmError` as recoverable and fall back to their local path.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Model used for resume analysis.
pub const ANALYSIS_MODEL: &str = "gemini-1.5-pro";
/// Cheaper model used for job description drafts.
pub const DRAFTING_MODEL: &str = "gemini-1.5-flash";
const MAX_OUTPUT_TOKENS: u32 = 1024;
const MAX_ATTEMPTS: u32 = 2;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM call timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("reply does not match the expected schema: {0}")]
    Schema(String),

    #[error("no JSON object found in LLM reply")]
    MissingJson,

    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling settings for one call.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
pub struct ReplyPart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl LlmResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.iter().find_map(|p| p.text.as_deref()))
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single LLM client shared by all services.
/// Wraps `generateContent` with a hard timeout, retry on 429/5xx and JSON helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, GEMINI_API_BASE.to_string(), timeout)
    }

    /// Points the client at another `generateContent`-compatible host.
    pub(crate) fn with_base_url(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
            timeout,
        })
    }

    /// Sends one user prompt and returns the full response object.
    /// The whole exchange, retries included, is bounded by the configured timeout.
    pub async fn call(
        &self,
        model: &str,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<LlmResponse, LlmError> {
        tokio::time::timeout(self.timeout, self.call_with_retry(model, prompt, config))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))?
    }

    async fn call_with_retry(
        &self,
        model: &str,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: config,
        };
        let url = format!("{}/{model}:generateContent", self.base_url);

        let mut attempt = 1;
        loop {
            let error = match self.send_once(&url, &request_body).await {
                Ok(response) => {
                    if let Some(usage) = &response.usage_metadata {
                        debug!(
                            "LLM call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                            model, usage.prompt_token_count, usage.candidates_token_count
                        );
                    }
                    return Ok(response);
                }
                Err(e) => e,
            };

            if !is_retryable(&error) {
                return Err(error);
            }
            if attempt == MAX_ATTEMPTS {
                return Err(match error {
                    LlmError::Api { status: 429, .. } => LlmError::RateLimited { attempts: attempt },
                    other => other,
                });
            }

            // Exponential backoff: 500ms, 1s, ...
            let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
            warn!(
                "LLM call attempt {} failed ({}), retrying after {}ms...",
                attempt,
                error,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn send_once(
        &self,
        url: &str,
        request_body: &GeminiRequest<'_>,
    ) -> Result<LlmResponse, LlmError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Calls the model and deserializes the JSON object embedded in its reply.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        model: &str,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<T, LlmError> {
        let response = self.call(model, prompt, config).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        parse_json_reply(text)
    }
}

/// Transport failures, 429 and 5xx are worth another attempt.
fn is_retryable(error: &LlmError) -> bool {
    match error {
        LlmError::Http(e) => !e.is_decode(),
        LlmError::Api { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

/// Deserializes the outermost JSON object found in free model text.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let json = extract_json_object(text).ok_or(LlmError::MissingJson)?;
    serde_json::from_str(json).map_err(LlmError::Parse)
}

/// Returns the span from the first `{` to the last `}`, after dropping code fences.
fn extract_json_object(text: &str) -> Option<&str> {
    let text = strip_json_fences(text);
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

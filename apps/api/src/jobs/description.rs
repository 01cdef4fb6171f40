//! Job Description Generator — drafts a JD from a role title.
//!
//! Uses the LLM when one is configured and falls back to a fixed template on
//! any failure, so recruiters always get a usable draft.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::prompts::{render_prompt, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{GenerationConfig, LlmClient, LlmError, DRAFTING_MODEL};
use crate::jobs::prompts::{JD_DRAFT_PROMPT_TEMPLATE, JD_DRAFT_TEMPERATURE};

pub const DEFAULT_COMPANY_NAME: &str = "Your Company";

const TEMPLATE_SKILLS: [&str; 4] = [
    "Communication",
    "Teamwork",
    "Problem Solving",
    "Project Management",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftSource {
    Llm,
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftedDescription {
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub source: DraftSource,
}

#[derive(Debug, Deserialize)]
struct DraftReply {
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    skills: Vec<String>,
}

/// Drafts a job description. Never fails: without an LLM, or when the LLM
/// errors or replies without a description, the template is returned.
pub async fn draft_description(
    llm: Option<&LlmClient>,
    role_title: &str,
    company_name: &str,
    recruiter_name: Option<&str>,
) -> DraftedDescription {
    let Some(llm) = llm else {
        return template_description(role_title, company_name);
    };

    match draft_with_llm(llm, role_title, company_name, recruiter_name).await {
        Ok(draft) => draft,
        Err(e) => {
            warn!("JD draft via LLM failed, using template: {e}");
            template_description(role_title, company_name)
        }
    }
}

async fn draft_with_llm(
    llm: &LlmClient,
    role_title: &str,
    company_name: &str,
    recruiter_name: Option<&str>,
) -> Result<DraftedDescription, LlmError> {
    let prompt = draft_prompt(role_title, company_name, recruiter_name);

    let reply: DraftReply = llm
        .call_json(
            DRAFTING_MODEL,
            &prompt,
            GenerationConfig::with_temperature(JD_DRAFT_TEMPERATURE),
        )
        .await?;

    draft_from_reply(reply, role_title)
}

fn draft_prompt(role_title: &str, company_name: &str, recruiter_name: Option<&str>) -> String {
    render_prompt(
        JD_DRAFT_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("recruiter_name", recruiter_name.unwrap_or("Recruiter")),
            ("company_name", company_name),
            ("role_title", role_title),
        ],
    )
}

fn draft_from_reply(reply: DraftReply, role_title: &str) -> Result<DraftedDescription, LlmError> {
    let description = reply
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| LlmError::Schema("description is missing".to_string()))?;

    Ok(DraftedDescription {
        title: reply
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| role_title.to_string()),
        description,
        skills: reply
            .skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        source: DraftSource::Llm,
    })
}

/// The fixed fallback JD.
pub fn template_description(role_title: &str, company_name: &str) -> DraftedDescription {
    let description = format!(
        "## {role_title}\n\n\
         **Company:** {company_name}\n\
         **Employment Type:** Full-Time\n\
         **Location:** Remote/Hybrid\n\n\
         ### Job Summary\n\
         We are hiring a {role_title} to join our team at {company_name}.\n\n\
         ### Key Responsibilities\n\
         • Drive impact in the role\n\
         • Collaborate cross-functionally\n\
         • Uphold high quality standards\n\n\
         ### Required Skills & Qualifications\n\
         • Communication\n\
         • Problem solving\n\
         • Team collaboration\n\n\
         ### What We Offer\n\
         • Competitive compensation\n\
         • Growth and learning opportunities\n\n\
         *Equal Opportunity Employer*"
    );

    DraftedDescription {
        title: role_title.to_string(),
        description,
        skills: TEMPLATE_SKILLS.iter().map(|s| s.to_string()).collect(),
        source: DraftSource::Template,
    }
}

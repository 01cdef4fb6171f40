//! MatchReport — the structured result of scoring one resume against one job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::llm_client::LlmError;

pub const MAX_MATCHED_SKILLS: usize = 5;
pub const MAX_MISSING_SKILLS: usize = 3;

/// Hiring recommendation derived from the match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Shortlist for Next Round")]
    ShortlistForNextRound,
    #[serde(rename = "Consider with Caution")]
    ConsiderWithCaution,
    #[serde(rename = "Reject")]
    Reject,
}

impl Recommendation {
    /// ≥75 shortlist, 50–74 consider, below 50 reject.
    pub fn from_score(score: u8) -> Self {
        match score {
            75.. => Recommendation::ShortlistForNextRound,
            50..=74 => Recommendation::ConsiderWithCaution,
            _ => Recommendation::Reject,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Recommendation::ShortlistForNextRound => "Shortlist for Next Round",
            Recommendation::ConsiderWithCaution => "Consider with Caution",
            Recommendation::Reject => "Reject",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Recommendation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        [
            Recommendation::ShortlistForNextRound,
            Recommendation::ConsiderWithCaution,
            Recommendation::Reject,
        ]
        .into_iter()
        .find(|r| r.label().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| format!("unknown recommendation '{wanted}'"))
    }
}

/// Which path produced a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerBackend {
    #[default]
    Keyword,
    Llm,
}

/// Full match report. Field names follow the camelCase JSON stored per application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub match_score: u8, // 0 – 100
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub summary: String,
    pub recommendation: Recommendation,
    #[serde(default)]
    pub scorer_backend: ScorerBackend,
}

/// The reply shape the analysis prompt asks the model for. Everything optional
/// so that schema problems surface as validation messages rather than serde noise.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmReportReply {
    pub match_score: Option<serde_json::Value>,
    #[serde(default)]
    pub matched_skills: Vec<serde_json::Value>,
    #[serde(default)]
    pub missing_skills: Vec<serde_json::Value>,
    pub summary: Option<String>,
    pub recommendation: Option<String>,
}

impl TryFrom<LlmReportReply> for MatchReport {
    type Error = LlmError;

    /// Validates and normalises a model reply: score clamped to [0, 100], skill
    /// lists trimmed and capped, and missing skills never repeating a matched one.
    fn try_from(reply: LlmReportReply) -> Result<Self, Self::Error> {
        let score = reply
            .match_score
            .as_ref()
            .and_then(|v| v.as_f64())
            .filter(|s| s.is_finite())
            .ok_or_else(|| LlmError::Schema("matchScore must be a number".to_string()))?;

        let summary = reply
            .summary
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LlmError::Schema("summary is missing".to_string()))?;

        let recommendation = reply
            .recommendation
            .as_deref()
            .ok_or_else(|| LlmError::Schema("recommendation is missing".to_string()))?
            .parse::<Recommendation>()
            .map_err(LlmError::Schema)?;

        let matched_skills = normalize_skills(&reply.matched_skills, &[], MAX_MATCHED_SKILLS);
        let missing_skills =
            normalize_skills(&reply.missing_skills, &matched_skills, MAX_MISSING_SKILLS);

        Ok(MatchReport {
            match_score: score.clamp(0.0, 100.0).round() as u8,
            matched_skills,
            missing_skills,
            summary,
            recommendation,
            scorer_backend: ScorerBackend::Llm,
        })
    }
}

fn normalize_skills(raw: &[serde_json::Value], exclude: &[String], limit: usize) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for value in raw {
        let skill = match value {
            serde_json::Value::String(s) => s.trim().to_string(),
            serde_json::Value::Null => continue,
            other => other.to_string(),
        };
        if skill.is_empty() {
            continue;
        }
        let taken = |s: &String| s.eq_ignore_ascii_case(&skill);
        if skills.iter().any(taken) || exclude.iter().any(taken) {
            continue;
        }
        skills.push(skill);
        if skills.len() == limit {
            break;
        }
    }
    skills
}

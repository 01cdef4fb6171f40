//! Resume Match Scorer — pluggable, trait-based scoring of a resume against a job.
//!
//! Default: `KeywordMatchScorer` (pure, deterministic, never fails).
//! With an API key configured: `LlmMatchScorer`, which asks Gemini first and
//! falls back to the keyword scorer on any remote failure.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, chosen at startup from config.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::llm_client::prompts::{render_prompt, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{GenerationConfig, LlmClient, LlmError, ANALYSIS_MODEL};
use crate::matching::keywords::{extract_keywords, title_case};
use crate::matching::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_TEMPERATURE};
use crate::matching::report::{
    LlmReportReply, MatchReport, Recommendation, ScorerBackend, MAX_MATCHED_SKILLS,
    MAX_MISSING_SKILLS,
};
use crate::matching::vocabulary::{self, RoleProfile};

const TECHNICAL_MISMATCH_PENALTY: i32 = 35;
const NON_TECHNICAL_MISMATCH_PENALTY: i32 = 25;
const SENIORITY_BONUS: i32 = 5;
const EXPERIENCE_BONUS: i32 = 3;

const SENIORITY_MARKERS: [&str; 3] = ["senior", "lead", "manager"];

/// "5 years", "5+ years", "6 yrs", "7 year" — but not "15 years".
static EXPERIENCE_YEARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[5-7]\s*\+?\s*(?:years?|yrs?)\b").expect("experience pattern is valid")
});

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer trait. Implement this to swap backends without touching
/// handlers. Scoring always yields a report; backends recover internally.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
        keywords: &[String],
    ) -> MatchReport;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer — local fallback analyzer
// ────────────────────────────────────────────────────────────────────────────

pub struct KeywordMatchScorer;

#[async_trait]
impl MatchScorer for KeywordMatchScorer {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
        keywords: &[String],
    ) -> MatchReport {
        score_resume(resume_text, job_description, keywords)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmMatchScorer — remote analysis with local fallback
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmMatchScorer(pub LlmClient);

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
        keywords: &[String],
    ) -> MatchReport {
        match analyze_with_llm(&self.0, resume_text, job_description).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Remote resume analysis unavailable, using keyword scorer: {e}");
                score_resume(resume_text, job_description, keywords)
            }
        }
    }
}

/// Asks the model for a report and validates the reply against the schema.
/// Recruiter keywords are not injected; the description already carries them.
pub async fn analyze_with_llm(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
) -> Result<MatchReport, LlmError> {
    let prompt = analysis_prompt(resume_text, job_description);

    let reply: LlmReportReply = llm
        .call_json(
            ANALYSIS_MODEL,
            &prompt,
            GenerationConfig::with_temperature(ANALYSIS_TEMPERATURE),
        )
        .await?;

    MatchReport::try_from(reply)
}

fn analysis_prompt(resume_text: &str, job_description: &str) -> String {
    render_prompt(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("job_description", job_description),
            ("resume_text", resume_text),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Core keyword scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Intermediate numbers behind a report, kept for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub base_score: i32,
    pub role_penalty: i32,
    pub experience_bonus: i32,
    pub final_score: u8,
}

struct KeywordAnalysis {
    required: Vec<String>,
    found: Vec<String>,
    missing: Vec<String>,
    role_mismatch: bool,
    breakdown: ScoreBreakdown,
}

/// Scores a resume against a job description. Pure and infallible.
///
/// `keywords` overrides extraction from the description when non-empty.
pub fn score_resume(resume_text: &str, job_description: &str, keywords: &[String]) -> MatchReport {
    let analysis = analyze(resume_text, job_description, keywords);
    let score = analysis.breakdown.final_score;

    debug!(
        "Keyword score: required={}, found={}, breakdown={:?}",
        analysis.required.len(),
        analysis.found.len(),
        analysis.breakdown
    );

    MatchReport {
        match_score: score,
        matched_skills: analysis
            .found
            .iter()
            .take(MAX_MATCHED_SKILLS)
            .map(|k| title_case(k))
            .collect(),
        missing_skills: analysis
            .missing
            .iter()
            .take(MAX_MISSING_SKILLS)
            .map(|k| title_case(k))
            .collect(),
        summary: build_summary(&analysis),
        recommendation: Recommendation::from_score(score),
        scorer_backend: ScorerBackend::Keyword,
    }
}

fn analyze(resume_text: &str, job_description: &str, keywords: &[String]) -> KeywordAnalysis {
    let resume_lower = resume_text.to_lowercase();

    // K: what the job requires.
    let source = if keywords.iter().any(|k| !k.trim().is_empty()) {
        keywords.to_vec()
    } else {
        extract_keywords(job_description)
    };
    let required = normalize_keywords(&source);

    let (found, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|k| resume_lower.contains(k.as_str()));

    // R: what the candidate shows, measured against the fixed vocabulary.
    let resume_hits = vocabulary::terms_in(&resume_lower);
    let relevant_hits = resume_hits
        .iter()
        .filter(|(_, term)| required.iter().any(|k| k == term))
        .count();

    let recall = ratio(found.len(), required.len()).unwrap_or(0.0);
    let precision = ratio(relevant_hits, resume_hits.len())
        .unwrap_or(if required.is_empty() { 1.0 } else { 0.0 });
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    let base_score = (f1 * 100.0).round() as i32;

    let job_profile = RoleProfile::classify(job_description);
    let resume_profile = RoleProfile::from_hits(&resume_hits);

    let technical_mismatch = job_profile.technical && !resume_profile.technical;
    let non_technical_mismatch = job_profile.hr_or_marketing
        && resume_profile.technical
        && !resume_profile.hr_or_marketing;

    let mut score = base_score;
    if technical_mismatch {
        score = (score - TECHNICAL_MISMATCH_PENALTY).max(0);
    }
    if non_technical_mismatch {
        score = (score - NON_TECHNICAL_MISMATCH_PENALTY).max(0);
    }
    let role_penalty = base_score - score;

    let mut experience_bonus = 0;
    if SENIORITY_MARKERS.iter().any(|m| resume_lower.contains(m)) {
        experience_bonus += SENIORITY_BONUS;
    }
    if EXPERIENCE_YEARS.is_match(resume_text) {
        experience_bonus += EXPERIENCE_BONUS;
    }

    let final_score = (score + experience_bonus).clamp(0, 100) as u8;

    KeywordAnalysis {
        required,
        found,
        missing,
        role_mismatch: technical_mismatch || non_technical_mismatch,
        breakdown: ScoreBreakdown {
            precision,
            recall,
            f1,
            base_score,
            role_penalty,
            experience_bonus,
            final_score,
        },
    }
}

/// Trimmed, lower-cased, first occurrence wins, blanks dropped.
fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for keyword in keywords {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && !normalized.contains(&keyword) {
            normalized.push(keyword);
        }
    }
    normalized
}

fn ratio(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64)
}

fn percent(value: f64) -> u32 {
    (value * 100.0).round() as u32
}

fn build_summary(analysis: &KeywordAnalysis) -> String {
    let b = &analysis.breakdown;
    let tier = match b.final_score {
        70.. => "Strong",
        50..=69 => "Moderate",
        _ => "Weak",
    };

    let mut summary = if analysis.required.is_empty() {
        format!(
            "{tier} match ({}%). No recognised skill requirements were found in the job description.",
            b.final_score
        )
    } else {
        format!(
            "{tier} match ({}%): the resume covers {} of {} required skills (precision {}%, recall {}%, F1 {}%).",
            b.final_score,
            analysis.found.len(),
            analysis.required.len(),
            percent(b.precision),
            percent(b.recall),
            percent(b.f1),
        )
    };

    if analysis.role_mismatch {
        summary.push_str(" The candidate's background points to a different role family than this job.");
    }
    if b.experience_bonus > 0 {
        summary.push_str(" Seniority or relevant years of experience add to the score.");
    }
    summary
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;

    use super::*;
    use crate::llm_client::stub;

    #[tokio::test]
    async fn test_llm_scorer_falls_back_on_timeout() {
        let (llm, _listener) = stub::silent_client(Duration::from_millis(50)).await;
        let resume = "Senior React developer, 6 years";
        let job = "React and TypeScript frontend role";

        let report = LlmMatchScorer(llm).score(resume, job, &[]).await;
        assert_eq!(report.scorer_backend, ScorerBackend::Keyword);
        assert_eq!(report, score_resume(resume, job, &[]));
    }

    #[tokio::test]
    async fn test_llm_scorer_falls_back_on_server_error() {
        let llm = stub::failing_client(StatusCode::INTERNAL_SERVER_ERROR, Duration::from_secs(5)).await;
        let resume = "Python and Docker engineer";
        let job = "Python backend role";
        let explicit = keywords(&["python", "kubernetes"]);

        let report = LlmMatchScorer(llm).score(resume, job, &explicit).await;
        assert_eq!(report.scorer_backend, ScorerBackend::Keyword);
        assert_eq!(report, score_resume(resume, job, &explicit));
    }

    #[tokio::test]
    async fn test_analyze_with_llm_surfaces_server_error() {
        let llm = stub::failing_client(StatusCode::INTERNAL_SERVER_ERROR, Duration::from_secs(5)).await;
        let err = analyze_with_llm(&llm, "python", "python").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 500, .. }), "got {err:?}");
    }

    #[test]
    fn test_analysis_prompt_does_not_expand_placeholders_in_resume() {
        let prompt = analysis_prompt("Rust dev {job_description}", "Backend role");
        assert!(prompt.contains("Rust dev {job_description}"));
        assert_eq!(prompt.matches("Backend role").count(), 1);
        assert!(prompt.contains(JSON_ONLY_INSTRUCTION));
    }

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_react_node_developer_is_shortlisted() {
        let resume = "Experienced React and Node.js developer, 5 years experience";
        let job = "Looking for React and Node.js engineer";

        let analysis = analyze(resume, job, &[]);
        assert_eq!(analysis.required, vec!["react", "node.js"]);
        assert_eq!(analysis.breakdown.recall, 1.0);
        assert_eq!(analysis.breakdown.experience_bonus, 3);

        let report = score_resume(resume, job, &[]);
        assert_eq!(report.match_score, 100);
        assert_eq!(report.matched_skills, vec!["React", "Node.js"]);
        assert!(report.missing_skills.is_empty());
        assert_eq!(report.recommendation, Recommendation::ShortlistForNextRound);
        assert_eq!(report.scorer_backend, ScorerBackend::Keyword);
    }

    #[test]
    fn test_hr_resume_for_engineering_job_is_penalised() {
        let resume = "HR generalist with recruitment and hiring experience";
        let job = "Senior Software Engineer needing JavaScript and Python";

        let analysis = analyze(resume, job, &[]);
        assert_eq!(analysis.breakdown.recall, 0.0);
        assert_eq!(analysis.breakdown.precision, 0.0);
        assert!(analysis.role_mismatch);

        let report = score_resume(resume, job, &[]);
        assert_eq!(report.match_score, 0);
        assert_eq!(report.recommendation, Recommendation::Reject);
        assert!(report.summary.contains("different role family"));
    }

    #[test]
    fn test_resume_without_vocabulary_hits_has_zero_precision() {
        let resume = "Office manager, scheduling, vendor coordination";
        let job = "Engineering office coordinator, familiar with Jira";
        let analysis = analyze(resume, job, &keywords(&["scheduling", "vendor coordination"]));

        assert_eq!(analysis.breakdown.recall, 1.0);
        assert_eq!(analysis.breakdown.precision, 0.0);
        assert_eq!(analysis.breakdown.base_score, 0);
        assert!(analysis.role_mismatch);
    }

    #[test]
    fn test_resume_with_technical_evidence_escapes_penalty() {
        let covered = analyze(
            "Office manager, scheduling, vendor coordination, some Jira",
            "Engineering office coordinator, familiar with Jira",
            &keywords(&["scheduling", "jira"]),
        );
        assert_eq!(covered.breakdown.base_score, 100);
        assert_eq!(covered.breakdown.role_penalty, 0);
        assert!(!covered.role_mismatch);
    }

    #[test]
    fn test_technical_penalty_applies_to_nonzero_base() {
        let resume = "Social media coordinator. Scheduling and reporting.";
        let job = "Analyst with SQL and social media skills";
        let analysis = analyze(resume, job, &[]);

        // K = {sql, social media}; found = {social media}; R = {social media}
        assert_eq!(analysis.breakdown.recall, 0.5);
        assert_eq!(analysis.breakdown.precision, 1.0);
        assert_eq!(analysis.breakdown.base_score, 67);
        assert_eq!(analysis.breakdown.role_penalty, 35);
        assert_eq!(analysis.breakdown.final_score, 32);
    }

    #[test]
    fn test_non_technical_penalty_is_25_points() {
        let resume = "Python developer who built our SEO tooling";
        let job = "SEO specialist";
        let no_overlap = analyze("Python and Docker engineer", job, &[]);
        assert_eq!(no_overlap.breakdown.base_score, 0);

        // Resume has HR/Marketing evidence ("seo"), so no penalty.
        let analysis = analyze(resume, job, &[]);
        assert_eq!(analysis.breakdown.role_penalty, 0);

        // Explicit K gives a non-zero base that the penalty can bite into.
        let tech_only = analyze(
            "Python and Docker engineer",
            "Marketing lead for our email marketing program (python a plus)",
            &[],
        );
        // K = {python, email marketing}; found = {python}; R = {python, docker}
        assert_eq!(tech_only.breakdown.recall, 0.5);
        assert_eq!(tech_only.breakdown.precision, 0.5);
        assert_eq!(tech_only.breakdown.base_score, 50);
        // Job is both technical and marketing; resume is technical only.
        assert_eq!(tech_only.breakdown.role_penalty, 25);
        assert_eq!(tech_only.breakdown.final_score, 25);
    }

    #[test]
    fn test_penalty_floors_at_zero() {
        let analysis = analyze("Payroll and onboarding specialist", "Golang backend engineer", &[]);
        assert_eq!(analysis.breakdown.base_score, 0);
        assert_eq!(analysis.breakdown.role_penalty, 0);
        assert_eq!(analysis.breakdown.final_score, 0);
    }

    #[test]
    fn test_job_without_recognised_keywords() {
        let job = "We need a friendly person to greet visitors";

        let with_skills = analyze("Python developer with Docker", job, &[]);
        assert!(with_skills.required.is_empty());
        assert_eq!(with_skills.breakdown.recall, 0.0);
        assert_eq!(with_skills.breakdown.precision, 0.0);
        assert_eq!(with_skills.breakdown.final_score, 0);

        let bonuses_only = analyze("Senior front desk manager", job, &[]);
        assert_eq!(bonuses_only.breakdown.precision, 1.0);
        assert_eq!(bonuses_only.breakdown.f1, 0.0);
        assert_eq!(bonuses_only.breakdown.final_score, 5);

        let report = score_resume("Senior front desk manager", job, &[]);
        assert!(report.matched_skills.is_empty());
        assert!(report.missing_skills.is_empty());
        assert!(report.summary.contains("No recognised skill requirements"));
    }

    #[test]
    fn test_required_keywords_marker_outside_vocabulary() {
        let job = "Need skills. Required Keywords: Figma, Notion, Airtable";
        let analysis = analyze("Designer fluent in Figma and Notion", job, &[]);
        assert_eq!(analysis.required, vec!["figma", "notion", "airtable"]);
        assert_eq!(analysis.found, vec!["figma", "notion"]);
        assert_eq!(analysis.missing, vec!["airtable"]);

        let report = score_resume("Designer fluent in Figma and Notion", job, &[]);
        assert_eq!(report.matched_skills, vec!["Figma", "Notion"]);
        assert_eq!(report.missing_skills, vec!["Airtable"]);
    }

    #[test]
    fn test_explicit_keywords_override_extraction() {
        let analysis = analyze(
            "Kotlin developer",
            "Java developer",
            &keywords(&[" Kotlin ", "KOTLIN", ""]),
        );
        assert_eq!(analysis.required, vec!["kotlin"]);
        assert_eq!(analysis.breakdown.recall, 1.0);
    }

    #[test]
    fn test_blank_explicit_keywords_fall_back_to_extraction() {
        let analysis = analyze("Kotlin developer", "Java developer", &keywords(&["  "]));
        assert_eq!(analysis.required, vec!["java"]);
    }

    #[test]
    fn test_full_coverage_gives_full_recall() {
        let cases = [
            ("Docker and Kubernetes on AWS", "Platform role: docker, kubernetes, aws"),
            ("I know PYTHON and sql", "Python / SQL analyst"),
            ("figma", "Required Keywords: Figma"),
        ];
        for (resume, job) in cases {
            let analysis = analyze(resume, job, &[]);
            assert!(!analysis.required.is_empty());
            assert_eq!(analysis.breakdown.recall, 1.0, "resume {resume:?} job {job:?}");
        }
    }

    #[test]
    fn test_skill_lists_are_capped_and_disjoint() {
        let job = "Required Keywords: a1, a2, a3, a4, a5, a6, a7, b1, b2, b3, b4";
        let resume = "a1 a2 a3 a4 a5 a6 a7";
        let report = score_resume(resume, job, &[]);

        assert_eq!(report.matched_skills, vec!["A1", "A2", "A3", "A4", "A5"]);
        assert_eq!(report.missing_skills, vec!["B1", "B2", "B3"]);
        assert!(report
            .matched_skills
            .iter()
            .all(|m| !report.missing_skills.contains(m)));
    }

    #[test]
    fn test_empty_inputs_do_not_panic() {
        let report = score_resume("", "", &[]);
        assert_eq!(report.match_score, 0);
        assert_eq!(report.recommendation, Recommendation::Reject);

        let analysis = analyze("", "Rust-free Python shop", &[]);
        assert_eq!(analysis.breakdown.precision, 0.0);
    }

    #[test]
    fn test_score_is_bounded_and_idempotent() {
        let inputs = [
            ("Senior lead manager, 7+ years, React Node.js", "React Node.js"),
            ("", "Java"),
            ("Payroll", "Payroll"),
            ("Marketing lead, 6 yrs, SEO, CRM, HubSpot", "SEO CRM HubSpot Salesforce"),
        ];
        for (resume, job) in inputs {
            let first = score_resume(resume, job, &[]);
            let second = score_resume(resume, job, &[]);
            assert!(first.match_score <= 100);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_experience_pattern() {
        assert!(EXPERIENCE_YEARS.is_match("5 years of Java"));
        assert!(EXPERIENCE_YEARS.is_match("5+ years"));
        assert!(EXPERIENCE_YEARS.is_match("6 Years"));
        assert!(EXPERIENCE_YEARS.is_match("7 yrs"));
        assert!(!EXPERIENCE_YEARS.is_match("15 years"));
        assert!(!EXPERIENCE_YEARS.is_match("4 years"));
        assert!(!EXPERIENCE_YEARS.is_match("8 years"));
    }

    #[test]
    fn test_seniority_bonus_uses_substring() {
        let analysis = analyze("Team leadership in payroll", "Payroll specialist", &[]);
        // "leadership" contains "lead"
        assert_eq!(analysis.breakdown.experience_bonus, 5);
    }

    #[test]
    fn test_summary_reports_percentages() {
        let report = score_resume("Python developer", "Python and SQL engineer", &[]);
        // K = {python, sql}; found = {python}; R = {python}
        assert!(report.summary.contains("1 of 2 required skills"));
        assert!(report.summary.contains("precision 100%"));
        assert!(report.summary.contains("recall 50%"));
        assert!(report.summary.contains("F1 67%"));
        assert_eq!(report.missing_skills, vec!["Sql"]);
    }

    #[tokio::test]
    async fn test_keyword_scorer_trait_matches_function() {
        let scorer = KeywordMatchScorer;
        let via_trait = scorer.score("Python developer", "Python engineer", &[]).await;
        assert_eq!(via_trait, score_resume("Python developer", "Python engineer", &[]));
    }
}

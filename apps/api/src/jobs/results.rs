//! Results aggregation — ranks a job's applications and summarises the pool.

use serde::Serialize;

use crate::matching::report::Recommendation;
use crate::models::application::ApplicationRow;
use crate::models::job::JobRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsStats {
    pub total_applications: usize,
    /// Rounded mean score; `None` when nobody has applied yet.
    pub average_score: Option<u8>,
    pub shortlisted_count: usize,
    pub considered_count: usize,
    pub rejected_count: usize,
}

#[derive(Debug, Serialize)]
pub struct JobResults {
    pub job: JobRow,
    pub stats: ResultsStats,
    /// Highest score first; equal scores earliest submission first.
    pub applications: Vec<ApplicationRow>,
}

pub fn build_results(job: JobRow, mut applications: Vec<ApplicationRow>) -> JobResults {
    applications.sort_by(|a, b| {
        b.analysis
            .match_score
            .cmp(&a.analysis.match_score)
            .then_with(|| a.submitted_at.cmp(&b.submitted_at))
    });
    let stats = compute_stats(&applications);
    JobResults {
        job,
        stats,
        applications,
    }
}

pub fn compute_stats(applications: &[ApplicationRow]) -> ResultsStats {
    let count = |wanted: Recommendation| {
        applications
            .iter()
            .filter(|a| a.analysis.recommendation == wanted)
            .count()
    };

    let average_score = (!applications.is_empty()).then(|| {
        let total: u32 = applications
            .iter()
            .map(|a| u32::from(a.analysis.match_score))
            .sum();
        (total as f64 / applications.len() as f64).round() as u8
    });

    ResultsStats {
        total_applications: applications.len(),
        average_score,
        shortlisted_count: count(Recommendation::ShortlistForNextRound),
        considered_count: count(Recommendation::ConsiderWithCaution),
        rejected_count: count(Recommendation::Reject),
    }
}

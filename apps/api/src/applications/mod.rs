// Candidate applications: resume text extraction, persistence and the
// submission endpoint that scores each resume against its job.

pub mod extractor;
pub mod handlers;
pub mod store;

// Job postings: persistence, HTTP handlers, AI-drafted descriptions and
// per-job results aggregation.

pub mod description;
pub mod handlers;
pub mod prompts;
pub mod results;
pub mod store;

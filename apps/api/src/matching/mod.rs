// Resume matching: vocabulary, keyword extraction, deterministic scoring and
// the LLM-backed scorer that falls back to it.

pub mod handlers;
pub mod keywords;
pub mod prompts;
pub mod report;
pub mod scorer;
pub mod vocabulary;

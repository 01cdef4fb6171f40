// Shared prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs alongside it; only cross-cutting instructions live here.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Appended to every prompt whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Return ONLY a valid JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Fills `{name}` placeholders in one pass. Substituted text is never rescanned,
/// so user input containing `{resume_text}` stays literal. Unknown names are kept.
pub fn render_prompt(template: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            vars.iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

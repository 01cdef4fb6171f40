/// Job description drafting prompt. Placeholders: `{role_title}`, `{company_name}`,
/// `{recruiter_name}`, `{json_only}`.
pub const JD_DRAFT_PROMPT_TEMPLATE: &str = r#"You are an expert HR recruiter. Generate a polished, inclusive Job Description for the given role.

Role title: {role_title}
Company: {company_name}
Requested by: {recruiter_name}

Use the company name. Keep it professional and specific to the role.

{json_only}
Use exactly this shape:
{
  "title": "normalized, human-friendly title",
  "description": "full Markdown JD with sections (Summary, Responsibilities, Skills, Benefits)",
  "skills": ["8-15 concise skill keywords"]
}"#;

pub const JD_DRAFT_TEMPERATURE: f32 = 0.6;

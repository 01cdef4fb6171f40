/// Resume analysis prompt. Placeholders: `{resume_text}`, `{job_description}`, `{json_only}`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an intelligent HR assistant trained to evaluate job applications.

Compare the following candidate's resume with the given job description and provide a detailed analysis.

Resume:
{resume_text}

Job Description:
{job_description}

IMPORTANT: Base all matchedSkills and missingSkills strictly on the job description above; do not invent or use any external or generic keyword lists.

ANALYSIS INSTRUCTIONS:
1. Extract the relevant skills, technologies, and qualifications from the job description.
2. Extract the candidate's skills, technologies, and qualifications from the resume.
3. Identify which JD skills match the resume (matchedSkills) and which JD skills are not present in the resume (missingSkills). Return only JD-derived skills in both lists.
4. Calculate a realistic matchScore (0-100) driven by overlap between JD-required skills and resume evidence. Zero is valid.

ROLE CONTEXT ANALYSIS:
- If this is an HR/Marketing/Non-technical role, technical skills should not be considered matches unless explicitly required by the JD.
- If this is a technical role, HR/Marketing skills should not be considered matches unless explicitly required by the JD.

{json_only}
Use exactly this shape:
{
  "matchScore": 0,
  "matchedSkills": ["skill1", "skill2", "skill3"],
  "missingSkills": ["missing1", "missing2", "missing3"],
  "summary": "2-3 sentence objective summary of candidate fit",
  "recommendation": "Shortlist for Next Round" | "Consider with Caution" | "Reject"
}"#;

pub const ANALYSIS_TEMPERATURE: f32 = 0.3;

//! Keyword Vocabulary — the fixed set of skill terms the local scorer recognises.
//!
//! Terms are lower-case and matched by case-insensitive substring containment.
//! One- and two-letter words (`go`, `r`, `ml`, `ai`) are left out on purpose:
//! with no word-boundary checks they would match inside almost any sentence.
//! `c#` is the one short term kept; the `#` never occurs inside a word.
//! Embedded matches such as `java` inside `javascript` still happen and are
//! accepted behaviour.

/// The four vocabulary categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCategory {
    LanguagesAndFrameworks,
    Databases,
    CloudAndTooling,
    HrMarketingCrm,
}

impl KeywordCategory {
    /// Languages, databases and tooling all count as technical evidence.
    pub fn is_technical(self) -> bool {
        !matches!(self, KeywordCategory::HrMarketingCrm)
    }
}

pub static LANGUAGES_AND_FRAMEWORKS: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "c++",
    "c#",
    "golang",
    "ruby",
    "php",
    "kotlin",
    "swift",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "node.js",
    "express.js",
    "next.js",
    "django",
    "flask",
    "spring boot",
    ".net",
    "graphql",
    "tensorflow",
    "pytorch",
    "machine learning",
];

pub static DATABASES: &[&str] = &[
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "oracle",
    "sqlite",
    "dynamodb",
    "cassandra",
    "elasticsearch",
    "firebase",
    "supabase",
];

pub static CLOUD_AND_TOOLING: &[&str] = &[
    "aws",
    "azure",
    "google cloud",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "jenkins",
    "ci/cd",
    "linux",
    "github",
    "gitlab",
    "jira",
    "microservices",
    "devops",
    "rest api",
];

pub static HR_MARKETING_CRM: &[&str] = &[
    "recruitment",
    "recruiting",
    "talent acquisition",
    "hiring",
    "onboarding",
    "payroll",
    "employee relations",
    "performance management",
    "human resources",
    "workday",
    "seo",
    "digital marketing",
    "content marketing",
    "social media",
    "email marketing",
    "google analytics",
    "google ads",
    "branding",
    "copywriting",
    "market research",
    "lead generation",
    "campaign",
    "salesforce",
    "hubspot",
    "crm",
];

/// Every vocabulary term with its category, in declaration order.
pub fn terms() -> impl Iterator<Item = (KeywordCategory, &'static str)> {
    let tagged = |category: KeywordCategory, list: &'static [&'static str]| {
        list.iter().map(move |term| (category, *term))
    };
    tagged(KeywordCategory::LanguagesAndFrameworks, LANGUAGES_AND_FRAMEWORKS)
        .chain(tagged(KeywordCategory::Databases, DATABASES))
        .chain(tagged(KeywordCategory::CloudAndTooling, CLOUD_AND_TOOLING))
        .chain(tagged(KeywordCategory::HrMarketingCrm, HR_MARKETING_CRM))
}

/// Vocabulary terms contained in `text`. `text` must already be lower-cased.
pub fn terms_in(text_lower: &str) -> Vec<(KeywordCategory, &'static str)> {
    terms()
        .filter(|(_, term)| text_lower.contains(term))
        .collect()
}

/// Which role families a piece of text speaks to. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleProfile {
    pub technical: bool,
    pub hr_or_marketing: bool,
}

impl RoleProfile {
    pub fn classify(text: &str) -> Self {
        Self::from_hits(&terms_in(&text.to_lowercase()))
    }

    pub fn from_hits(hits: &[(KeywordCategory, &'static str)]) -> Self {
        Self {
            technical: hits.iter().any(|(c, _)| c.is_technical()),
            hr_or_marketing: hits.iter().any(|(c, _)| !c.is_technical()),
        }
    }
}

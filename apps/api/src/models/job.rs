use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company: String,
    pub title: String,
    pub description: String,
    pub vacancies: i32,
    pub created_at: DateTime<Utc>,
}

/// A job posting together with how many applications it has received.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobSummaryRow {
    pub id: Uuid,
    pub company: String,
    pub title: String,
    pub description: String,
    pub vacancies: i32,
    pub applicants: i64,
    pub created_at: DateTime<Utc>,
}

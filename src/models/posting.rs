use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A posting tracked by the job-scraper API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub company: String,
    pub title: String,
    pub team: Option<String>,
    pub location: Option<String>,
    pub url: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "crate::models::timestamp::deserialize")]
    pub first_seen: DateTime<Utc>,
    #[serde(deserialize_with = "crate::models::timestamp::deserialize")]
    pub last_seen: DateTime<Utc>,
    pub is_active: bool,
    #[serde(default, deserialize_with = "crate::models::timestamp::deserialize_option")]
    pub posted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scraped_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsResponse {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub new_today: i64,
    pub new_this_week: i64,
    pub companies_tracked: i64,
    pub companies: Vec<String>,
    #[serde(default, deserialize_with = "crate::models::timestamp::deserialize_option")]
    pub last_scraped: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJobsResponse {
    pub date: String,
    pub count: i64,
    pub jobs: Vec<JobPosting>,
}

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkModel {
    Remote,
    Hybrid,
    Onsite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Seniority {
    Internship,
    NewGrad,
    CoOp,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayCadence {
    Hourly,
    Annual,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub currency: Option<String>,
    pub cadence: Option<PayCadence>,
}

/// A posting on the static job board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub company: String,
    pub title: String,
    pub location: String,
    pub work_model: WorkModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "crate::models::timestamp::deserialize")]
    pub posted_at: DateTime<Utc>,
    pub apply_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<SalaryRange>,
    pub seniority: Seniority,
    pub is_active: bool,
}

impl WorkModel {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkModel::Remote => "remote",
            WorkModel::Hybrid => "hybrid",
            WorkModel::Onsite => "onsite",
        }
    }
}

impl Seniority {
    pub fn as_str(self) -> &'static str {
        match self {
            Seniority::Internship => "internship",
            Seniority::NewGrad => "new-grad",
            Seniority::CoOp => "co-op",
            Seniority::Contract => "contract",
        }
    }
}

impl fmt::Display for WorkModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkModel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(WorkModel::Remote),
            "hybrid" => Ok(WorkModel::Hybrid),
            "onsite" | "on-site" => Ok(WorkModel::Onsite),
            other => Err(AppError::BadRequest(format!(
                "Unknown work model '{other}' (expected remote, hybrid or onsite)"
            ))),
        }
    }
}

impl FromStr for Seniority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "internship" => Ok(Seniority::Internship),
            "new-grad" => Ok(Seniority::NewGrad),
            "co-op" => Ok(Seniority::CoOp),
            "contract" => Ok(Seniority::Contract),
            other => Err(AppError::BadRequest(format!(
                "Unknown seniority '{other}' (expected internship, new-grad, co-op or contract)"
            ))),
        }
    }
}

/// Parse a board document and order it most recent first.
pub fn parse_board(raw: &str) -> Result<Vec<Job>, AppError> {
    let mut jobs: Vec<Job> = serde_json::from_str(raw)?;
    sort_by_recency(&mut jobs);
    Ok(jobs)
}

pub fn load_board(path: &Path) -> Result<Vec<Job>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let jobs = parse_board(&raw)?;
    tracing::info!("Loaded {} jobs from {}", jobs.len(), path.display());
    Ok(jobs)
}

/// Stable sort by `posted_at`, newest first.
pub fn sort_by_recency(jobs: &mut [Job]) {
    jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
}

//! Filtering and summary stats for the job board.
//!
//! Everything here is a pure function of its inputs. Callers hold the
//! [`FilterState`] and swap it whole on every change; the engine never
//! reorders jobs, so the board's load-time ordering is what callers see.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::job::{Job, Seniority, WorkModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub companies: Vec<String>,
    pub work_models: Vec<WorkModel>,
    pub seniority: Vec<Seniority>,
    pub only_active: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            companies: Vec::new(),
            work_models: Vec::new(),
            seniority: Vec::new(),
            only_active: true,
        }
    }
}

impl FilterState {
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    pub fn with_only_active(self, only_active: bool) -> Self {
        Self {
            only_active,
            ..self
        }
    }

    pub fn with_company_toggled(self, company: &str) -> Self {
        Self {
            companies: toggle(&self.companies, &company.to_string()),
            ..self
        }
    }

    pub fn with_work_model_toggled(self, work_model: WorkModel) -> Self {
        Self {
            work_models: toggle(&self.work_models, &work_model),
            ..self
        }
    }

    pub fn with_seniority_toggled(self, seniority: Seniority) -> Self {
        Self {
            seniority: toggle(&self.seniority, &seniority),
            ..self
        }
    }

    /// Whether `job` passes every active constraint.
    pub fn matches(&self, job: &Job) -> bool {
        if self.only_active && !job.is_active {
            return false;
        }
        if !self.companies.is_empty() && !self.companies.contains(&job.company) {
            return false;
        }
        if !self.work_models.is_empty() && !self.work_models.contains(&job.work_model) {
            return false;
        }
        if !self.seniority.is_empty() && !self.seniority.contains(&job.seniority) {
            return false;
        }

        let query = self.search.trim();
        if !query.is_empty() {
            return haystack(job).contains(&query.to_lowercase());
        }

        true
    }
}

/// Lower-cased text a search query is matched against.
fn haystack(job: &Job) -> String {
    let fields = [
        Some(job.company.as_str()),
        Some(job.title.as_str()),
        Some(job.location.as_str()),
        job.team.as_deref(),
        job.discipline.as_deref(),
    ];

    fields
        .into_iter()
        .flatten()
        .chain(job.tags.iter().map(String::as_str))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub remote: usize,
    pub cities: usize,
}

pub fn filter_jobs<'a>(jobs: &'a [Job], state: &FilterState) -> Vec<&'a Job> {
    jobs.iter().filter(|job| state.matches(job)).collect()
}

pub fn aggregate<'a, I>(jobs: I) -> Stats
where
    I: IntoIterator<Item = &'a Job>,
{
    let mut stats = Stats::default();
    let mut cities = HashSet::new();

    for job in jobs {
        stats.total += 1;
        if job.is_active {
            stats.active += 1;
        }
        if job.work_model == WorkModel::Remote {
            stats.remote += 1;
        }
        cities.insert(job.location.as_str());
    }

    stats.cities = cities.len();
    stats
}

/// Removes `value` if present, otherwise appends it.
pub fn toggle<T: Clone + PartialEq>(set: &[T], value: &T) -> Vec<T> {
    if set.contains(value) {
        set.iter().filter(|item| *item != value).cloned().collect()
    } else {
        let mut next = set.to_vec();
        next.push(value.clone());
        next
    }
}

pub fn find_job<'a>(jobs: &'a [Job], id: &str) -> Option<&'a Job> {
    jobs.iter().find(|job| job.id == id)
}

/// Distinct companies on the board, sorted.
pub fn company_options(jobs: &[Job]) -> Vec<String> {
    let mut companies: Vec<String> = jobs
        .iter()
        .map(|job| job.company.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    companies.sort();
    companies
}

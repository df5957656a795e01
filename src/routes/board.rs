use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::filters::{self, FilterState, Stats};
use crate::models::job::Job;
use crate::routes::Board;

/// Query string for `GET /api/board/jobs`. Multi-select fields are
/// comma-separated lists.
#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    pub search: Option<String>,
    pub company: Option<String>,
    pub work_model: Option<String>,
    pub seniority: Option<String>,
    pub only_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub jobs: Vec<Job>,
    pub stats: Stats,
}

impl TryFrom<BoardQuery> for FilterState {
    type Error = AppError;

    fn try_from(query: BoardQuery) -> Result<Self, Self::Error> {
        let defaults = FilterState::default();
        Ok(FilterState {
            search: query.search.unwrap_or_default(),
            companies: split_list(query.company.as_deref())
                .map(str::to_string)
                .collect(),
            work_models: parse_list(query.work_model.as_deref())?,
            seniority: parse_list(query.seniority.as_deref())?,
            only_active: query.only_active.unwrap_or(defaults.only_active),
        })
    }
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_list<T: FromStr<Err = AppError>>(raw: Option<&str>) -> Result<Vec<T>, AppError> {
    split_list(raw).map(str::parse).collect()
}

pub async fn list(
    State(board): State<Board>,
    query: Result<Query<BoardQuery>, QueryRejection>,
) -> Result<Json<BoardResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let state = FilterState::try_from(query)?;
    let filtered = filters::filter_jobs(&board, &state);
    let stats = filters::aggregate(filtered.iter().copied());
    tracing::debug!("{} of {} jobs match {state:?}", stats.total, board.len());

    Ok(Json(BoardResponse {
        jobs: filtered.into_iter().cloned().collect(),
        stats,
    }))
}

pub async fn get(State(board): State<Board>, Path(id): Path<String>) -> Result<Json<Job>, AppError> {
    filters::find_job(&board, &id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

pub async fn companies(State(board): State<Board>) -> Json<Vec<String>> {
    Json(filters::company_options(&board))
}

/// Stats for the default view: every active job.
pub async fn stats(State(board): State<Board>) -> Json<Stats> {
    let filtered = filters::filter_jobs(&board, &FilterState::default());
    Json(filters::aggregate(filtered))
}

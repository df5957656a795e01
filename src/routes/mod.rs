pub mod board;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::models::job::Job;

/// Jobs loaded at startup, shared read-only across requests.
pub type Board = Arc<Vec<Job>>;

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub fn router(board: Board) -> Router {
    let api = Router::new()
        .route("/jobs", get(board::list))
        .route("/jobs/{id}", get(board::get))
        .route("/companies", get(board::companies))
        .route("/stats", get(board::stats))
        .with_state(board);

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api/board", api)
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status. The message carries the
    /// status text so callers can show it as-is.
    #[error("{context}: {}", status_text(.status))]
    Status {
        status: reqwest::StatusCode,
        context: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Failed to read board: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid board data: {0}")]
    Json(#[from] serde_json::Error),
}

fn status_text(status: &reqwest::StatusCode) -> &str {
    status.canonical_reason().unwrap_or(status.as_str())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Transport(e) => {
                tracing::error!("Upstream request failed: {e}");
                (StatusCode::BAD_GATEWAY, "Upstream unavailable".to_string())
            }
            AppError::Status { .. } => {
                tracing::warn!("{self}");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Io(_) | AppError::Json(_) => {
                tracing::error!("Internal error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = axum::Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_status_text() {
        let err = AppError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            context: "Failed to fetch jobs".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch jobs: Not Found");
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = AppError::NotFound("Job x not found".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_maps_to_400() {
        let resp = AppError::BadRequest("bad".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

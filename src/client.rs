use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::posting::{JobPosting, JobsResponse, NewJobsResponse, StatsResponse};

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_SCRAPE_COMPANY: &str = "stripe";

/// Everything but RFC 3986 unreserved characters is escaped in a path segment.
const PATH_SEGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Company select value meaning "no company constraint".
pub const ALL_COMPANIES: &str = "all";

/// Query parameters for `GET /api/jobs`. Unset fields are left off the URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_only: Option<bool>,
    #[serde(skip_serializing_if = "skip_count")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "skip_count")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

fn skip_count(value: &Option<u32>) -> bool {
    matches!(value, None | Some(0))
}

impl JobQuery {
    /// Map the job-filter panel controls to a query: the first 50 active
    /// postings, optionally narrowed to one company and a keyword list.
    pub fn from_controls(selected_company: &str, keywords: &str) -> Self {
        let company = Some(selected_company.trim())
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_COMPANIES))
            .map(str::to_string);
        let keywords = Some(keywords.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Self {
            company,
            active_only: Some(true),
            limit: Some(50),
            offset: None,
            keywords,
        }
    }
}

/// Client for the job-scraper HTTP API.
///
/// Each call issues exactly one request. There is no retry; callers show
/// the error and let the user trigger the request again.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("talentradar/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_jobs(&self, query: &JobQuery) -> Result<JobsResponse, AppError> {
        let request = self.http.get(self.url("/api/jobs")).query(query);
        self.send_json(request, "Failed to fetch jobs").await
    }

    pub async fn fetch_stats(&self) -> Result<StatsResponse, AppError> {
        let request = self.http.get(self.url("/api/stats"));
        self.send_json(request, "Failed to fetch stats").await
    }

    pub async fn fetch_new_jobs_today(
        &self,
        company: Option<&str>,
    ) -> Result<NewJobsResponse, AppError> {
        let mut request = self.http.get(self.url("/api/jobs/new/today"));
        if let Some(company) = company.filter(|c| !c.is_empty()) {
            request = request.query(&[("company", company)]);
        }
        self.send_json(request, "Failed to fetch new jobs").await
    }

    /// Look up one posting. A 404 from the API is reported as `None`.
    pub async fn fetch_job(&self, id: &str) -> Result<Option<JobPosting>, AppError> {
        let id = utf8_percent_encode(id, PATH_SEGMENT_SET);
        let request = self.http.get(self.url(&format!("/api/jobs/{id}")));
        match self.send_json(request, "Failed to fetch job").await {
            Ok(posting) => Ok(Some(posting)),
            Err(AppError::Status { status, .. }) if status == StatusCode::NOT_FOUND => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Ask the scraper to run for `company`. The response body is ignored.
    pub async fn trigger_scrape(&self, company: &str) -> Result<(), AppError> {
        let request = self
            .http
            .post(self.url("/api/scrape"))
            .query(&[("company", company)]);
        self.send(request, "Failed to trigger scrape").await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, AppError> {
        let response = self.send(request, context).await?;
        Ok(response.json().await?)
    }

    async fn send(&self, request: RequestBuilder, context: &str) -> Result<Response, AppError> {
        let response = request
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .inspect_err(|e| tracing::warn!("{context}: {e}"))?;

        tracing::debug!("{} {}", response.status(), response.url());

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{context}: upstream returned {status}");
            return Err(AppError::Status {
                status,
                context: context.to_string(),
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{get, post};
    use serde_json::{Value, json};

    use super::*;

    type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

    fn posting(id: &str) -> Value {
        json!({
            "id": id,
            "company": "stripe",
            "title": "Software Engineer Intern",
            "team": "Payments",
            "location": "Toronto",
            "url": format!("https://stripe.example/{id}"),
            "description": null,
            "first_seen": "2025-01-10T12:00:00",
            "last_seen": "2025-01-11T12:00:00",
            "is_active": true,
            "posted_date": "2025-01-09T00:00:00",
            "scraped_count": 2
        })
    }

    async fn spawn_upstream(seen: Seen) -> String {
        let app = Router::new()
            .route(
                "/api/jobs",
                get(
                    |State(seen): State<Seen>, Query(params): Query<HashMap<String, String>>| async move {
                        seen.lock().unwrap().push(params);
                        axum::Json(json!({
                            "total": 1,
                            "limit": 50,
                            "offset": 0,
                            "jobs": [posting("stripe-1")]
                        }))
                    },
                ),
            )
            .route(
                "/api/jobs/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == "stripe-1" || id == "stripe 2/b?x=1#frag" {
                        Ok(axum::Json(posting(&id)))
                    } else {
                        Err(AxumStatus::NOT_FOUND)
                    }
                }),
            )
            .route(
                "/api/jobs/new/today",
                get(
                    |State(seen): State<Seen>, Query(params): Query<HashMap<String, String>>| async move {
                        seen.lock().unwrap().push(params);
                        axum::Json(json!({
                            "date": "2025-01-11T00:00:00",
                            "count": 1,
                            "jobs": [posting("stripe-1")]
                        }))
                    },
                ),
            )
            .route("/api/stats", get(|| async { AxumStatus::SERVICE_UNAVAILABLE }))
            .route(
                "/api/scrape",
                post(
                    |State(seen): State<Seen>, Query(params): Query<HashMap<String, String>>| async move {
                        seen.lock().unwrap().push(params);
                        axum::Json(json!({ "message": "started" }))
                    },
                ),
            )
            .with_state(seen);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn from_controls_maps_all_sentinel_and_trims_keywords() {
        let query = JobQuery::from_controls("all", "  intern, co-op ");
        assert_eq!(query.company, None);
        assert_eq!(query.keywords.as_deref(), Some("intern, co-op"));
        assert_eq!(query.limit, Some(50));
        assert_eq!(query.active_only, Some(true));

        let query = JobQuery::from_controls("rbc", "   ");
        assert_eq!(query.company.as_deref(), Some("rbc"));
        assert_eq!(query.keywords, None);
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        assert_eq!(client("http://localhost:8001/").base_url(), "http://localhost:8001");
    }

    #[tokio::test]
    async fn fetch_jobs_sends_only_set_params() {
        let seen = Seen::default();
        let base = spawn_upstream(seen.clone()).await;

        let query = JobQuery {
            offset: Some(0),
            ..JobQuery::from_controls("stripe", "intern")
        };
        let response = client(&base).fetch_jobs(&query).await.unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.jobs[0].id, "stripe-1");

        let params = seen.lock().unwrap()[0].clone();
        assert_eq!(params.get("company").map(String::as_str), Some("stripe"));
        assert_eq!(params.get("active_only").map(String::as_str), Some("true"));
        assert_eq!(params.get("limit").map(String::as_str), Some("50"));
        assert_eq!(params.get("keywords").map(String::as_str), Some("intern"));
        assert!(!params.contains_key("offset"));
    }

    #[tokio::test]
    async fn non_success_status_becomes_status_error() {
        let base = spawn_upstream(Seen::default()).await;
        let err = client(&base).fetch_stats().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Status { status, .. } if status == StatusCode::SERVICE_UNAVAILABLE
        ));
        assert_eq!(err.to_string(), "Failed to fetch stats: Service Unavailable");
    }

    #[tokio::test]
    async fn fetch_job_treats_404_as_not_found() {
        let base = spawn_upstream(Seen::default()).await;
        let api = client(&base);
        assert!(api.fetch_job("stripe-1").await.unwrap().is_some());
        assert!(api.fetch_job("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fetch_job_escapes_reserved_characters_in_id() {
        let base = spawn_upstream(Seen::default()).await;
        let api = client(&base);

        assert!(api.fetch_job("stripe-1?x=1").await.unwrap().is_none());
        assert!(api.fetch_job("stripe-1#b").await.unwrap().is_none());
        assert!(api.fetch_job("stripe-1/extra").await.unwrap().is_none());

        let posting = api.fetch_job("stripe 2/b?x=1#frag").await.unwrap().unwrap();
        assert_eq!(posting.id, "stripe 2/b?x=1#frag");
    }

    #[tokio::test]
    async fn new_jobs_today_passes_company_when_given() {
        let seen = Seen::default();
        let base = spawn_upstream(seen.clone()).await;
        let api = client(&base);

        let today = api.fetch_new_jobs_today(Some("stripe")).await.unwrap();
        assert_eq!(today.count, 1);
        api.fetch_new_jobs_today(None).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].get("company").map(String::as_str), Some("stripe"));
        assert!(seen[1].is_empty());
    }

    #[tokio::test]
    async fn trigger_scrape_posts_company() {
        let seen = Seen::default();
        let base = spawn_upstream(seen.clone()).await;
        client(&base).trigger_scrape("rbc").await.unwrap();
        assert_eq!(
            seen.lock().unwrap()[0].get("company").map(String::as_str),
            Some("rbc")
        );
    }

    #[tokio::test]
    async fn unreachable_upstream_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"))
            .fetch_stats()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
    }
}

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use talentradar::client::{ApiClient, JobQuery};
use talentradar::config::{Command, Config};
use talentradar::filters::{self, FilterState};
use talentradar::models::job;
use talentradar::routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("talentradar=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    match config.resolved_command() {
        Command::Serve { listen_addr, board } => serve(&listen_addr, &board).await,
        Command::Board {
            board,
            search,
            companies,
            work_models,
            seniority,
            include_inactive,
        } => {
            let jobs = job::load_board(&board)?;
            let state = FilterState {
                search,
                companies,
                work_models,
                seniority,
                only_active: !include_inactive,
            };
            let filtered = filters::filter_jobs(&jobs, &state);
            let stats = filters::aggregate(filtered.iter().copied());
            if filtered.is_empty() {
                tracing::info!("No job postings match your filters");
            }
            print_json(&serde_json::json!({ "jobs": filtered, "stats": stats }))
        }
        Command::Jobs {
            company,
            keywords,
            limit,
            offset,
            include_inactive,
        } => {
            let query = JobQuery {
                active_only: Some(!include_inactive),
                limit: Some(limit),
                offset: Some(offset),
                ..JobQuery::from_controls(&company, &keywords)
            };
            print_json(&api_client(&config)?.fetch_jobs(&query).await?)
        }
        Command::Show { id } => match api_client(&config)?.fetch_job(&id).await? {
            Some(posting) => print_json(&posting),
            None => anyhow::bail!("Job {id} not found"),
        },
        Command::Stats => print_json(&api_client(&config)?.fetch_stats().await?),
        Command::Today { company } => print_json(
            &api_client(&config)?
                .fetch_new_jobs_today(company.as_deref())
                .await?,
        ),
        Command::Scrape { company } => {
            api_client(&config)?.trigger_scrape(&company).await?;
            tracing::info!("Scrape triggered for '{company}'");
            Ok(())
        }
    }
}

async fn serve(listen_addr: &str, board_path: &Path) -> anyhow::Result<()> {
    let board = Arc::new(job::load_board(board_path)?);

    let app = routes::router(board)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!("Listening on {listen_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

/// One request per command and no retry: failures are reported as-is and
/// re-running the command is the retry.
fn api_client(config: &Config) -> anyhow::Result<ApiClient> {
    let api = ApiClient::new(&config.api_url, config.timeout())?;
    tracing::debug!("Using job-scraper API at {}", api.base_url());
    Ok(api)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::client::{DEFAULT_API_URL, DEFAULT_SCRAPE_COMPANY};
use crate::models::job::{Seniority, WorkModel};

const DEFAULT_BOARD: &str = "data/jobs.json";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "talentradar",
    about = "Early-career job board filters and job-scraper API client"
)]
pub struct Config {
    /// Base URL of the job-scraper API
    #[arg(long, env = "TALENTRADAR_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Request timeout in seconds for job-scraper API calls
    #[arg(long, env = "TALENTRADAR_TIMEOUT", default_value = "10", global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the static job board over HTTP (default when no subcommand given)
    Serve {
        /// Listen address
        #[arg(long, env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
        listen_addr: String,

        /// Path to the job board JSON document
        #[arg(long, env = "TALENTRADAR_BOARD", default_value = DEFAULT_BOARD)]
        board: PathBuf,
    },
    /// Filter the static job board and print matching jobs with stats
    Board {
        #[arg(long, env = "TALENTRADAR_BOARD", default_value = DEFAULT_BOARD)]
        board: PathBuf,

        /// Case-insensitive text to look for in company, title, location, team, discipline and tags
        #[arg(long, default_value = "")]
        search: String,

        /// Limit to these companies (repeatable)
        #[arg(long = "company")]
        companies: Vec<String>,

        /// Limit to these work models: remote, hybrid, onsite (repeatable)
        #[arg(long = "work-model")]
        work_models: Vec<WorkModel>,

        /// Limit to these levels: internship, new-grad, co-op, contract (repeatable)
        #[arg(long = "seniority")]
        seniority: Vec<Seniority>,

        /// Include inactive postings
        #[arg(long)]
        include_inactive: bool,
    },
    /// List postings from the job-scraper API
    Jobs {
        /// Company to list, or "all"
        #[arg(long, default_value = "all")]
        company: String,

        /// Comma-separated keywords
        #[arg(long, default_value = "")]
        keywords: String,

        #[arg(long, default_value = "50")]
        limit: u32,

        #[arg(long, default_value = "0")]
        offset: u32,

        /// Include inactive postings
        #[arg(long)]
        include_inactive: bool,
    },
    /// Show one posting from the job-scraper API
    Show { id: String },
    /// Show job-scraper statistics
    Stats,
    /// List postings first seen today
    Today {
        #[arg(long)]
        company: Option<String>,
    },
    /// Trigger a scrape run for a company
    Scrape {
        #[arg(long, default_value = DEFAULT_SCRAPE_COMPANY)]
        company: String,
    },
}

impl Config {
    /// Resolve the command, defaulting to Serve if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or_else(|| Command::Serve {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string()),
            board: std::env::var("TALENTRADAR_BOARD")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_BOARD)),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

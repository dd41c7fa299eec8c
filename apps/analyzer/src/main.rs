mod analysis;
mod client;
mod config;
mod errors;
mod models;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::validate::ValidationRules;
use crate::client::HttpAnalysisClient;
use crate::config::Config;
use crate::models::document::{Document, Mode};
use crate::session::{AttemptOutcome, ModeSession};

/// Thin command-line shell around one analysis session. Prints the
/// canonical report as JSON on stdout; anything user-facing about a
/// failure goes to stderr with exit code 1.
#[derive(Debug, Parser)]
#[command(name = "analyzer", about = "Resume analysis against a target role")]
struct Cli {
    /// Target role to evaluate against
    #[arg(long)]
    role: String,

    /// Operating mode: candidate (single resume) or company (ranked batch)
    #[arg(long, default_value = "candidate")]
    mode: Mode,

    /// Job description file (Company mode)
    #[arg(long)]
    jd: Option<PathBuf>,

    /// Resume file(s): one in candidate mode, up to ten in company mode
    #[arg(required = true)]
    resumes: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting analyzer v{}", env!("CARGO_PKG_VERSION"));
    info!("Analysis service: {}", config.api_base_url);

    let mut resumes = Vec::with_capacity(cli.resumes.len());
    for path in &cli.resumes {
        resumes.push(Document::from_path(path).await?);
    }
    let job_description = match &cli.jd {
        Some(path) => Some(Document::from_path(path).await?),
        None => None,
    };

    info!(
        "{} mode, role '{}', {} file(s): {}",
        cli.mode,
        cli.role,
        resumes.len(),
        resumes
            .iter()
            .map(|d| d.file_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let transport = Arc::new(HttpAnalysisClient::new(&config)?);
    let session = ModeSession::new(
        cli.mode,
        transport,
        ValidationRules {
            require_job_description: config.require_job_description,
        },
    );

    match session
        .start_analysis(&cli.role, resumes, job_description)
        .await
    {
        Ok(AttemptOutcome::Completed(report)) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        // A single-shot CLI run has nothing to supersede its one attempt.
        Ok(AttemptOutcome::Superseded) => unreachable!("lone attempt cannot be superseded"),
        Err(error) => {
            eprintln!("{}", error.user_message());
            std::process::exit(1);
        }
    }
}

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only the service base URL is required; everything else has defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub candidate_endpoint_path: String,
    pub company_endpoint_path: String,
    pub request_timeout_secs: u64,
    /// Whether Company mode must include a job description file.
    /// Kept configurable because deployed backends disagree.
    pub require_job_description: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: require_env("API_BASE_URL")?,
            candidate_endpoint_path: std::env::var("CANDIDATE_ENDPOINT_PATH")
                .unwrap_or_else(|_| "/api/analyze".to_string()),
            company_endpoint_path: std::env::var("COMPANY_ENDPOINT_PATH")
                .unwrap_or_else(|_| "/api/compare-batch".to_string()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            require_job_description: std::env::var("REQUIRE_JOB_DESCRIPTION")
                .unwrap_or_else(|_| "true".to_string())
                .parse::<bool>()
                .context("REQUIRE_JOB_DESCRIPTION must be true or false")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

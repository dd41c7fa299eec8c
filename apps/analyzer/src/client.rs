//! HTTP boundary to the analysis service.
//!
//! One outbound `POST` per submission, never retried: batch scoring is not
//! guaranteed idempotent, so a retry could double-consume quota. Transport
//! concerns end here; the raw body goes to the normalizer untouched.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, warn};

use crate::analysis::request::TransportPayload;
use crate::config::Config;
use crate::errors::TransportError;
use crate::models::document::Mode;

/// Keys an error body may carry its message under, tried in order.
/// Each may hold the message directly or nest it as `{ "message": ... }`.
const ERROR_MESSAGE_FIELDS: &[&str] = &["error", "message", "detail"];

const ERROR_BODY_PREVIEW_CHARS: usize = 300;

/// The seam the session drives. Swappable so tests (and any future
/// non-HTTP backend) can stand in for the real service.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn submit(&self, payload: TransportPayload) -> Result<Value, TransportError>;
}

/// The production transport: multipart `POST` over reqwest.
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: String,
    candidate_path: String,
    company_path: String,
}

impl HttpAnalysisClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            candidate_path: config.candidate_endpoint_path.clone(),
            company_path: config.company_endpoint_path.clone(),
        })
    }

    fn endpoint(&self, mode: Mode) -> String {
        let path = match mode {
            Mode::Candidate => &self.candidate_path,
            Mode::Company => &self.company_path,
        };
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AnalysisTransport for HttpAnalysisClient {
    async fn submit(&self, payload: TransportPayload) -> Result<Value, TransportError> {
        let url = self.endpoint(payload.mode);
        let form = build_form(payload)?;

        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = extract_error_message(&body);
            warn!("analysis service returned {status}: {message}");
            return Err(TransportError::Server {
                status: status.as_u16(),
                message,
            });
        }

        debug!("analysis service answered with {} bytes", body.len());

        // Deliberately untyped. A non-JSON success body is carried as a
        // JSON string so the normalizer owns every schema decision.
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

fn build_form(payload: TransportPayload) -> Result<Form, TransportError> {
    let mut form = Form::new();

    for (name, value) in payload.fields {
        form = form.text(name, value);
    }

    for part in payload.parts {
        let file = Part::bytes(part.bytes.to_vec())
            .file_name(part.file_name)
            .mime_str(&part.mime_type)
            .map_err(|e| TransportError::Client(format!("invalid MIME type: {e}")))?;
        form = form.part(part.field, file);
    }

    Ok(form)
}

/// Sent-but-no-answer failures (timeouts, resets) are network errors;
/// failures to assemble the request at all are client errors.
fn classify_send_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() || error.is_connect() {
        TransportError::Network(error.to_string())
    } else if error.is_builder() || error.is_body() {
        TransportError::Client(error.to_string())
    } else {
        TransportError::Network(error.to_string())
    }
}

/// Best message recoverable from an error body: probe the known JSON keys,
/// fall back to the raw text, truncated for sanity.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ERROR_MESSAGE_FIELDS {
            let Some(field) = value.get(key) else { continue };
            let message = match field {
                Value::String(s) => Some(s.as_str()),
                Value::Object(inner) => inner.get("message").and_then(Value::as_str),
                _ => None,
            };
            if let Some(message) = message.map(str::trim).filter(|m| !m.is_empty()) {
                return message.to_string();
            }
        }
    }

    truncate_chars(body.trim(), ERROR_BODY_PREVIEW_CHARS)
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::request::{build, SINGLE_FILE_FIELD};
    use crate::analysis::validate::ValidatedRequest;
    use crate::models::document::Document;

    fn config() -> Config {
        Config {
            api_base_url: "http://localhost:8080/".to_string(),
            candidate_endpoint_path: "/api/analyze".to_string(),
            company_endpoint_path: "/api/compare-batch".to_string(),
            request_timeout_secs: 60,
            require_job_description: true,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = HttpAnalysisClient::new(&config()).unwrap();
        assert_eq!(
            client.endpoint(Mode::Candidate),
            "http://localhost:8080/api/analyze"
        );
        assert_eq!(
            client.endpoint(Mode::Company),
            "http://localhost:8080/api/compare-batch"
        );
    }

    #[test]
    fn test_build_form_accepts_accepted_mime_types() {
        let payload = build(ValidatedRequest {
            mode: Mode::Candidate,
            role: "SRE".to_string(),
            documents: vec![Document::new("cv.pdf", "application/pdf", vec![1, 2, 3])],
            job_description: None,
        });
        assert_eq!(payload.parts[0].field, SINGLE_FILE_FIELD);
        assert!(build_form(payload).is_ok());
    }

    #[test]
    fn test_extract_error_message_from_error_key() {
        assert_eq!(
            extract_error_message(r#"{"error": "Resume could not be parsed"}"#),
            "Resume could not be parsed"
        );
    }

    #[test]
    fn test_extract_error_message_from_nested_object() {
        assert_eq!(
            extract_error_message(r#"{"error": {"message": "quota exceeded"}}"#),
            "quota exceeded"
        );
    }

    #[test]
    fn test_extract_error_message_probes_in_order() {
        assert_eq!(
            extract_error_message(r#"{"detail": "later", "error": "first"}"#),
            "first"
        );
        assert_eq!(
            extract_error_message(r#"{"message": "from message"}"#),
            "from message"
        );
    }

    #[test]
    fn test_extract_error_message_falls_back_to_raw_body() {
        assert_eq!(extract_error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(extract_error_message(r#"{"error": 42}"#), r#"{"error": 42}"#);
    }

    #[test]
    fn test_extract_error_message_truncates_long_bodies() {
        let body = "x".repeat(1000);
        assert_eq!(
            extract_error_message(&body).chars().count(),
            ERROR_BODY_PREVIEW_CHARS
        );
    }
}

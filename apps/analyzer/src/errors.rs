//! Error taxonomy for the analysis pipeline.
//!
//! Three recoverable families, one umbrella:
//! - `ValidationError` — user-correctable input problems, surfaced verbatim.
//! - `TransportError` — the HTTP boundary failed; server-provided messages
//!   are surfaced, everything else gets a generic fallback.
//! - `SchemaError` — the backend answered but the payload made no sense.
//!   Surfaced generically and logged, since it indicates contract drift.
//!
//! Nothing here is fatal to the process; the session returns to `Failed`
//! and a new attempt may be started.

use thiserror::Error;

use crate::analysis::validate::MAX_BATCH_DOCUMENTS;

/// Input problems the user can fix before resubmitting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a target role")]
    MissingRole,

    #[error("Please select at least one resume file")]
    MissingDocuments,

    #[error("At most {MAX_BATCH_DOCUMENTS} resumes can be compared in one batch (got {0})")]
    TooManyDocuments(usize),

    #[error("Company mode requires a job description file")]
    MissingJobDescription,

    #[error("Unsupported file type for '{file}' (accepted: pdf, doc, docx)")]
    UnsupportedFileType { file: String },
}

/// Failures at the HTTP boundary, classified for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The service responded with a non-success status. `message` is the
    /// best message recoverable from the response body (may be empty).
    #[error("Analysis service returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The request was sent but no response arrived (timeout, reset).
    #[error("No response from the analysis service: {0}")]
    Network(String),

    /// The request could not be constructed or sent at all.
    #[error("Could not send analysis request: {0}")]
    Client(String),
}

/// Normalization could not make sense of the backend payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unexpected response shape: {0}")]
pub struct SchemaError(pub String);

/// Umbrella error for one analysis attempt, stored in the session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

const GENERIC_TRANSPORT_MESSAGE: &str =
    "The analysis service could not be reached. Please try again.";
const GENERIC_SCHEMA_MESSAGE: &str =
    "The analysis service returned an invalid response. Please try again.";

impl AnalysisError {
    /// The message the rendering surface shows. Validation errors pass
    /// through verbatim; transport errors fall back to a generic message
    /// when the server did not provide one; schema errors are always
    /// generic (the detail goes to the log, not the user).
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Validation(e) => e.to_string(),
            AnalysisError::Transport(TransportError::Server { message, .. })
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            AnalysisError::Transport(_) => GENERIC_TRANSPORT_MESSAGE.to_string(),
            AnalysisError::Schema(_) => GENERIC_SCHEMA_MESSAGE.to_string(),
        }
    }
}

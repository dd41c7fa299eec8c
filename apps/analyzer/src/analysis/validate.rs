//! Input validation, run before anything touches the network.
//!
//! Rules are evaluated in a fixed order and short-circuit at the first
//! failure, so the user always sees the most fundamental problem first.

use crate::errors::ValidationError;
use crate::models::document::{Document, Mode};

/// Hard cap on resumes per Company-mode batch.
pub const MAX_BATCH_DOCUMENTS: usize = 10;

/// Declared MIME types the analysis service accepts.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// The small slice of configuration validation depends on.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRules {
    /// Whether Company mode must include a job description file.
    pub require_job_description: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            require_job_description: true,
        }
    }
}

/// A request that passed validation. `role` is trimmed; in Candidate mode
/// `documents` holds exactly one entry and `job_description` is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub mode: Mode,
    pub role: String,
    pub documents: Vec<Document>,
    pub job_description: Option<Document>,
}

/// Validates one analysis request. Pure over its arguments and `rules`.
pub fn validate(
    mode: Mode,
    role: &str,
    mut documents: Vec<Document>,
    job_description: Option<Document>,
    rules: &ValidationRules,
) -> Result<ValidatedRequest, ValidationError> {
    let role = role.trim();
    if role.is_empty() {
        return Err(ValidationError::MissingRole);
    }

    if documents.is_empty() {
        return Err(ValidationError::MissingDocuments);
    }

    let job_description = match mode {
        Mode::Candidate => {
            // Extra selections are silently dropped, not an error.
            documents.truncate(1);
            None
        }
        Mode::Company => {
            if documents.len() > MAX_BATCH_DOCUMENTS {
                return Err(ValidationError::TooManyDocuments(documents.len()));
            }
            if rules.require_job_description && job_description.is_none() {
                return Err(ValidationError::MissingJobDescription);
            }
            job_description
        }
    };

    for document in documents.iter().chain(job_description.iter()) {
        if !ACCEPTED_MIME_TYPES.contains(&document.mime_type.as_str()) {
            return Err(ValidationError::UnsupportedFileType {
                file: document.file_name.clone(),
            });
        }
    }

    Ok(ValidatedRequest {
        mode,
        role: role.to_string(),
        documents,
        job_description,
    })
}

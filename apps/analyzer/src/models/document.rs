#![allow(dead_code)]

//! Input-side domain types: operating mode and uploaded documents.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use bytes::Bytes;

/// Operating mode. Determines how many documents are expected and which
/// canonical result shape the backend answer is normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Single-resume self-evaluation.
    Candidate,
    /// Multi-resume comparative ranking against a role / job description.
    Company,
}

impl Mode {
    /// Wire value sent as the `mode` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Candidate => "candidate",
            Mode::Company => "company",
        }
    }

    pub fn toggled(&self) -> Mode {
        match self {
            Mode::Candidate => Mode::Company,
            Mode::Company => Mode::Candidate,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "candidate" => Ok(Mode::Candidate),
            "company" => Ok(Mode::Company),
            other => Err(format!("unknown mode '{other}' (expected candidate or company)")),
        }
    }
}

/// An uploaded document: opaque bytes plus the metadata the transport needs.
/// Owned by the pending request once submitted; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Loads a document from disk, deriving the declared MIME type from the
    /// file extension. MIME sniffing proper is the file picker's job; this
    /// mapping is the CLI stand-in for it. Unknown extensions are declared
    /// `application/octet-stream` and rejected later by validation.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file {}", path.display()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Ok(Self {
            file_name,
            mime_type: mime_for_extension(&extension).to_string(),
            bytes: Bytes::from(bytes),
        })
    }
}

/// Extension → declared MIME type for the formats the service accepts.
fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_wire_values() {
        assert_eq!(Mode::Candidate.as_str(), "candidate");
        assert_eq!(Mode::Company.as_str(), "company");
    }

    #[test]
    fn test_mode_toggle_round_trip() {
        assert_eq!(Mode::Candidate.toggled(), Mode::Company);
        assert_eq!(Mode::Company.toggled().toggled(), Mode::Company);
    }

    #[test]
    fn test_mode_from_str_case_insensitive() {
        assert_eq!("Candidate".parse::<Mode>().unwrap(), Mode::Candidate);
        assert_eq!("COMPANY".parse::<Mode>().unwrap(), Mode::Company);
    }

    #[test]
    fn test_mode_from_str_rejects_unknown() {
        assert!("recruiter".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for_extension("pdf"), "application/pdf");
        assert_eq!(mime_for_extension("doc"), "application/msword");
        assert!(mime_for_extension("docx").contains("wordprocessingml"));
    }

    #[test]
    fn test_mime_for_unknown_extension() {
        assert_eq!(mime_for_extension("txt"), "application/octet-stream");
        assert_eq!(mime_for_extension(""), "application/octet-stream");
    }
}

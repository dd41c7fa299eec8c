//! Builds the multipart payload for a validated request.
//!
//! Pure and infallible: a request that failed validation must never reach
//! this stage, so the mapping is a deterministic function of its input.

use bytes::Bytes;

use crate::analysis::validate::ValidatedRequest;
use crate::models::document::Mode;

/// Multipart field names the analysis service expects.
pub const ROLE_FIELD: &str = "role";
pub const MODE_FIELD: &str = "mode";
/// Candidate mode: the single resume.
pub const SINGLE_FILE_FIELD: &str = "file";
/// Company mode: repeated once per resume.
pub const BATCH_FILE_FIELD: &str = "files";
pub const JOB_DESCRIPTION_FIELD: &str = "jd_file";

/// One file part of the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: &'static str,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

/// The transport-ready request body: scalar text fields plus file parts,
/// in the order they should be appended to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportPayload {
    pub mode: Mode,
    pub fields: Vec<(&'static str, String)>,
    pub parts: Vec<FilePart>,
}

/// Encodes a validated request into its multipart payload.
pub fn build(request: ValidatedRequest) -> TransportPayload {
    let mut parts = Vec::with_capacity(request.documents.len() + 1);

    let file_field = match request.mode {
        Mode::Candidate => SINGLE_FILE_FIELD,
        Mode::Company => BATCH_FILE_FIELD,
    };

    for document in request.documents {
        parts.push(FilePart {
            field: file_field,
            file_name: document.file_name,
            mime_type: document.mime_type,
            bytes: document.bytes,
        });
    }

    if let Some(jd) = request.job_description {
        parts.push(FilePart {
            field: JOB_DESCRIPTION_FIELD,
            file_name: jd.file_name,
            mime_type: jd.mime_type,
            bytes: jd.bytes,
        });
    }

    TransportPayload {
        mode: request.mode,
        fields: vec![
            (ROLE_FIELD, request.role),
            (MODE_FIELD, request.mode.as_str().to_string()),
        ],
        parts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::validate::{validate, ValidationRules};
    use crate::models::document::Document;

    fn pdf(name: &str) -> Document {
        Document::new(name, "application/pdf", name.as_bytes().to_vec())
    }

    fn validated(
        mode: Mode,
        docs: Vec<Document>,
        jd: Option<Document>,
    ) -> crate::analysis::validate::ValidatedRequest {
        validate(mode, "Backend Developer", docs, jd, &ValidationRules::default()).unwrap()
    }

    #[test]
    fn test_candidate_payload_uses_single_file_field() {
        let payload = build(validated(Mode::Candidate, vec![pdf("cv.pdf")], None));
        assert_eq!(payload.parts.len(), 1);
        assert_eq!(payload.parts[0].field, SINGLE_FILE_FIELD);
        assert_eq!(payload.parts[0].file_name, "cv.pdf");
    }

    #[test]
    fn test_company_payload_repeats_files_field() {
        let payload = build(validated(
            Mode::Company,
            vec![pdf("a.pdf"), pdf("b.pdf")],
            Some(pdf("jd.pdf")),
        ));
        let file_fields: Vec<&str> = payload.parts.iter().map(|p| p.field).collect();
        assert_eq!(
            file_fields,
            vec![BATCH_FILE_FIELD, BATCH_FILE_FIELD, JOB_DESCRIPTION_FIELD]
        );
    }

    #[test]
    fn test_scalar_fields_always_present() {
        let payload = build(validated(Mode::Candidate, vec![pdf("cv.pdf")], None));
        assert_eq!(
            payload.fields,
            vec![
                (ROLE_FIELD, "Backend Developer".to_string()),
                (MODE_FIELD, "candidate".to_string()),
            ]
        );
    }

    #[test]
    fn test_company_without_jd_has_no_jd_part() {
        let lenient = ValidationRules {
            require_job_description: false,
        };
        let request =
            validate(Mode::Company, "SRE", vec![pdf("a.pdf")], None, &lenient).unwrap();
        let payload = build(request);
        assert!(payload
            .parts
            .iter()
            .all(|p| p.field != JOB_DESCRIPTION_FIELD));
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = build(validated(Mode::Company, vec![pdf("a.pdf")], Some(pdf("jd.pdf"))));
        let second = build(validated(Mode::Company, vec![pdf("a.pdf")], Some(pdf("jd.pdf"))));
        assert_eq!(first, second);
    }

    #[test]
    fn test_document_bytes_pass_through_unmodified() {
        let payload = build(validated(Mode::Candidate, vec![pdf("cv.pdf")], None));
        assert_eq!(payload.parts[0].bytes.as_ref(), b"cv.pdf");
        assert_eq!(payload.parts[0].mime_type, "application/pdf");
    }
}

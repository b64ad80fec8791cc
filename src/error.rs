//! Error types for the adobe-pdf-extract library.
//!
//! Every failure aborts the pipeline and surfaces to the caller as a single
//! [`ExtractError`]; there is no partial-result return. Errors raised by the
//! remote service are propagated with their original HTTP status and response
//! body ([`ExtractError::ServiceError`]) rather than translated, so callers
//! can distinguish quota, validation, and server faults themselves.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the adobe-pdf-extract library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input does not denote a regular local file.
    #[error("Invalid input '{input}': not a readable PDF file path")]
    InvalidInput { input: String },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed (empty credentials, zero poll interval, …).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Remote-service errors ─────────────────────────────────────────────
    /// The token endpoint rejected the credentials.
    #[error(
        "Authentication failed (HTTP {status}): {detail}\n\
         Check PDF_SERVICES_CLIENT_ID / PDF_SERVICES_CLIENT_SECRET."
    )]
    AuthFailed { status: u16, detail: String },

    /// The service returned a non-success status; body propagated verbatim.
    #[error("PDF Services '{operation}' failed (HTTP {status}): {body}")]
    ServiceError {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Network-level failure talking to the service.
    #[error("Request to PDF Services '{operation}' failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The extraction job itself reported `failed`.
    #[error("Extraction job failed: {detail}")]
    JobFailed { detail: String },

    /// The job did not complete before the configured deadline.
    #[error("Extraction job still running after {secs}s\nIncrease poll_timeout_secs.")]
    PollTimeout { secs: u64 },

    // ── Result errors ─────────────────────────────────────────────────────
    /// The result archive is missing `structuredData.json`, or that entry is
    /// not valid JSON for the expected schema.
    #[error("Malformed extraction result: {detail}")]
    MalformedResult { detail: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_display_keeps_body() {
        let e = ExtractError::ServiceError {
            operation: "submit",
            status: 400,
            body: "{\"error\":{\"code\":\"INVALID_DOCUMENT\"}}".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("submit"));
        assert!(msg.contains("400"));
        assert!(msg.contains("INVALID_DOCUMENT"));
    }

    #[test]
    fn auth_failed_display_hints_env_vars() {
        let e = ExtractError::AuthFailed {
            status: 401,
            detail: "invalid_client".into(),
        };
        assert!(e.to_string().contains("PDF_SERVICES_CLIENT_ID"));
    }

    #[test]
    fn poll_timeout_display() {
        let e = ExtractError::PollTimeout { secs: 600 };
        assert!(e.to_string().contains("600s"));
    }

    #[test]
    fn malformed_result_display() {
        let e = ExtractError::MalformedResult {
            detail: "archive has no structuredData.json entry".into(),
        };
        assert!(e.to_string().contains("structuredData.json"));
    }
}

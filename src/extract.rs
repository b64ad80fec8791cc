//! Top-level extraction entry points.
//!
//! [`ExtractReader`] owns the service session and sequences the four pipeline
//! stages. Each stage's output is passed explicitly to the next, so the
//! reader carries no per-call state: calling `load_data` from several tasks
//! on one reader is safe (each call is its own upload/job/result chain,
//! sharing only the cached access token).

use crate::client::{PdfServices, PDF_MEDIA_TYPE};
use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::output::Document;
use crate::pipeline::{assemble, job, result, upload};
use serde_json::{Map, Value};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Per-call options for [`ExtractReader::load_data_with`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Record each page's number under the `page_number` metadata key.
    /// Default: true.
    pub include_page_metadata: bool,

    /// Extra metadata copied into every record. Default: none.
    pub extra_info: Option<Map<String, Value>>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            include_page_metadata: true,
            extra_info: None,
        }
    }
}

impl LoadOptions {
    /// Page numbers recorded, no extra metadata (the defaults).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_page_metadata(mut self, include: bool) -> Self {
        self.include_page_metadata = include;
        self
    }

    pub fn extra_info(mut self, extra: Map<String, Value>) -> Self {
        self.extra_info = Some(extra);
        self
    }
}

/// Reads PDF files through the Adobe PDF Services Extract API.
///
/// # Example
/// ```rust,no_run
/// use adobe_pdf_extract::ExtractReader;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let reader = ExtractReader::new("client-id", "client-secret")?;
///     let documents = reader.load_data("report.pdf").await?;
///     for doc in &documents {
///         println!("page {:?}: {} bytes", doc.page_number(), doc.text.len());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ExtractReader {
    client: PdfServices,
}

impl ExtractReader {
    /// Build a reader from credentials, using default settings elsewhere.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ExtractError> {
        Self::with_config(ExtractConfig::new(client_id, client_secret)?)
    }

    /// Build a reader from a full [`ExtractConfig`].
    pub fn with_config(config: ExtractConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            client: PdfServices::new(config)?,
        })
    }

    pub fn config(&self) -> &ExtractConfig {
        self.client.config()
    }

    /// Extract per-page text from a local PDF file with default options
    /// (page-number metadata on, no extra info).
    pub async fn load_data(&self, path: impl AsRef<Path>) -> Result<Vec<Document>, ExtractError> {
        self.load_data_with(path, &LoadOptions::default()).await
    }

    /// Extract per-page text from a local PDF file.
    ///
    /// Runs the full pipeline: upload, submit, await/fetch result, assemble.
    /// Any stage failure aborts the call; no partial results are returned.
    pub async fn load_data_with(
        &self,
        path: impl AsRef<Path>,
        options: &LoadOptions,
    ) -> Result<Vec<Document>, ExtractError> {
        let path = path.as_ref();
        let start = Instant::now();
        info!(path = %path.display(), "Starting extraction");

        let asset = upload::upload_pdf(&self.client, path).await?;
        let location = job::submit_job(&self.client, &asset).await?;
        let structured = result::fetch_result(&self.client, &location).await?;
        let documents = assemble::assemble_documents(
            &structured,
            options.include_page_metadata,
            options.extra_info.as_ref(),
        );

        info!(
            pages = documents.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Extraction complete"
        );
        Ok(documents)
    }

    /// Extract per-page text from in-memory PDF bytes.
    ///
    /// Skips the file-validation step of [`load_data_with`]; the bytes are
    /// uploaded as-is and any rejection comes from the service.
    pub async fn load_bytes_with(
        &self,
        bytes: Vec<u8>,
        options: &LoadOptions,
    ) -> Result<Vec<Document>, ExtractError> {
        let start = Instant::now();
        info!(bytes = bytes.len(), "Starting extraction from bytes");

        let asset = self.client.upload(bytes, PDF_MEDIA_TYPE).await?;
        let location = job::submit_job(&self.client, &asset).await?;
        let structured = result::fetch_result(&self.client, &location).await?;
        let documents = assemble::assemble_documents(
            &structured,
            options.include_page_metadata,
            options.extra_info.as_ref(),
        );

        info!(
            pages = documents.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Extraction complete"
        );
        Ok(documents)
    }

    /// Blocking wrapper around [`load_data`](Self::load_data).
    ///
    /// Creates a temporary tokio runtime internally; do not call from inside
    /// an async context.
    pub fn load_data_sync(&self, path: impl AsRef<Path>) -> Result<Vec<Document>, ExtractError> {
        tokio::runtime::Runtime::new()
            .map_err(|e| ExtractError::Internal(format!("Failed to create tokio runtime: {e}")))?
            .block_on(self.load_data(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_options_defaults() {
        let opts = LoadOptions::default();
        assert!(opts.include_page_metadata);
        assert!(opts.extra_info.is_none());
    }

    #[test]
    fn load_options_builder() {
        let mut extra = Map::new();
        extra.insert("source".into(), Value::from("a.pdf"));
        let opts = LoadOptions::new()
            .include_page_metadata(false)
            .extra_info(extra);
        assert!(!opts.include_page_metadata);
        assert_eq!(opts.extra_info.unwrap().len(), 1);
    }

    #[test]
    fn reader_rejects_empty_credentials() {
        let err = ExtractReader::new("", "secret").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn load_data_validates_path_before_network() {
        // The configured endpoint is unroutable; a missing file must fail
        // locally, proving validation precedes any service call.
        let config = ExtractConfig::builder()
            .client_id("id")
            .client_secret("secret")
            .base_url("http://127.0.0.1:1")
            .build()
            .unwrap();
        let reader = ExtractReader::with_config(config).unwrap();
        let err = reader.load_data("/no/such/file.pdf").await.unwrap_err();
        assert!(matches!(err, ExtractError::FileNotFound { .. }));
    }
}

//! # adobe-pdf-extract
//!
//! Extract per-page text from PDF documents using the Adobe PDF Services
//! **Extract API**.
//!
//! ## Why a cloud service?
//!
//! Local text extraction falls over on scanned pages, multi-column layouts,
//! and documents where reading order differs from content-stream order. The
//! Extract API runs Adobe's own OCR and layout analysis server-side and
//! returns every content element with its page number in reading order —
//! this crate is deliberately a thin, well-typed client around that service,
//! not an extraction engine of its own.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Upload    create a cloud asset, PUT the file bytes
//!  ├─ 2. Submit    POST the extract job (text elements)
//!  ├─ 3. Fetch     poll until done, download the result ZIP,
//!  │               parse structuredData.json
//!  └─ 4. Assemble  group text fragments into one Document per page
//! ```
//!
//! Control flow is strictly linear; each stage's return value feeds the next.
//! There is no local retry, caching, or cancellation — failure at any stage
//! aborts the call with a typed [`ExtractError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use adobe_pdf_extract::ExtractReader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credentials from https://developer.adobe.com/document-services/
//!     let reader = ExtractReader::new(
//!         std::env::var("PDF_SERVICES_CLIENT_ID")?,
//!         std::env::var("PDF_SERVICES_CLIENT_SECRET")?,
//!     )?;
//!     for doc in reader.load_data("report.pdf").await? {
//!         println!("── page {:?} ──\n{}", doc.page_number(), doc.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfextract` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! adobe-pdf-extract = { version = "0.2", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{AssetHandle, ElementType, ExtractJob, JobLocation, PdfServices, ResultAsset};
pub use config::{ExtractConfig, ExtractConfigBuilder, DEFAULT_BASE_URL};
pub use error::ExtractError;
pub use extract::{ExtractReader, LoadOptions};
pub use output::{Document, PAGE_NUMBER_KEY};
pub use pipeline::result::{Element, StructuredOutput, STRUCTURED_DATA_ENTRY};

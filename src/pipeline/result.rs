//! Result stage: await job completion, download the result archive, and
//! parse the structured-data entry.
//!
//! The service delivers results as a ZIP archive containing a single JSON
//! document, `structuredData.json`, whose top-level `elements` array lists
//! every extracted content element in reading order. A missing entry, broken
//! JSON, or an absent `elements` key each fail explicitly with
//! [`ExtractError::MalformedResult`] here, at the point the defect is
//! observable — never as a downstream dereference.

use crate::client::{JobLocation, PdfServices};
use crate::error::ExtractError;
use serde::Deserialize;
use std::io::Cursor;
use tracing::debug;

/// Name of the archive entry holding the extraction output.
pub const STRUCTURED_DATA_ENTRY: &str = "structuredData.json";

/// Parsed `structuredData.json`: a flat list of content elements.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredOutput {
    pub elements: Vec<Element>,
}

/// One content element. Only the text and page fields matter for assembly;
/// everything else the service emits (paths, bounds, fonts) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    #[serde(rename = "Text")]
    pub text: Option<String>,
    #[serde(rename = "Page")]
    pub page: Option<u64>,
}

/// Block until the job finishes, then download and parse its result.
pub async fn fetch_result(
    client: &PdfServices,
    location: &JobLocation,
) -> Result<StructuredOutput, ExtractError> {
    let asset = client.wait_for_result(location).await?;
    let archive = client.download(&asset).await?;
    parse_archive(&archive)
}

/// Extract and deserialize [`STRUCTURED_DATA_ENTRY`] from the archive bytes.
pub(crate) fn parse_archive(bytes: &[u8]) -> Result<StructuredOutput, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::MalformedResult {
            detail: format!("result is not a readable ZIP archive: {e}"),
        })?;

    let entry = match archive.by_name(STRUCTURED_DATA_ENTRY) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ExtractError::MalformedResult {
                detail: format!("archive has no {STRUCTURED_DATA_ENTRY} entry"),
            });
        }
        Err(e) => {
            return Err(ExtractError::MalformedResult {
                detail: format!("failed to open {STRUCTURED_DATA_ENTRY}: {e}"),
            });
        }
    };

    let output: StructuredOutput =
        serde_json::from_reader(entry).map_err(|e| ExtractError::MalformedResult {
            detail: format!("{STRUCTURED_DATA_ENTRY} is not valid extraction JSON: {e}"),
        })?;

    debug!(elements = output.elements.len(), "Parsed structured data");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn archive_with(entry_name: &str, content: &[u8]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(entry_name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn parses_elements_from_archive() {
        let json = br#"{"version":{"json_export":"1.2.0"},"elements":[
            {"Text":"Hello","Page":0,"Path":"//Document/P"},
            {"Page":0,"Path":"//Document/Figure"},
            {"Text":"Second page","Page":1}
        ]}"#;
        let zip = archive_with(STRUCTURED_DATA_ENTRY, json);
        let out = parse_archive(&zip).unwrap();
        assert_eq!(out.elements.len(), 3);
        assert_eq!(out.elements[0].text.as_deref(), Some("Hello"));
        assert_eq!(out.elements[0].page, Some(0));
        assert!(out.elements[1].text.is_none());
        assert_eq!(out.elements[2].page, Some(1));
    }

    #[test]
    fn missing_entry_is_malformed() {
        let zip = archive_with("somethingElse.json", b"{\"elements\":[]}");
        let err = parse_archive(&zip).unwrap_err();
        match err {
            ExtractError::MalformedResult { detail } => {
                assert!(detail.contains(STRUCTURED_DATA_ENTRY), "got: {detail}");
            }
            other => panic!("expected MalformedResult, got {other:?}"),
        }
    }

    #[test]
    fn invalid_json_is_malformed() {
        let zip = archive_with(STRUCTURED_DATA_ENTRY, b"{not json at all");
        let err = parse_archive(&zip).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedResult { .. }));
    }

    #[test]
    fn missing_elements_key_is_malformed() {
        let zip = archive_with(STRUCTURED_DATA_ENTRY, br#"{"version":"1.0"}"#);
        let err = parse_archive(&zip).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedResult { .. }));
    }

    #[test]
    fn not_a_zip_is_malformed() {
        let err = parse_archive(b"%PDF-1.7 certainly not a zip").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedResult { .. }));
    }

    #[test]
    fn empty_elements_array_is_valid() {
        let zip = archive_with(STRUCTURED_DATA_ENTRY, br#"{"elements":[]}"#);
        let out = parse_archive(&zip).unwrap();
        assert!(out.elements.is_empty());
    }
}

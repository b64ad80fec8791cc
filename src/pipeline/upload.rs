//! Upload stage: validate the local file and hand its bytes to the service.
//!
//! Validation happens before any network traffic: the path must denote an
//! existing, readable regular file whose first bytes are the `%PDF` magic.
//! The service would reject a non-PDF anyway, but only after a full upload
//! round-trip and with a far less useful error.

use crate::client::{AssetHandle, PdfServices, PDF_MEDIA_TYPE};
use crate::error::ExtractError;
use std::path::Path;
use tracing::debug;

/// Read the file at `path` and upload it, returning the asset handle.
pub async fn upload_pdf(
    client: &PdfServices,
    path: &Path,
) -> Result<AssetHandle, ExtractError> {
    let bytes = read_pdf_bytes(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Uploading PDF");
    client.upload(bytes, PDF_MEDIA_TYPE).await
}

/// Read and validate the source file's full byte content.
pub(crate) fn read_pdf_bytes(path: &Path) -> Result<Vec<u8>, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(ExtractError::InvalidInput {
            input: path.display().to_string(),
        });
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ExtractError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(ExtractError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    if bytes.len() >= 4 && &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..4]);
        return Err(ExtractError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }

    Ok(bytes)
}

//! REST session against the Adobe PDF Services API.
//!
//! There is no official Rust SDK for PDF Services, so this module speaks the
//! documented HTTP surface directly:
//!
//! * `POST /token` — OAuth server-to-server credential exchange
//! * `POST /assets` — create an asset, returning a presigned upload URI
//! * `PUT <uploadUri>` — upload the raw document bytes
//! * `POST /operation/extractpdf` — submit the extraction job (201 + Location)
//! * `GET <location>` — poll job status until `done` / `failed`
//! * `GET <downloadUri>` — download the result archive
//!
//! The access token is fetched lazily on first use and cached until shortly
//! before it expires, so a single [`PdfServices`] session can serve many
//! extractions without re-authenticating.

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Media type declared when uploading the source document.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Refresh the cached token this long before its actual expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Opaque reference to an uploaded file within the service's storage.
///
/// Returned by [`PdfServices::upload`], consumed by the job submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHandle {
    asset_id: String,
}

impl AssetHandle {
    pub(crate) fn new(asset_id: String) -> Self {
        Self { asset_id }
    }

    pub fn id(&self) -> &str {
        &self.asset_id
    }
}

/// Opaque reference to a submitted extraction job (its status URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobLocation {
    url: String,
}

impl JobLocation {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Cloud asset holding the finished result archive.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultAsset {
    #[serde(rename = "downloadUri")]
    download_uri: String,
}

/// Job descriptor for `POST /operation/extractpdf`.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractJob {
    #[serde(rename = "assetID")]
    pub asset_id: String,
    #[serde(rename = "elementsToExtract")]
    pub elements_to_extract: Vec<ElementType>,
}

/// Element classes the service can be asked to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Tables,
}

// ── Wire types (responses) ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Token lifetime in seconds (typically 86399).
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct CreateAssetResponse {
    #[serde(rename = "assetID")]
    asset_id: String,
    #[serde(rename = "uploadUri")]
    upload_uri: String,
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    status: String,
    /// Present once `status == "done"`.
    resource: Option<ResultAsset>,
    /// Present once `status == "failed"`.
    error: Option<JobError>,
}

#[derive(Debug, Deserialize)]
struct JobError {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

// ── Session ──────────────────────────────────────────────────────────────

/// Stateful session against the PDF Services API.
///
/// Cheap to share by reference: all methods take `&self`, and the only
/// interior state is the cached access token behind an async mutex.
#[derive(Debug)]
pub struct PdfServices {
    http: reqwest::Client,
    config: ExtractConfig,
    token: Mutex<Option<CachedToken>>,
}

impl PdfServices {
    /// Build a session from a validated config.
    pub fn new(config: ExtractConfig) -> Result<Self, ExtractError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| ExtractError::Internal(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            http,
            config,
            token: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Return a valid access token, exchanging credentials if the cached one
    /// is absent or about to expire.
    async fn access_token(&self) -> Result<String, ExtractError> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.value.clone());
            }
        }

        debug!("Exchanging credentials for an access token");
        let resp = self
            .http
            .post(self.endpoint("/token"))
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|source| ExtractError::Transport {
                operation: "token",
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(ExtractError::AuthFailed {
                status: status.as_u16(),
                detail,
            });
        }

        let token: TokenResponse =
            resp.json()
                .await
                .map_err(|source| ExtractError::Transport {
                    operation: "token",
                    source,
                })?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *guard = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    /// Upload raw document bytes, returning the asset handle.
    ///
    /// Two round-trips: create the asset record, then PUT the bytes to the
    /// presigned URI (which carries its own authorisation).
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        media_type: &str,
    ) -> Result<AssetHandle, ExtractError> {
        let token = self.access_token().await?;

        let resp = self
            .http
            .post(self.endpoint("/assets"))
            .bearer_auth(&token)
            .header("x-api-key", &self.config.client_id)
            .json(&serde_json::json!({ "mediaType": media_type }))
            .send()
            .await
            .map_err(|source| ExtractError::Transport {
                operation: "create asset",
                source,
            })?;
        let resp = check("create asset", resp).await?;
        let asset: CreateAssetResponse =
            resp.json()
                .await
                .map_err(|source| ExtractError::Transport {
                    operation: "create asset",
                    source,
                })?;

        debug!(asset_id = %asset.asset_id, bytes = bytes.len(), "Uploading document");
        let resp = self
            .http
            .put(&asset.upload_uri)
            .header(reqwest::header::CONTENT_TYPE, media_type)
            .body(bytes)
            .send()
            .await
            .map_err(|source| ExtractError::Transport {
                operation: "upload",
                source,
            })?;
        check("upload", resp).await?;

        Ok(AssetHandle::new(asset.asset_id))
    }

    /// Submit an extraction job; the job's status URL arrives in the
    /// `Location` response header.
    pub async fn submit(&self, job: &ExtractJob) -> Result<JobLocation, ExtractError> {
        let token = self.access_token().await?;

        let resp = self
            .http
            .post(self.endpoint("/operation/extractpdf"))
            .bearer_auth(&token)
            .header("x-api-key", &self.config.client_id)
            .json(job)
            .send()
            .await
            .map_err(|source| ExtractError::Transport {
                operation: "submit",
                source,
            })?;
        let resp = check("submit", resp).await?;

        let location = resp
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ExtractError::MalformedResult {
                detail: "job submission response carried no Location header".into(),
            })?;

        info!(%location, "Extraction job submitted");
        Ok(JobLocation { url: location })
    }

    /// Poll the job location until it reports `done`, returning the result
    /// asset reference.
    ///
    /// Polls at a fixed interval (`poll_interval_ms`) up to an overall
    /// deadline (`poll_timeout_secs`). A `failed` status aborts with
    /// [`ExtractError::JobFailed`]; the remote error text is carried through.
    pub async fn wait_for_result(
        &self,
        location: &JobLocation,
    ) -> Result<ResultAsset, ExtractError> {
        let deadline = Instant::now() + Duration::from_secs(self.config.poll_timeout_secs);
        let interval = Duration::from_millis(self.config.poll_interval_ms);

        loop {
            let token = self.access_token().await?;
            let resp = self
                .http
                .get(&location.url)
                .bearer_auth(&token)
                .header("x-api-key", &self.config.client_id)
                .send()
                .await
                .map_err(|source| ExtractError::Transport {
                    operation: "poll",
                    source,
                })?;
            let resp = check("poll", resp).await?;
            let job: JobStatus = resp
                .json()
                .await
                .map_err(|source| ExtractError::Transport {
                    operation: "poll",
                    source,
                })?;

            match job.status.as_str() {
                "done" => {
                    return job.resource.ok_or_else(|| ExtractError::MalformedResult {
                        detail: "job reported done but no result resource was attached".into(),
                    });
                }
                "failed" => {
                    let detail = match job.error {
                        Some(JobError { code, message }) => format!(
                            "{}: {}",
                            code.as_deref().unwrap_or("UNKNOWN"),
                            message.as_deref().unwrap_or("no message"),
                        ),
                        None => "service reported failure without detail".into(),
                    };
                    return Err(ExtractError::JobFailed { detail });
                }
                other => debug!(status = other, "Job still running"),
            }

            if Instant::now() >= deadline {
                return Err(ExtractError::PollTimeout {
                    secs: self.config.poll_timeout_secs,
                });
            }
            tokio::time::sleep(interval).await;
        }
    }

    /// Download the result asset's bytes (the ZIP archive).
    pub async fn download(&self, asset: &ResultAsset) -> Result<Vec<u8>, ExtractError> {
        let resp = self
            .http
            .get(&asset.download_uri)
            .send()
            .await
            .map_err(|source| ExtractError::Transport {
                operation: "download",
                source,
            })?;
        let resp = check("download", resp).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|source| ExtractError::Transport {
                operation: "download",
                source,
            })?;
        debug!(bytes = bytes.len(), "Result archive downloaded");
        Ok(bytes.to_vec())
    }
}

/// Map a non-success response into [`ExtractError::ServiceError`], keeping
/// the body verbatim.
async fn check(
    operation: &'static str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ExtractError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ExtractError::ServiceError {
        operation,
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractConfig;

    fn test_config() -> ExtractConfig {
        ExtractConfig::builder()
            .client_id("id")
            .client_secret("secret")
            .base_url("http://localhost:9999/")
            .build()
            .unwrap()
    }

    #[test]
    fn endpoint_join() {
        let svc = PdfServices::new(test_config()).unwrap();
        assert_eq!(svc.endpoint("/token"), "http://localhost:9999/token");
        assert_eq!(svc.endpoint("/assets"), "http://localhost:9999/assets");
    }

    #[test]
    fn extract_job_wire_format() {
        let job = ExtractJob {
            asset_id: "urn:aaid:AS:123".into(),
            elements_to_extract: vec![ElementType::Text],
        };
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "assetID": "urn:aaid:AS:123",
                "elementsToExtract": ["text"],
            })
        );
    }

    #[test]
    fn job_status_done_parses_resource() {
        let job: JobStatus = serde_json::from_str(
            r#"{"status":"done","resource":{"downloadUri":"https://dl.example/r.zip","assetID":"urn:x"}}"#,
        )
        .unwrap();
        assert_eq!(job.status, "done");
        assert_eq!(
            job.resource.unwrap().download_uri,
            "https://dl.example/r.zip"
        );
    }

    #[test]
    fn job_status_failed_parses_error() {
        let job: JobStatus = serde_json::from_str(
            r#"{"status":"failed","error":{"code":"QUOTA_EXCEEDED","message":"out of credits","status":429}}"#,
        )
        .unwrap();
        assert_eq!(job.status, "failed");
        let err = job.error.unwrap();
        assert_eq!(err.code.as_deref(), Some("QUOTA_EXCEEDED"));
        assert_eq!(err.message.as_deref(), Some("out of credits"));
    }

    #[test]
    fn job_status_in_progress() {
        let job: JobStatus = serde_json::from_str(r#"{"status":"in progress"}"#).unwrap();
        assert_eq!(job.status, "in progress");
        assert!(job.resource.is_none());
        assert!(job.error.is_none());
    }

    #[test]
    fn token_response_parses() {
        let t: TokenResponse = serde_json::from_str(
            r#"{"access_token":"eyJ...","token_type":"bearer","expires_in":86399}"#,
        )
        .unwrap();
        assert_eq!(t.access_token, "eyJ...");
        assert_eq!(t.expires_in, 86399);
    }
}

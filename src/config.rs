//! Configuration for the Extract API session.
//!
//! All behaviour is controlled through [`ExtractConfig`], built via its
//! [`ExtractConfigBuilder`]. Credentials are validated at build time, so a
//! misconfigured session fails before any network call is made — the first
//! point the service itself can reject them is the token exchange.

use crate::error::ExtractError;
use std::fmt;

/// Default service endpoint. Overridable for regional endpoints
/// (e.g. `https://pdf-services-ew1.adobe.io`) or a local test server.
pub const DEFAULT_BASE_URL: &str = "https://pdf-services.adobe.io";

/// Configuration for an Extract API session.
///
/// Built via [`ExtractConfig::builder()`].
///
/// # Example
/// ```rust
/// use adobe_pdf_extract::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .client_id("my-client-id")
///     .client_secret("my-client-secret")
///     .poll_interval_ms(1000)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractConfig {
    /// OAuth server-to-server client id (also sent as the `x-api-key` header).
    pub client_id: String,

    /// OAuth server-to-server client secret.
    pub client_secret: String,

    /// Request figure/table renditions in addition to text. Default: false.
    ///
    /// Accepted but not yet wired into the job parameters; extraction always
    /// requests TEXT elements only.
    // TODO: send `renditionsToExtract` in the job descriptor when this is set.
    pub extract_images: bool,

    /// Service endpoint, without a trailing slash. Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,

    /// Per-request HTTP timeout in seconds. Default: 60.
    ///
    /// Applies to each individual round-trip (token, asset creation, upload,
    /// submit, status poll, download), not to the job as a whole.
    pub api_timeout_secs: u64,

    /// Delay between job-status polls in milliseconds. Default: 2000.
    ///
    /// Extract jobs on a few-page document typically finish in 5–15 s; polling
    /// faster than once a second only burns request quota.
    pub poll_interval_ms: u64,

    /// Overall deadline for job completion in seconds. Default: 600.
    ///
    /// Large scanned documents can run for minutes on the service side. When
    /// the deadline passes the pipeline aborts with
    /// [`ExtractError::PollTimeout`]; the remote job is left to expire on its
    /// own (the API offers no cancellation).
    pub poll_timeout_secs: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            extract_images: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_timeout_secs: 60,
            poll_interval_ms: 2000,
            poll_timeout_secs: 600,
        }
    }
}

// Manual Debug so the client secret never lands in logs.
impl fmt::Debug for ExtractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("extract_images", &self.extract_images)
            .field("base_url", &self.base_url)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

impl ExtractConfig {
    /// Create a new builder for `ExtractConfig`.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder {
            config: Self::default(),
        }
    }

    /// Shorthand for a config with just credentials and defaults elsewhere.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ExtractError> {
        Self::builder()
            .client_id(client_id)
            .client_secret(client_secret)
            .build()
    }
}

/// Builder for [`ExtractConfig`].
#[derive(Debug)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.config.client_id = id.into();
        self
    }

    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.client_secret = secret.into();
        self
    }

    pub fn extract_images(mut self, v: bool) -> Self {
        self.config.extract_images = v;
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms.max(100);
        self
    }

    pub fn poll_timeout_secs(mut self, secs: u64) -> Self {
        self.config.poll_timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractConfig, ExtractError> {
        let c = &self.config;
        if c.client_id.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "client_id must not be empty".into(),
            ));
        }
        if c.client_secret.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "client_secret must not be empty".into(),
            ));
        }
        if c.base_url.is_empty() {
            return Err(ExtractError::InvalidConfig(
                "base_url must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let c = ExtractConfig::new("id", "secret").unwrap();
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.api_timeout_secs, 60);
        assert_eq!(c.poll_interval_ms, 2000);
        assert_eq!(c.poll_timeout_secs, 600);
        assert!(!c.extract_images);
    }

    #[test]
    fn empty_client_id_rejected() {
        let err = ExtractConfig::builder()
            .client_id("")
            .client_secret("s")
            .build()
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)));
    }

    #[test]
    fn empty_client_secret_rejected() {
        let err = ExtractConfig::builder()
            .client_id("id")
            .client_secret("   ")
            .build()
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)));
    }

    #[test]
    fn base_url_trailing_slash_stripped() {
        let c = ExtractConfig::builder()
            .client_id("id")
            .client_secret("s")
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();
        assert_eq!(c.base_url, "http://localhost:8080");
    }

    #[test]
    fn debug_redacts_secret() {
        let c = ExtractConfig::new("id", "super-secret").unwrap();
        let dbg = format!("{:?}", c);
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn poll_interval_floor() {
        let c = ExtractConfig::builder()
            .client_id("id")
            .client_secret("s")
            .poll_interval_ms(0)
            .build()
            .unwrap();
        assert_eq!(c.poll_interval_ms, 100);
    }
}

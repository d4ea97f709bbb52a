//! Provider configuration.
//!
//! Every field can be set explicitly; the host and API key fall back to
//! `SUPERSTAQ_REMOTE_HOST` and `SUPERSTAQ_API_KEY`.

use std::time::Duration;

use crate::error::{ProviderError, ProviderResult};

/// Default Superstaq service host.
pub const API_URL: &str = "https://superstaq.super.tech";

/// API version appended to the host.
pub const API_VERSION: &str = "v0.1.0";

/// Environment variable overriding the service host.
pub const REMOTE_HOST_ENV: &str = "SUPERSTAQ_REMOTE_HOST";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "SUPERSTAQ_API_KEY";

/// Default budget for retrying transient failures.
pub const DEFAULT_MAX_RETRY: Duration = Duration::from_secs(3600);

/// Connection settings for a [`SuperstaqProvider`](crate::SuperstaqProvider).
#[derive(Clone)]
pub struct ProviderConfig {
    /// Service host, without the API version.
    pub remote_host: String,
    /// API key sent in the `Authorization` header.
    pub api_key: String,
    /// Job target such as `"qpu"` or `"simulator"`. Compile calls use
    /// their own targets and ignore this.
    pub default_target: Option<String>,
    /// API version path segment.
    pub api_version: String,
    /// How long transient failures are retried.
    pub max_retry_duration: Duration,
    /// Log retries at `warn` instead of `debug`.
    pub verbose: bool,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("remote_host", &self.remote_host)
            .field("api_key", &"[REDACTED]")
            .field("default_target", &self.default_target)
            .field("api_version", &self.api_version)
            .field("max_retry_duration", &self.max_retry_duration)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl ProviderConfig {
    /// Configuration with an explicit API key and default everything else.
    ///
    /// The host is still taken from `SUPERSTAQ_REMOTE_HOST` when set.
    pub fn new(api_key: impl Into<String>) -> ProviderResult<Self> {
        Self::from_lookup(Some(api_key.into()), None, |key| std::env::var(key).ok())
    }

    /// Configuration read entirely from the environment.
    pub fn from_env() -> ProviderResult<Self> {
        Self::from_lookup(None, None, |key| std::env::var(key).ok())
    }

    /// Resolve explicit values against an environment lookup.
    ///
    /// Fails with [`ProviderError::MissingApiKey`] if neither source
    /// provides a non-empty key.
    pub fn from_lookup(
        api_key: Option<String>,
        remote_host: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ProviderResult<Self> {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .or_else(|| lookup(API_KEY_ENV).filter(|k| !k.is_empty()))
            .ok_or(ProviderError::MissingApiKey)?;
        let remote_host = remote_host
            .filter(|h| !h.is_empty())
            .or_else(|| lookup(REMOTE_HOST_ENV).filter(|h| !h.is_empty()))
            .unwrap_or_else(|| API_URL.to_string());

        Ok(Self {
            remote_host: remote_host.trim_end_matches('/').to_string(),
            api_key,
            default_target: None,
            api_version: API_VERSION.to_string(),
            max_retry_duration: DEFAULT_MAX_RETRY,
            verbose: false,
        })
    }

    /// Set the service host.
    pub fn with_remote_host(mut self, host: impl Into<String>) -> Self {
        self.remote_host = host.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the default target.
    pub fn with_default_target(mut self, target: impl Into<String>) -> Self {
        self.default_target = Some(target.into());
        self
    }

    /// Set the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the retry budget.
    pub fn with_max_retry_duration(mut self, duration: Duration) -> Self {
        self.max_retry_duration = duration;
        self
    }

    /// Enable or disable loud retry logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// `{remote_host}/{api_version}`.
    pub fn base_url(&self) -> String {
        format!("{}/{}", self.remote_host, self.api_version)
    }
}

//! Superstaq REST client.
//!
//! Thin JSON-over-HTTP layer with retry: 503 responses and connection
//! failures are retried with a doubling delay until the configured budget
//! is spent.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, StatusCode};
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};

/// Name sent in the `X-Client-Name` header.
pub const CLIENT_NAME: &str = "qss-provider";

/// Delay before the first retry.
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(100);

/// HTTP client for the Superstaq API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct SuperstaqClient {
    http: Client,
    config: Arc<ProviderConfig>,
    base_url: String,
}

impl std::fmt::Debug for SuperstaqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuperstaqClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl SuperstaqClient {
    /// Create a client for the given configuration.
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(ProviderError::Http)?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            config: Arc::new(config),
        })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// `{remote_host}/{api_version}`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request, retrying transient failures.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> ProviderResult<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let started = Instant::now();
        let mut delay = INITIAL_RETRY_DELAY;

        loop {
            debug!("{} {}", method, url);
            let mut req = self
                .http
                .request(method.clone(), &url)
                .header("Authorization", &self.config.api_key)
                .header("Content-Type", "application/json")
                .header("X-Client-Name", CLIENT_NAME)
                .header("X-Client-Version", &self.config.api_version);
            if let Some(body) = body {
                req = req.json(body);
            }

            let last_error = match req.send().await {
                Ok(resp) if resp.status().is_success() => return Ok(resp.json().await?),
                Ok(resp) => {
                    let status = resp.status();
                    let message = resp.text().await.unwrap_or_default();
                    match status {
                        StatusCode::UNAUTHORIZED => {
                            return Err(ProviderError::Unauthorized(message));
                        }
                        StatusCode::SERVICE_UNAVAILABLE => ProviderError::ApiError {
                            status: status.as_u16(),
                            message,
                        }
                        .to_string(),
                        _ => {
                            return Err(ProviderError::ApiError {
                                status: status.as_u16(),
                                message,
                            });
                        }
                    }
                }
                Err(e) if e.is_connect() || e.is_timeout() => e.to_string(),
                Err(e) => return Err(e.into()),
            };

            if delay > self.config.max_retry_duration {
                return Err(ProviderError::RetryTimeout {
                    elapsed: started.elapsed(),
                    last_error,
                });
            }
            if self.config.verbose {
                warn!("{last_error}; retrying in {delay:?}");
            } else {
                debug!("{last_error}; retrying in {delay:?}");
            }
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ProviderResult<T> {
        self.request(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ProviderResult<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, Some(&body)).await
    }

    // -----------------------------------------------------------------------
    // Endpoints
    // -----------------------------------------------------------------------

    /// List the backends the service can compile for or run on.
    #[instrument(skip(self))]
    pub async fn get_backends(&self) -> ProviderResult<BackendsResponse> {
        self.get("backends").await
    }

    /// Compile serialized circuits for an AQT target.
    #[instrument(skip(self, req))]
    pub async fn aqt_compile(&self, req: &CompileRequest) -> ProviderResult<AqtCompileResponse> {
        debug!("Compiling for AQT target {}", req.target);
        self.post("aqt_compile", req).await
    }

    /// Compile serialized circuits for a QSCOUT target.
    #[instrument(skip(self, req))]
    pub async fn qscout_compile(
        &self,
        req: &CompileRequest,
    ) -> ProviderResult<QscoutCompileResponse> {
        debug!("Compiling for QSCOUT target {}", req.target);
        self.post("qscout_compile", req).await
    }

    /// Submit serialized circuits for execution.
    #[instrument(skip(self, req))]
    pub async fn create_job(&self, req: &JobRequest) -> ProviderResult<JobCreated> {
        debug!("Submitting job to {}", req.backend);
        self.post("jobs", req).await
    }

    /// Fetch one job's status and, when finished, its samples.
    #[instrument(skip(self))]
    pub async fn get_job(&self, job_id: &str) -> ProviderResult<JobResponse> {
        self.get(&format!("job/{job_id}")).await
    }

    /// Upload AQT pulse and variable configuration.
    #[instrument(skip(self, req))]
    pub async fn aqt_upload_configs(
        &self,
        req: &AqtConfigsRequest,
    ) -> ProviderResult<FxHashMap<String, String>> {
        self.post("aqt_configs", req).await
    }
}

// ---------------------------------------------------------------------------
// Request / response serde types
// ---------------------------------------------------------------------------

/// Body of the compile endpoints.
#[derive(Debug, Serialize)]
pub struct CompileRequest {
    /// Output of [`serialize_circuits`](crate::serialize_circuits).
    pub qiskit_circuits: String,
    /// Compilation target.
    pub target: String,
}

/// Backend names grouped by what the service can do with them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendList {
    /// Backends that can compile and execute.
    #[serde(rename = "compile-and-run", default)]
    pub compile_and_run: Vec<String>,
    /// Backends the service compiles for but cannot execute on.
    #[serde(rename = "compile-only", default)]
    pub compile_only: Vec<String>,
}

/// Response from `GET /backends`.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendsResponse {
    pub superstaq_backends: BackendList,
}

/// Response from `POST /aqt_compile`.
#[derive(Debug, Clone, Deserialize)]
pub struct AqtCompileResponse {
    /// Serialized compiled circuits.
    pub qiskit_circuits: String,
    /// Opaque compiler state.
    #[serde(default)]
    pub state_jp: Option<String>,
    /// JSON-encoded list with one pulse list per circuit.
    #[serde(default)]
    pub pulse_lists_jp: Option<String>,
}

/// Response from `POST /qscout_compile`.
#[derive(Debug, Clone, Deserialize)]
pub struct QscoutCompileResponse {
    /// Serialized compiled circuits.
    pub qiskit_circuits: String,
    /// One Jaqal program per circuit.
    #[serde(default)]
    pub jaqal_programs: Vec<String>,
}

/// Body of `POST /jobs`.
#[derive(Debug, Serialize)]
pub struct JobRequest {
    pub qiskit_circuits: String,
    pub backend: String,
    pub shots: u32,
}

/// Response from `POST /jobs`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobCreated {
    pub job_ids: Vec<String>,
}

/// Response from `GET /job/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobResponse {
    /// Service status string, e.g. `"Queued"` or `"Done"`.
    pub status: String,
    /// Measurement histogram, present once the job is done.
    #[serde(default)]
    pub samples: Option<FxHashMap<String, u64>>,
    /// Failure reason.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /aqt_configs`.
#[derive(Debug, Serialize)]
pub struct AqtConfigsRequest {
    pub pulses: String,
    pub variables: String,
}

//! Superstaq backends.

use std::fmt;

use qss_ir::Circuit;
use tracing::{info, instrument};

use crate::client::{JobRequest, SuperstaqClient};
use crate::error::{ProviderError, ProviderResult};
use crate::job::{JobId, SuperstaqJob};
use crate::serialization::serialize_circuits;

/// A named device or simulator reachable through Superstaq.
#[derive(Debug, Clone)]
pub struct SuperstaqBackend {
    name: String,
    remote_host: String,
    client: SuperstaqClient,
}

impl SuperstaqBackend {
    /// Backend `name` served by `client`.
    pub fn new(name: impl Into<String>, client: SuperstaqClient) -> Self {
        Self {
            name: name.into(),
            remote_host: client.config().remote_host.clone(),
            client,
        }
    }

    /// Backend name, e.g. `"ibmq_qasm_simulator"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Service host the backend is reached through.
    pub fn remote_host(&self) -> &str {
        &self.remote_host
    }

    /// Submit circuits for execution.
    ///
    /// The service creates one job per circuit; the returned handle
    /// tracks all of them.
    #[instrument(skip(self, circuits), fields(backend = %self.name))]
    pub async fn run(&self, circuits: &[Circuit], shots: u32) -> ProviderResult<SuperstaqJob> {
        if circuits.is_empty() {
            return Err(ProviderError::InvalidRequest(
                "no circuits to run".to_string(),
            ));
        }
        let req = JobRequest {
            qiskit_circuits: serialize_circuits(circuits)?,
            backend: self.name.clone(),
            shots,
        };
        let created = self.client.create_job(&req).await?;
        if created.job_ids.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "service returned no job ids".to_string(),
            ));
        }
        let id = JobId::join(&created.job_ids);
        info!("Submitted {} circuit(s) as job {}", circuits.len(), id);
        Ok(SuperstaqJob::new(id, self.name.clone(), self.client.clone()))
    }
}

impl fmt::Display for SuperstaqBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<SuperstaqBackend(name={})>", self.name)
    }
}

impl PartialEq for SuperstaqBackend {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.remote_host == other.remote_host
    }
}

impl Eq for SuperstaqBackend {}

//! Entry point to the Superstaq service.

use std::fmt;
use std::path::Path;

use qss_ir::Circuit;
use rustc_hash::FxHashMap;
use tracing::instrument;

use crate::backend::SuperstaqBackend;
use crate::client::{AqtConfigsRequest, BackendList, CompileRequest, SuperstaqClient};
use crate::compiler_output::{CompilerOutput, read_json_aqt, read_json_qscout};
use crate::config::ProviderConfig;
use crate::error::ProviderResult;
use crate::serialization::serialize_circuits;

/// Default AQT compilation target.
pub const DEFAULT_AQT_TARGET: &str = "keysight";

/// Default QSCOUT compilation target.
pub const DEFAULT_QSCOUT_TARGET: &str = "qscout";

/// Backends listed by [`SuperstaqProvider::backends`].
pub const KNOWN_BACKENDS: [&str; 7] = [
    "aqt_device",
    "ionq_device",
    "rigetti_device",
    "ibmq_botoga",
    "ibmq_casablanca",
    "ibmq_jakarta",
    "ibmq_qasm_simulator",
];

const PROVIDER_NAME: &str = "superstaq_provider";

/// Access to Superstaq compilation and execution.
///
/// ```no_run
/// use qss_provider::{ProviderConfig, SuperstaqProvider};
///
/// # async fn demo() -> qss_provider::ProviderResult<()> {
/// let provider = SuperstaqProvider::new(ProviderConfig::new("MY_TOKEN")?)?;
/// let backend = provider.get_backend("ibmq_qasm_simulator");
/// println!("{backend}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SuperstaqProvider {
    client: SuperstaqClient,
}

impl SuperstaqProvider {
    /// Create a provider from a configuration.
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        Ok(Self {
            client: SuperstaqClient::new(config)?,
        })
    }

    /// Create a provider configured from `SUPERSTAQ_API_KEY` and
    /// `SUPERSTAQ_REMOTE_HOST`.
    pub fn from_env() -> ProviderResult<Self> {
        Self::new(ProviderConfig::from_env()?)
    }

    /// Provider name.
    pub fn name(&self) -> &str {
        PROVIDER_NAME
    }

    /// The API key sent with every request.
    pub fn access_token(&self) -> &str {
        &self.client.config().api_key
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &SuperstaqClient {
        &self.client
    }

    /// Handle to the backend called `name`.
    pub fn get_backend(&self, name: &str) -> SuperstaqBackend {
        SuperstaqBackend::new(name, self.client.clone())
    }

    /// Handles to the backends this client knows about without asking the
    /// service.
    pub fn backends(&self) -> Vec<SuperstaqBackend> {
        KNOWN_BACKENDS
            .iter()
            .map(|name| self.get_backend(name))
            .collect()
    }

    /// Ask the service which backends it currently supports.
    pub async fn fetch_backends(&self) -> ProviderResult<BackendList> {
        Ok(self.client.get_backends().await?.superstaq_backends)
    }

    async fn aqt(
        &self,
        circuits: &[Circuit],
        target: Option<&str>,
        is_list: bool,
    ) -> ProviderResult<CompilerOutput> {
        let req = compile_request(circuits, target, DEFAULT_AQT_TARGET)?;
        read_json_aqt(self.client.aqt_compile(&req).await?, is_list)
    }

    async fn qscout(
        &self,
        circuits: &[Circuit],
        target: Option<&str>,
        is_list: bool,
    ) -> ProviderResult<CompilerOutput> {
        let req = compile_request(circuits, target, DEFAULT_QSCOUT_TARGET)?;
        read_json_qscout(self.client.qscout_compile(&req).await?, is_list)
    }

    /// Compile one circuit to the AQT native gate set.
    ///
    /// `target` defaults to `"keysight"`. Read the result with [`CompilerOutput::circuit`] and
    /// [`CompilerOutput::pulse_list`].
    #[instrument(skip(self, circuit))]
    pub async fn aqt_compile(
        &self,
        circuit: &Circuit,
        target: Option<&str>,
    ) -> ProviderResult<CompilerOutput> {
        self.aqt(std::slice::from_ref(circuit), target, false).await
    }

    /// Compile several circuits to the AQT native gate set.
    #[instrument(skip(self, circuits))]
    pub async fn aqt_compile_many(
        &self,
        circuits: &[Circuit],
        target: Option<&str>,
    ) -> ProviderResult<CompilerOutput> {
        self.aqt(circuits, target, true).await
    }

    /// Compile one circuit for QSCOUT. `target` defaults to `"qscout"`.
    #[instrument(skip(self, circuit))]
    pub async fn qscout_compile(
        &self,
        circuit: &Circuit,
        target: Option<&str>,
    ) -> ProviderResult<CompilerOutput> {
        self.qscout(std::slice::from_ref(circuit), target, false)
            .await
    }

    /// Compile several circuits for QSCOUT.
    #[instrument(skip(self, circuits))]
    pub async fn qscout_compile_many(
        &self,
        circuits: &[Circuit],
        target: Option<&str>,
    ) -> ProviderResult<CompilerOutput> {
        self.qscout(circuits, target, true).await
    }

    /// Upload AQT pulse and variable configuration files.
    #[instrument(skip(self))]
    pub async fn aqt_upload_configs(
        &self,
        pulses_path: &Path,
        variables_path: &Path,
    ) -> ProviderResult<FxHashMap<String, String>> {
        let req = AqtConfigsRequest {
            pulses: tokio::fs::read_to_string(pulses_path).await?,
            variables: tokio::fs::read_to_string(variables_path).await?,
        };
        self.client.aqt_upload_configs(&req).await
    }
}

/// Compile targets are fixed per compiler; `default_target` does not apply.
fn compile_request(
    circuits: &[Circuit],
    target: Option<&str>,
    fallback: &str,
) -> ProviderResult<CompileRequest> {
    Ok(CompileRequest {
        qiskit_circuits: serialize_circuits(circuits)?,
        target: target.unwrap_or(fallback).to_string(),
    })
}

impl fmt::Display for SuperstaqProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<SuperstaqProvider(name={})>", PROVIDER_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SuperstaqProvider {
        let config = ProviderConfig::from_lookup(Some("MY_TOKEN".into()), None, |_| None).unwrap();
        SuperstaqProvider::new(config).unwrap()
    }

    #[test]
    fn test_access_token() {
        assert_eq!(provider().access_token(), "MY_TOKEN");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            provider().to_string(),
            "<SuperstaqProvider(name=superstaq_provider)>"
        );
    }

    #[test]
    fn test_debug_hides_key() {
        assert!(!format!("{:?}", provider()).contains("MY_TOKEN"));
    }

    #[test]
    fn test_get_backend() {
        let p = provider();
        let backend = p.get_backend("ibmq_qasm_simulator");
        assert_eq!(backend.name(), "ibmq_qasm_simulator");
        assert_eq!(backend.remote_host(), crate::config::API_URL);
        assert_eq!(backend, SuperstaqBackend::new("ibmq_qasm_simulator", p.client().clone()));
    }

    #[test]
    fn test_fixed_backend_list() {
        let p = provider();
        let names: Vec<_> = p.backends().iter().map(|b| b.name().to_string()).collect();
        assert_eq!(names, KNOWN_BACKENDS);
    }

    #[test]
    fn test_compile_target_fallback() {
        let circuits = [Circuit::bell().unwrap()];
        let req = compile_request(&circuits, None, DEFAULT_AQT_TARGET).unwrap();
        assert_eq!(req.target, "keysight");
        let req = compile_request(&circuits, Some("other"), DEFAULT_AQT_TARGET).unwrap();
        assert_eq!(req.target, "other");
        let req = compile_request(&circuits, None, DEFAULT_QSCOUT_TARGET).unwrap();
        assert_eq!(req.target, "qscout");
    }
}

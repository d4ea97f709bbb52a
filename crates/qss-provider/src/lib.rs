//! Superstaq Provider
//!
//! Client for the Superstaq cloud service: compile circuits for AQT and
//! QSCOUT hardware, list backends, and run jobs.
//!
//! # Configuration
//!
//! ```bash
//! export SUPERSTAQ_API_KEY="your-api-key"
//! # optional, defaults to https://superstaq.super.tech
//! export SUPERSTAQ_REMOTE_HOST="https://superstaq.super.tech"
//! ```
//!
//! Construction fails immediately if no API key is available.
//!
//! # Retries
//!
//! `503 Service Unavailable` responses and connection failures are retried
//! with a delay starting at 100 ms and doubling each time, until the next
//! delay would exceed [`ProviderConfig::max_retry_duration`] (one hour by
//! default). `401` fails at once with [`ProviderError::Unauthorized`].
//!
//! # Example
//!
//! ```no_run
//! use qss_ir::Circuit;
//! use qss_provider::SuperstaqProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = SuperstaqProvider::from_env()?;
//!
//!     let circuit = Circuit::bell()?;
//!     let out = provider.aqt_compile(&circuit, None).await?;
//!     if let Some(compiled) = out.circuit() {
//!         println!("{} gates after compilation", compiled.len());
//!     }
//!
//!     let job = provider
//!         .get_backend("ibmq_qasm_simulator")
//!         .run(&[circuit], 100)
//!         .await?;
//!     let counts = job
//!         .wait(
//!             std::time::Duration::from_secs(1),
//!             std::time::Duration::from_secs(300),
//!         )
//!         .await?;
//!     println!("{}", counts[0]);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod client;
pub mod compiler_output;
pub mod config;
pub mod error;
pub mod job;
pub mod provider;
pub mod result;
pub mod serialization;

pub use backend::SuperstaqBackend;
pub use client::{BackendList, SuperstaqClient};
pub use compiler_output::CompilerOutput;
pub use config::{API_URL, API_VERSION, ProviderConfig};
pub use error::{ProviderError, ProviderResult};
pub use job::{JobId, JobStatus, SuperstaqJob};
pub use provider::{DEFAULT_AQT_TARGET, DEFAULT_QSCOUT_TARGET, KNOWN_BACKENDS, SuperstaqProvider};
pub use result::Counts;
pub use serialization::{deserialize_circuits, serialize_circuits};

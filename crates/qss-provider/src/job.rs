//! Remote job handles.
//!
//! One submission can create several service-side jobs, one per circuit.
//! A [`SuperstaqJob`] tracks all of them under a comma-joined id and
//! reports a single combined status:
//!
//! ```text
//!   Queued ──→ Running ──→ Completed
//!     │           │
//!     │           ├──→ Failed(reason)
//!     └───────────┴──→ Cancelled
//! ```
//!
//! The combined status is the least advanced sub-job status, except that
//! any failure makes the whole job failed.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::SuperstaqClient;
use crate::error::{ProviderError, ProviderResult};
use crate::result::Counts;

/// Identifier of a submission, possibly covering several remote jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Join remote job ids into one.
    pub fn join<S: AsRef<str>>(ids: &[S]) -> Self {
        Self(
            ids.iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    /// The remote job ids this id covers.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.0.split(',').filter(|s| !s.is_empty())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job is waiting in queue.
    Queued,
    /// Job is currently running.
    Running,
    /// Job completed successfully.
    Completed,
    /// Job failed with an error message.
    Failed(String),
    /// Job was cancelled.
    Cancelled,
}

impl JobStatus {
    /// Map a service status string.
    ///
    /// Returns `None` for strings the service is not known to send.
    pub fn from_remote(status: &str, message: Option<&str>) -> Option<Self> {
        let status = match status.to_ascii_lowercase().as_str() {
            "queued" | "submitted" => JobStatus::Queued,
            "running" => JobStatus::Running,
            "done" | "completed" => JobStatus::Completed,
            "error" | "failed" => JobStatus::Failed(message.unwrap_or(status).to_string()),
            "cancelled" | "deleted" => JobStatus::Cancelled,
            _ => return None,
        };
        Some(status)
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed(_) | JobStatus::Cancelled
        )
    }

    /// Check if the job is still pending (queued or running).
    pub fn is_pending(&self) -> bool {
        matches!(self, JobStatus::Queued | JobStatus::Running)
    }

    /// Check if the job completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Completed)
    }

    fn progress(&self) -> u8 {
        match self {
            JobStatus::Queued => 0,
            JobStatus::Running => 1,
            JobStatus::Cancelled => 2,
            JobStatus::Completed => 3,
            JobStatus::Failed(_) => 4,
        }
    }

    /// Combine sub-job statuses.
    ///
    /// A failure wins; otherwise the least advanced status is reported.
    /// An empty set counts as completed.
    pub fn combine(statuses: impl IntoIterator<Item = JobStatus>) -> JobStatus {
        let mut combined: Option<JobStatus> = None;
        for status in statuses {
            if matches!(status, JobStatus::Failed(_)) {
                return status;
            }
            combined = match combined {
                Some(current) if current.progress() <= status.progress() => Some(current),
                _ => Some(status),
            };
        }
        combined.unwrap_or(JobStatus::Completed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "Queued"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Failed(msg) => write!(f, "Failed: {msg}"),
            JobStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Handle to a submitted job.
#[derive(Debug, Clone)]
pub struct SuperstaqJob {
    id: JobId,
    backend: String,
    client: SuperstaqClient,
    created_at: DateTime<Utc>,
}

impl SuperstaqJob {
    /// Track an existing job.
    pub fn new(id: impl Into<JobId>, backend: impl Into<String>, client: SuperstaqClient) -> Self {
        Self {
            id: id.into(),
            backend: backend.into(),
            client,
            created_at: Utc::now(),
        }
    }

    /// The comma-joined job id.
    pub fn id(&self) -> &JobId {
        &self.id
    }

    /// Name of the backend the job runs on.
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// When this handle was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn fetch(&self) -> ProviderResult<Vec<(JobStatus, Option<Counts>)>> {
        let mut out = Vec::new();
        for part in self.id.parts() {
            let resp = self.client.get_job(part).await?;
            let status = JobStatus::from_remote(&resp.status, resp.message.as_deref())
                .ok_or_else(|| {
                    ProviderError::InvalidResponse(format!(
                        "unknown status '{}' for job {part}",
                        resp.status
                    ))
                })?;
            out.push((status, resp.samples.map(Counts::from)));
        }
        Ok(out)
    }

    /// Current combined status.
    #[instrument(skip(self), fields(job_id = %self.id))]
    pub async fn status(&self) -> ProviderResult<JobStatus> {
        let parts = self.fetch().await?;
        let status = JobStatus::combine(parts.into_iter().map(|(s, _)| s));
        debug!("Job {} is {}", self.id, status);
        Ok(status)
    }

    /// Counts for every sub-job, in submission order.
    ///
    /// Fails unless every sub-job has completed.
    #[instrument(skip(self), fields(job_id = %self.id))]
    pub async fn result(&self) -> ProviderResult<Vec<Counts>> {
        let parts = self.fetch().await?;
        match JobStatus::combine(parts.iter().map(|(s, _)| s.clone())) {
            JobStatus::Completed => {}
            JobStatus::Failed(msg) => return Err(ProviderError::JobFailed(msg)),
            JobStatus::Cancelled => return Err(ProviderError::JobCancelled(self.id.0.clone())),
            pending => {
                return Err(ProviderError::JobNotReady(format!("{} is {pending}", self.id)));
            }
        }
        parts
            .into_iter()
            .map(|(_, samples)| {
                samples.ok_or_else(|| {
                    ProviderError::InvalidResponse(format!("job {} has no samples", self.id))
                })
            })
            .collect()
    }

    /// Poll until the job reaches a terminal status, then return its counts.
    pub async fn wait(
        &self,
        poll_interval: Duration,
        timeout: Duration,
    ) -> ProviderResult<Vec<Counts>> {
        let started = Instant::now();
        loop {
            match self.status().await? {
                JobStatus::Completed => return self.result().await,
                JobStatus::Failed(msg) => return Err(ProviderError::JobFailed(msg)),
                JobStatus::Cancelled => {
                    return Err(ProviderError::JobCancelled(self.id.0.clone()));
                }
                JobStatus::Queued | JobStatus::Running => {}
            }
            if started.elapsed() >= timeout {
                return Err(ProviderError::Timeout(self.id.0.clone()));
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}

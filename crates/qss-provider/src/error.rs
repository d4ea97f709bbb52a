//! Error types for the Superstaq provider.

use std::time::Duration;

use qss_ir::IrError;
use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur when talking to Superstaq.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No API key was given and none is set in the environment.
    #[error(
        "Parameter api_key was not specified and the environment variable \
         SUPERSTAQ_API_KEY was also not set"
    )]
    MissingApiKey,

    /// The service rejected the API key.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// API returned a non-retriable error response.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Retriable failures kept occurring past the retry budget.
    #[error("Retried for {elapsed:?} without success, last error: {last_error}")]
    RetryTimeout {
        elapsed: Duration,
        last_error: String,
    },

    /// The request cannot be sent as given.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The response parsed but does not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Job execution failed.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Job was cancelled.
    #[error("Job cancelled: {0}")]
    JobCancelled(String),

    /// Results were requested before the job finished.
    #[error("Job not complete: {0}")]
    JobNotReady(String),

    /// Timeout waiting for job completion.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    /// Circuit model error.
    #[error(transparent)]
    Ir(#[from] IrError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_display() {
        let err = ProviderError::MissingApiKey;
        assert!(err.to_string().contains("SUPERSTAQ_API_KEY"));
    }

    #[test]
    fn test_api_error_display() {
        let err = ProviderError::ApiError {
            status: 400,
            message: "bad circuit".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("bad circuit"));
    }

    #[test]
    fn test_retry_timeout_display() {
        let err = ProviderError::RetryTimeout {
            elapsed: Duration::from_millis(700),
            last_error: "status 503".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("700ms"));
        assert!(msg.contains("status 503"));
    }

    #[test]
    fn test_timeout_display() {
        let err = ProviderError::Timeout("job-99".into());
        assert!(err.to_string().contains("job-99"));
    }

    #[test]
    fn test_ir_error_is_transparent() {
        let err: ProviderError = IrError::EmptyParallelGates.into();
        assert_eq!(err.to_string(), IrError::EmptyParallelGates.to_string());
    }
}

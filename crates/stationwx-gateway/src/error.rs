//! Gateway-specific error types.

use reqwest::StatusCode;
use thiserror::Error;

use crate::retry::is_retryable_status;

/// Terminal failure of an upstream query.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),
}

impl UpstreamError {
    /// Whether the failure is transient and eligible for backoff-and-retry.
    ///
    /// Transport errors, 429 and 5xx are transient; any other status is
    /// permanent and must not be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => StatusCode::from_u16(*status)
                .map(is_retryable_status)
                .unwrap_or(false),
            Self::Network(_) => true,
            Self::Url(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_and_server_errors_are_retryable() {
        for status in [429, 500, 502, 503, 599] {
            let err = UpstreamError::Status { status, detail: String::new() };
            assert!(err.is_retryable(), "{status} should be retryable");
        }
    }

    #[test]
    fn test_client_errors_are_permanent() {
        for status in [400, 401, 403, 404, 410] {
            let err = UpstreamError::Status { status, detail: String::new() };
            assert!(!err.is_retryable(), "{status} should not be retryable");
        }
    }
}

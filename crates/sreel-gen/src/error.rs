//! Generation error types.

use thiserror::Error;

pub type GenResult<T> = Result<T, GenError>;

/// Errors from one remote generation step.
///
/// Every variant is a per-scene failure at the orchestrator boundary;
/// none of them abort the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// Credentials missing at call time. Startup never fails on this;
    /// each call does, cleanly.
    #[error("generation service not configured: {0}")]
    Configuration(String),

    /// Network or HTTP failure reaching the remote service.
    #[error("remote service error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Remote call exceeded the configured bound.
    #[error("remote call timed out after {0}s")]
    Timeout(u64),

    /// The model answered with text instead of the requested media.
    #[error("model refused to generate: {0}")]
    Refusal(String),

    /// The remote response carried neither text nor usable media.
    #[error("remote service returned no usable media")]
    Malformed,

    /// The idea-expansion response could not be parsed as structured prompts.
    #[error("idea expansion failed: {0}")]
    Expansion(String),
}

impl GenError {
    /// Map a reqwest failure, distinguishing the timeout bound from
    /// other transport errors.
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            GenError::Timeout(timeout_secs)
        } else {
            GenError::Transport {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        }
    }

    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        GenError::Transport {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display_includes_status() {
        let err = GenError::transport(Some(429), "quota exceeded");
        assert_eq!(err.to_string(), "remote service error (429): quota exceeded");
    }

    #[test]
    fn test_transport_display_without_status() {
        let err = GenError::transport(None, "connection reset");
        assert_eq!(err.to_string(), "remote service error: connection reset");
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(
            GenError::Timeout(600).to_string(),
            "remote call timed out after 600s"
        );
    }
}

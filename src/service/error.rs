use thiserror::Error;

/// The exchange with the service did not complete.
///
/// Rejections are not errors; see [`Reply::Rejected`](super::Reply::Rejected).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Unreachable, connection dropped, timed out.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reached the service but could not read what it sent back.
    #[error("malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

impl ServiceError {
    pub fn transport(
        endpoint: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}

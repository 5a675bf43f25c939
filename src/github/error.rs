/// Recoverable failure while fetching raw file content.
///
/// A missing file on a branch is an ordinary outcome, so callers turn this
/// into a degraded result rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchFailure {
    /// The host answered with a non-success status
    Status { status: u16, reason: String },
    /// The request never produced a response
    Transport(String),
    /// A success response whose body could not be read
    Body(String),
}

impl FetchFailure {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
        }
    }

    pub fn from_reqwest_error(error: reqwest::Error) -> Self {
        tracing::debug!("Raw reqwest error: {:?}", error);

        if let Some(status) = error.status() {
            Self::from_status(status)
        } else if error.is_decode() || error.is_body() {
            Self::Body(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { status, reason } => write!(f, "HTTP {}: {}", status, reason),
            Self::Transport(msg) => write!(f, "Transport error: {}", msg),
            Self::Body(msg) => write!(f, "Failed to read response body: {}", msg),
        }
    }
}

impl std::error::Error for FetchFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_failure_display() {
        let failure = FetchFailure::from_status(reqwest::StatusCode::NOT_FOUND);
        assert!(failure.is_not_found());
        assert_eq!(failure.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_transport_failure_is_not_not_found() {
        let failure = FetchFailure::Transport("connection refused".to_string());
        assert!(!failure.is_not_found());
        assert_eq!(failure.to_string(), "Transport error: connection refused");
    }
}

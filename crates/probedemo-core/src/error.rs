//! Shared error type across probedemo crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Simulated work was cancelled before it finished.
    Interrupted,
    /// Fault injected on purpose by the chaos endpoint.
    SimulatedFailure,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Interrupted => "INTERRUPTED",
            ClientCode::SimulatedFailure => "SIMULATED_FAILURE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("Request interrupted")]
    Interrupted,
    #[error("Simulated error for testing!")]
    SimulatedFailure,
    #[error("internal: {0}")]
    Internal(String),
}

impl ProbeError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ProbeError::BadRequest(_) => ClientCode::BadRequest,
            ProbeError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            ProbeError::Interrupted => ClientCode::Interrupted,
            ProbeError::SimulatedFailure => ClientCode::SimulatedFailure,
            ProbeError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Whether the failure happened while serving a request (as opposed to
    /// during startup or configuration).
    pub fn is_request_failure(&self) -> bool {
        matches!(self, ProbeError::Interrupted | ProbeError::SimulatedFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_failure_message_is_client_visible() {
        let err = ProbeError::SimulatedFailure;
        assert_eq!(err.to_string(), "Simulated error for testing!");
        assert_eq!(err.client_code().as_str(), "SIMULATED_FAILURE");
        assert!(err.is_request_failure());
    }

    #[test]
    fn config_errors_are_not_request_failures() {
        assert!(!ProbeError::BadRequest("x".into()).is_request_failure());
        assert!(!ProbeError::UnsupportedVersion.is_request_failure());
        assert_eq!(
            ProbeError::Interrupted.client_code(),
            ClientCode::Interrupted
        );
    }
}

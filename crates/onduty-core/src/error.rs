//! Shared error type across onduty crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request or config.
    BadRequest,
    /// A privileged operation was attempted while its secret is unset.
    NotConfigured,
    /// Caller lacks the required credential or role.
    Unauthorized,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotConfigured => "NOT_CONFIGURED",
            ClientCode::Unauthorized => "UNAUTHORIZED",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, OndutyError>;

/// Unified error type used by core and gateway.
///
/// Registry operations never produce one of these; only configuration,
/// request decoding, and the admin gates do.
#[derive(Debug, Error)]
pub enum OndutyError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{0} not configured")]
    NotConfigured(String),
    #[error("not authorized")]
    Unauthorized,
    #[error("internal: {0}")]
    Internal(String),
}

impl OndutyError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            OndutyError::BadRequest(_) => ClientCode::BadRequest,
            OndutyError::NotConfigured(_) => ClientCode::NotConfigured,
            OndutyError::Unauthorized => ClientCode::Unauthorized,
            OndutyError::Internal(_) => ClientCode::Internal,
        }
    }
}

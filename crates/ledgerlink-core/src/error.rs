//! Shared error type across ledgerlink crates.

use thiserror::Error;

/// Stable machine-readable failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid configuration, profile, or invocation.
    Config,
    /// Enrollment or authentication was refused.
    Auth,
    /// The remote endpoint could not be reached (includes timeouts).
    Connect,
    /// The remote endpoint answered and refused the operation.
    Rejected,
    /// Malformed payload, envelope, or response body.
    Decode,
    /// Content does not match its expected digest.
    Integrity,
    /// Internal invariant violation.
    Internal,
}

impl ErrorKind {
    /// String representation used in logs, JSON responses, and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::Auth => "AUTH_FAILED",
            ErrorKind::Connect => "CONNECT",
            ErrorKind::Rejected => "REJECTED",
            ErrorKind::Decode => "DECODE",
            ErrorKind::Integrity => "INTEGRITY",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, LinkError>;

/// Unified error type used by the libraries and binaries.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("config: {0}")]
    Config(String),
    #[error("auth failed: {0}")]
    Auth(String),
    #[error("connect: {0}")]
    Connect(String),
    #[error("rejected by remote: {0}")]
    Rejected(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("integrity: {0}")]
    Integrity(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl LinkError {
    /// Map to a stable kind for logs and assertions.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinkError::Config(_) => ErrorKind::Config,
            LinkError::Auth(_) => ErrorKind::Auth,
            LinkError::Connect(_) => ErrorKind::Connect,
            LinkError::Rejected(_) => ErrorKind::Rejected,
            LinkError::Decode(_) => ErrorKind::Decode,
            LinkError::Integrity(_) => ErrorKind::Integrity,
            LinkError::Internal(_) => ErrorKind::Internal,
        }
    }
}

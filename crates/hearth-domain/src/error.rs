//! Domain error types.

use thiserror::Error;

/// Errors raised by the domain core.
///
/// Validation outcomes are never reported through this channel; validators
/// return a [`crate::permission::PermissionResult`] instead. Only genuinely
/// unexpected failures (a credential that cannot be decoded, a credential
/// that cannot be signed) use `DomainError`, and the orchestration boundary
/// maps them to a generic internal-error response.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The credential string could not be decoded.
    ///
    /// Covers bad signatures, expired tokens, and malformed input alike; the
    /// distinction is deliberately not exposed to callers.
    #[error("invalid credential")]
    InvalidCredential,

    /// A credential could not be signed.
    #[error("credential signing failed: {message}")]
    CredentialSigning { message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

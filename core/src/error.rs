//! Error types for the todo API client.
//!
//! # Design
//! Callers never branch on the cause of a failed remote operation: a refused
//! connection, a 404 and a 500 are all "the remote operation failed". The
//! variants exist so log lines say what happened, not so callers can react
//! differently. Non-2xx responses land in `Http` with the raw status code and
//! body for debugging.

/// Errors returned by the API access layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

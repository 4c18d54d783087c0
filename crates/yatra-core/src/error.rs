//! Error types for the YatraNepal client.
//!
//! One error type covers the whole client, with explicit variants for
//! transport, authentication, remote-service, input validation and local
//! storage failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, malformed body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (missing token, no logged-in user).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success responses from the remote service.
    #[error("request failed: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (bad URL, id, user record).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Durable storage errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns true if the remote service rejected the request's credentials.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Error::Protocol(e) if e.is_auth_error())
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error, including undecodable response bodies.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors raised on the client side.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The remote service rejected the credentials.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// No bearer token is stored.
    #[error("no stored token; log in first")]
    MissingToken,

    /// No user is logged in.
    #[error("no logged-in user")]
    NotLoggedIn,

    /// The stored user record carries no id.
    #[error("stored user has no id")]
    MissingUserId,
}

/// A non-success response from the remote service.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Message from the response body, if any.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid resource id (user or reservation).
    #[error("invalid id '{value}': {reason}")]
    ResourceId { value: String, reason: String },

    /// Invalid storage key.
    #[error("invalid storage key '{value}'")]
    StorageKey { value: String },

    /// A user record that is not a JSON object.
    #[error("invalid user record: {reason}")]
    User { reason: String },
}

/// Durable storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a stored entry failed.
    #[error("I/O error on '{key}': {message}")]
    Io { key: String, message: String },

    /// The storage location could not be prepared.
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },
}

impl StorageError {
    /// Wrap an I/O failure for the given key.
    pub fn io(key: &str, err: impl fmt::Display) -> Self {
        StorageError::Io {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display_includes_message() {
        let err = ProtocolError::new(404, Some("Reservation not found".into()));
        assert_eq!(err.to_string(), "HTTP 404: Reservation not found");
        assert_eq!(ProtocolError::new(500, None).to_string(), "HTTP 500");
    }

    #[test]
    fn auth_rejection_detection() {
        assert!(Error::from(ProtocolError::new(401, None)).is_auth_rejection());
        assert!(Error::from(ProtocolError::new(403, None)).is_auth_rejection());
        assert!(!Error::from(ProtocolError::new(404, None)).is_auth_rejection());
        assert!(!Error::from(AuthError::MissingToken).is_auth_rejection());
    }
}

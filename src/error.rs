//! Error taxonomy shared by scheme handlers, the registry and navigation
//!
//! Each kind maps to one reaction:
//! - `Validation`, `Decode`, `UnsupportedOperation`, `Configuration`: halt the
//!   offending operation and log it
//! - `NotFound`: recoverable, reported to the user through the notification
//!   handler while the previous state stays intact
//! - `InvalidOperation`: a request that makes no sense in the current state
//!   (going up from the root)

use crate::model::decode::DecodeError;
use crate::scheme::SchemeType;
use std::fmt;

/// Errors raised while routing or acting on a URI
#[derive(Debug)]
pub enum HandlerError {
    /// URI unparseable or not accepted by the handler it was given to
    Validation { uri: String, reason: String },
    /// Backing resource does not exist
    NotFound(String),
    /// Payload could not be turned into a component tree
    Decode(DecodeError),
    /// Operation not provided by this handler (e.g. `current_uri` on a stateless one)
    UnsupportedOperation(String),
    /// Operation invalid in the current state
    InvalidOperation(String),
    /// Startup wiring bug: missing or mismatched registration
    Configuration(String),
    /// Backing store or collaborator I/O failure
    Io(std::io::Error),
}

impl HandlerError {
    pub fn validation(uri: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::Validation {
            uri: uri.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_registered(category: SchemeType) -> Self {
        Self::Configuration(format!("No handler registered for input type {}", category))
    }

    /// Whether this failure has already been (or should be) shown to the user
    /// as a notification rather than only logged
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidOperation(_))
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { uri, reason } => write!(f, "Unsupported URI {}: {}", uri, reason),
            Self::NotFound(uri) => write!(f, "Resource not found for {}", uri),
            Self::Decode(e) => write!(f, "Decode error: {}", e),
            Self::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {}", msg),
            Self::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            Self::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeError> for HandlerError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

impl From<std::io::Error> for HandlerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

//! Error type shared by every transfer backend.

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by transfer managers and their settings.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// The request never produced a response (connection, local I/O).
    #[error("{operation} failed: {source}")]
    Transport {
        operation: String,
        #[source]
        source: BoxError,
    },

    /// The server answered with a status code the operation does not accept.
    #[error("{operation} failed with status {status}")]
    UnexpectedStatus { operation: String, status: u16 },

    /// A listed object lies outside the directory that was listed.
    #[error("unexpected file {name} outside of {prefix}")]
    UnexpectedPath { name: String, prefix: String },

    /// A response body could not be interpreted.
    #[error("decode error: {message}")]
    Decode { message: String },

    #[error("authentication has expired, a new access token is required")]
    AuthenticationExpired,

    #[error("storage credentials are missing")]
    MissingCredentials,

    #[error("{message}")]
    Other { message: String },
}

impl StorageError {
    /// Wrap a transport-level failure for `operation`.
    pub fn transport(operation: impl Into<String>, source: impl Into<BoxError>) -> Self {
        StorageError::Transport {
            operation: operation.into(),
            source: source.into(),
        }
    }

    pub fn unexpected_status(operation: impl Into<String>, status: u16) -> Self {
        StorageError::UnexpectedStatus {
            operation: operation.into(),
            status,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        StorageError::Decode {
            message: message.into(),
        }
    }

    /// The HTTP status behind this error, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            StorageError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

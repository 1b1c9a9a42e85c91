//! Errors for the Shipxy adapter
use std::time::Duration;

use thiserror::Error;

/// Coarse classification of a failure, as seen by the tool host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input rejected before any network call
    Validation,
    /// Network failure, timeout or non-200 HTTP status
    Transport,
    /// HTTP 200 but the success sentinel was not 0
    Upstream,
    /// Body was not JSON or did not match the declared shape
    Decode,
    /// Process setup: configuration or I/O
    Setup,
}

/// Failure below the HTTP status line
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Failed(String),
}

#[derive(Error, Debug)]
pub enum ShipxyError {
    #[error("invalid parameter `{param}`: {message}")]
    Validation { param: String, message: String },

    #[error("{operation}: HTTP request failed with status {status}")]
    HttpStatus { operation: &'static str, status: u16 },

    #[error("{operation}: request to Shipxy failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("{operation}: Shipxy returned error {code}: {message}")]
    Upstream {
        operation: &'static str,
        code: i64,
        message: String,
    },

    #[error("{operation}: could not decode response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error")]
    ConfigError(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("IO error")]
    IoError(#[from] std::io::Error),
}

impl ShipxyError {
    pub(crate) fn validation(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            param: param.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::HttpStatus { .. } | Self::Transport { .. } => ErrorKind::Transport,
            Self::Upstream { .. } => ErrorKind::Upstream,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::ConfigError(_) | Self::InvalidConfig { .. } | Self::IoError(_) => {
                ErrorKind::Setup
            }
        }
    }

    /// Operation name for errors raised while talking to upstream
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::HttpStatus { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Upstream { operation, .. }
            | Self::Decode { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// True if the transport gave up waiting for upstream
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                source: TransportError::Timeout(_),
                ..
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, ShipxyError>;

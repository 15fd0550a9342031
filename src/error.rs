//! Errors raised while talking to the remote identity & content service.

use thiserror::Error;

/// Everything that can go wrong on the login and post-listing paths.
///
/// The gate never sees these: verification failures are folded into `false`
/// before they reach it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// Input rejected before any network call was made.
    #[error("{0}")]
    Validation(String),

    /// The remote service answered with a non-success status.
    #[error("remote service rejected the request with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// Connection, TLS or timeout failure.
    #[error("error sending request: {0}")]
    Transport(String),

    /// A success response whose body could not be used.
    #[error("unexpected response payload: {0}")]
    Payload(String),
}

impl From<reqwest::Error> for PortalError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            PortalError::Payload(e.to_string())
        } else {
            PortalError::Transport(e.to_string())
        }
    }
}

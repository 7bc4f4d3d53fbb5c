//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

use crate::dispatch::Operation;

#[derive(Debug, Error)]
pub enum ClientError {
    /// A required URL parameter was not supplied for the operation.
    #[error("missing required parameter `{key}` for {operation:?}")]
    MissingParameter {
        operation: Operation,
        key: &'static str,
    },

    /// Transport-level failure (connect, timeout, body decode).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    UnexpectedStatus(StatusCode),
}

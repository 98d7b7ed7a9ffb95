//! Purpose: the client-side error type, mirroring the teacher's
//! `hkv-client::ClientError` naming but over HTTP instead of RESP2.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, DNS, timeout, etc.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Server replied with a non-2xx status; carries the decoded
    /// `{status: message}` body when one was present.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// Response body did not match the expected JSON shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

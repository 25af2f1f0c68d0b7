use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid endpoint URL \"{input}\" (expected http:// or https://)")]
    InvalidUrl { input: String },

    #[error("Failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read standard input: {0}")]
    Stdin(std::io::Error),

    #[error("{0}")]
    Jq(#[from] JqError),
}

/// Anything that keeps the endpoint from yielding a raw blob.
///
/// The variants only feed debug logs; users see [`EndpointError::USER_MESSAGE`].
#[derive(Debug, Error)]
pub(crate) enum EndpointError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    #[error("response is not valid JSON: {0}")]
    Decode(String),

    #[error("response has no text output in data[0]")]
    MissingOutput,
}

impl EndpointError {
    pub(crate) const USER_MESSAGE: &'static str =
        "Failed to fetch architect output. Please check your network or Gradio endpoint.";
}

impl From<ureq::Error> for EndpointError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(code) => EndpointError::Status(code),
            ureq::Error::Timeout(_) => EndpointError::Timeout,
            other => EndpointError::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for EndpointError {
    fn from(e: serde_json::Error) -> Self {
        EndpointError::Decode(e.to_string())
    }
}

#[derive(Debug, Error)]
pub(crate) enum JqError {
    #[error("jq not found. Please install jq to use --jq option.")]
    NotFound,

    #[error("Failed to run jq: {0}")]
    Spawn(std::io::Error),

    #[error("Failed to write to jq stdin: {0}")]
    Stdin(std::io::Error),

    #[error("Failed to wait for jq: {0}")]
    Wait(std::io::Error),

    #[error("Invalid UTF-8 from jq: {0}")]
    Utf8(std::string::FromUtf8Error),

    #[error("jq error: {0}")]
    Filter(String),
}

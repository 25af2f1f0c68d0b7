//! The external prediction endpoint
//!
//! One POST per fetch, no retries. Everything that can go wrong collapses
//! into [`EndpointError`].

mod client;
mod types;

pub(crate) use client::{DEFAULT_ENDPOINT_URL, DEFAULT_TIMEOUT, GradioEndpoint};

use crate::error::EndpointError;

/// Source of raw text blobs
pub(crate) trait Endpoint {
    /// Run the prediction once and return `data[0]`.
    fn predict(&self) -> Result<String, EndpointError>;
}

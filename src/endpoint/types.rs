use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EndpointError;

const SESSION_HASH_LEN: usize = 11;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Body of the single prediction call
#[derive(Debug, Serialize)]
pub(crate) struct PredictRequest {
    pub(crate) session_hash: String,
    pub(crate) fn_index: u32,
    pub(crate) data: Vec<serde_json::Value>,
}

impl PredictRequest {
    /// First function of the app, no inputs, fresh session.
    pub(crate) fn new() -> Self {
        Self {
            session_hash: random_session_hash(),
            fn_index: 0,
            data: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictResponse {
    #[serde(default)]
    pub(crate) data: Vec<serde_json::Value>,
}

impl PredictResponse {
    /// Take the raw text blob from `data[0]`.
    pub(crate) fn into_raw_output(self) -> Result<String, EndpointError> {
        match self.data.into_iter().next() {
            Some(serde_json::Value::String(raw)) => Ok(raw),
            _ => Err(EndpointError::MissingOutput),
        }
    }
}

/// Decode a response body into the raw text blob.
pub(crate) fn parse_predict_response(body: &str) -> Result<String, EndpointError> {
    let response: PredictResponse = serde_json::from_str(body)?;
    response.into_raw_output()
}

fn random_session_hash() -> String {
    let mut rng = rand::thread_rng();
    (0..SESSION_HASH_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

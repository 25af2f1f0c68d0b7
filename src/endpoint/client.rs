use std::time::{Duration, Instant};

use crate::error::{AppError, EndpointError};

use super::Endpoint;
use super::types::{PredictRequest, parse_predict_response};

pub(crate) const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000/gradio";
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const PREDICT_PATH: &str = "/api/predict";

/// Blocking client for a Gradio app's `/api/predict` route
pub(crate) struct GradioEndpoint {
    agent: ureq::Agent,
    predict_url: String,
}

impl GradioEndpoint {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Ok(Self {
            agent,
            predict_url: predict_url(base_url)?,
        })
    }
}

impl Endpoint for GradioEndpoint {
    fn predict(&self) -> Result<String, EndpointError> {
        let start = Instant::now();
        log::debug!("POST {}", self.predict_url);

        let response = self
            .agent
            .post(&self.predict_url)
            .header("Content-Type", "application/json")
            .send_json(PredictRequest::new())?;
        log::debug!(
            "{} in {:.2}ms",
            response.status(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        let body = response.into_body().read_to_string()?;
        parse_predict_response(&body)
    }
}

/// Join the base URL and the predict route, rejecting non-HTTP schemes.
pub(crate) fn predict_url(base_url: &str) -> Result<String, AppError> {
    let trimmed = base_url.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AppError::InvalidUrl {
            input: trimmed.to_string(),
        });
    }
    Ok(format!("{}{PREDICT_PATH}", trimmed.trim_end_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_gets_predict_route() {
        assert_eq!(
            predict_url(DEFAULT_ENDPOINT_URL).unwrap(),
            "http://localhost:8000/gradio/api/predict"
        );
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(
            predict_url("https://example.com/gradio/").unwrap(),
            "https://example.com/gradio/api/predict"
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            predict_url("  http://127.0.0.1:7860 ").unwrap(),
            "http://127.0.0.1:7860/api/predict"
        );
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = predict_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl { .. }));
        assert!(predict_url("localhost:8000").is_err());
    }

    #[test]
    fn unreachable_endpoint_is_an_endpoint_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = GradioEndpoint::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        assert!(matches!(
            endpoint.predict(),
            Err(EndpointError::Transport(_) | EndpointError::Timeout)
        ));
    }
}

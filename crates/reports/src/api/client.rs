//! Reporting API HTTP client
//!
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::time::Duration;
use url::Url;

use super::Endpoint;
use super::wire::ApiResponse;
use crate::config::TapConfig;

/// Transport the sync engine issues requests through
pub trait ReportApi {
    /// Perform one validated GET request
    fn get(&self, endpoint: Endpoint, query: &[(String, String)]) -> Result<ApiResponse>;
}

impl<T: ReportApi + ?Sized> ReportApi for &T {
    fn get(&self, endpoint: Endpoint, query: &[(String, String)]) -> Result<ApiResponse> {
        (**self).get(endpoint, query)
    }
}

/// Error indicating the API answered 200 with a non-"OK" body
#[derive(Debug, thiserror::Error)]
#[error("Error calling {url}. API response: Code ({code}) - {message}")]
pub struct UpstreamReportError {
    pub url: String,
    pub code: i64,
    pub message: String,
}

/// Error indicating the request failed at the HTTP layer
#[derive(Debug, thiserror::Error)]
#[error("Request to {url} failed after {attempts} attempt(s): {source}")]
pub struct TransportError {
    pub url: String,
    pub attempts: u32,
    #[source]
    pub source: ureq::Error,
}

/// Reporting API client
pub struct ReportClient {
    agent: ureq::Agent,
    base_url: String,
    access_token: String,
    user_agent: Option<String>,
    max_retries: u32,
}

impl ReportClient {
    /// Overall per-request timeout
    const TIMEOUT: Duration = Duration::from_secs(300);

    /// First retry delay; doubles on each attempt
    const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

    /// Create a client from the tap configuration
    pub fn new(config: &TapConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(Self::TIMEOUT))
            .build();

        Self {
            agent: agent_config.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries.max(1),
        }
    }

    /// Full request URL for an endpoint and query
    pub fn build_url(&self, endpoint: Endpoint, query: &[(String, String)]) -> Result<Url> {
        let base = format!("{}{}", self.base_url, endpoint.path());
        Url::parse_with_params(&base, query)
            .with_context(|| format!("Invalid request URL: {}", base))
    }

    /// Send a single request without retry
    fn send(&self, url: &Url) -> std::result::Result<ApiResponse, ureq::Error> {
        let mut request = self
            .agent
            .get(url.as_str())
            .header("Access-Token", &self.access_token)
            .header("Content-Type", "application/json");

        if let Some(user_agent) = &self.user_agent {
            request = request.header("User-Agent", user_agent);
        }

        let mut response = request.call()?;
        response.body_mut().read_json::<ApiResponse>()
    }

    /// Send a request with exponential backoff retry on transient failures
    fn send_with_retry(&self, url: &Url) -> Result<ApiResponse> {
        let mut delay = Self::INITIAL_BACKOFF;
        let mut attempt = 1;

        loop {
            match self.send(url) {
                Ok(response) => return Ok(response),
                Err(e) if is_transient(&e) && attempt < self.max_retries => {
                    warn!(
                        "Request attempt {}/{} failed: {}; retrying in {:?}",
                        attempt, self.max_retries, e, delay
                    );
                    // Add jitter to delay
                    let jitter = Duration::from_millis(rand_jitter());
                    std::thread::sleep(delay + jitter);
                    delay *= 2;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(TransportError {
                        url: url.to_string(),
                        attempts: attempt,
                        source: e,
                    }
                    .into());
                }
            }
        }
    }
}

impl ReportApi for ReportClient {
    fn get(&self, endpoint: Endpoint, query: &[(String, String)]) -> Result<ApiResponse> {
        let url = self.build_url(endpoint, query)?;
        debug!("GET {}", url);
        let response = self.send_with_retry(&url)?;
        validate_response(endpoint, url.as_str(), response)
    }
}

/// Check the status embedded in a 200 response body
///
/// Endpoints that tolerate upstream errors get the response back unchanged;
/// transport-level validation has already passed by the time this runs.
pub fn validate_response(endpoint: Endpoint, url: &str, response: ApiResponse) -> Result<ApiResponse> {
    if response.is_ok() {
        return Ok(response);
    }

    if endpoint.tolerates_upstream_errors() {
        warn!(
            "Ignoring API error from {} (possible permission issue): Code ({}) - {}",
            url, response.code, response.message
        );
        return Ok(response);
    }

    Err(UpstreamReportError {
        url: url.to_string(),
        code: response.code,
        message: response.message,
    }
    .into())
}

/// Timeouts, dropped connections, rate limiting and server errors
fn is_transient(error: &ureq::Error) -> bool {
    match error {
        ureq::Error::StatusCode(code) => *code == 429 || *code >= 500,
        ureq::Error::Timeout(_) | ureq::Error::Io(_) | ureq::Error::ConnectionFailed => true,
        _ => false,
    }
}

/// Generate a random jitter value (0-100ms)
fn rand_jitter() -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let hasher = RandomState::new().build_hasher();
    hasher.finish() % 100
}

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::Config;
use super::dto::{ErrorEnvelope, JobResponse};
use super::params::JobSearchParams;

const API_KEY_HEADER: &str = "X-API-Key";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Why an upstream call did not produce a page of results
#[derive(Debug)]
pub enum UpstreamFailure {
    /// Connection, TLS, timeout or body read failed
    Transport(reqwest::Error),

    /// Upstream answered with a non-success status
    Status(reqwest::StatusCode),

    /// Body was not a valid search response
    Decode(serde_json::Error),
}

impl fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamFailure::Transport(e) => write!(f, "transport error: {}", e),
            UpstreamFailure::Status(status) => write!(f, "upstream returned {}", status),
            UpstreamFailure::Decode(e) => write!(f, "invalid response body: {}", e),
        }
    }
}

/// Service-level error: a failed search together with the parameters it ran with
#[derive(Debug)]
pub struct ServiceError {
    pub params: JobSearchParams,
    pub failure: UpstreamFailure,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to fetch jobs (page={}, size={}): {}",
            self.params.page, self.params.size, self.failure
        )
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.failure {
            UpstreamFailure::Transport(e) => Some(e),
            UpstreamFailure::Decode(e) => Some(e),
            UpstreamFailure::Status(_) => None,
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    // The cause only goes to the log; clients always see the same envelope.
    fn error_response(&self) -> HttpResponse {
        error!("{}", self);
        HttpResponse::InternalServerError().json(ErrorEnvelope::failed_fetch(&self.params))
    }
}

/// Proxy to the upstream job listing service
pub struct JobService {
    client: reqwest::Client,
    upstream_url: Url,
    api_key: String,
}

impl JobService {
    /// Create a new JobService from the application configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            client,
            upstream_url: config.upstream_url.clone(),
            api_key: config.upstream_api_key.clone(),
        })
    }

    /// Run one search against the upstream service
    ///
    /// # Business Logic
    /// - Issues exactly one GET, never retried or cached
    /// - Sends the API key and asks for JSON
    /// - Relays any successful JSON body as-is, without checking its shape
    ///
    /// # Returns
    /// - `Ok(Value)` - upstream answered 2xx with a JSON body
    /// - `Err(ServiceError)` - any other outcome
    pub async fn search(&self, params: &JobSearchParams) -> Result<Value, ServiceError> {
        let fail = |failure| ServiceError {
            params: params.clone(),
            failure,
        };

        let mut url = self.upstream_url.clone();
        url.set_query(Some(&params.to_query_string()));

        info!(
            "Service: Searching jobs was={:?} wo={:?} page={} size={}",
            params.was, params.wo, params.page, params.size
        );
        debug!("Service: GET {}", url);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| fail(UpstreamFailure::Transport(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(UpstreamFailure::Status(status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fail(UpstreamFailure::Transport(e)))?;

        let page: Value =
            serde_json::from_slice(&body).map_err(|e| fail(UpstreamFailure::Decode(e)))?;

        match JobResponse::deserialize(&page) {
            Ok(summary) => info!(
                "Service: Upstream returned {} jobs of {} total ({} pages)",
                summary.jobs.len(),
                summary.total_results,
                summary.total_pages()
            ),
            Err(e) => warn!("Service: Relaying upstream body of unexpected shape: {}", e),
        }

        Ok(page)
    }
}

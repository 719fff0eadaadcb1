use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use crate::api::jobs::{JobResponse, JobSearchParams};

const JOBS_ENDPOINT: &str = "api/jobs";

/// Client for this service's own `/api/jobs` endpoint
pub struct JobApiClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl JobApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // A base without a trailing slash would lose its last path segment on join
        let base = if base_url.ends_with('/') {
            Url::parse(base_url)
        } else {
            Url::parse(&format!("{base_url}/"))
        }
        .with_context(|| format!("Invalid API base URL: {base_url}"))?;

        let endpoint = base
            .join(JOBS_ENDPOINT)
            .context("Failed to build jobs endpoint URL")?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, endpoint })
    }

    pub async fn search_jobs(&self, params: &JobSearchParams) -> Result<JobResponse> {
        let mut url = self.endpoint.clone();
        url.set_query(Some(&params.to_query_string()));
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .context("Failed to reach the job search API")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Failed to fetch jobs (HTTP {})", status.as_u16());
        }

        response
            .json::<JobResponse>()
            .await
            .context("Failed to parse job search response")
    }
}

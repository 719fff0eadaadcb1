use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::models::Job;
use super::params::JobSearchParams;

/// Message carried by every failed search
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch jobs";

/// One page of search results as the search client reads it.
///
/// Decoding is lenient: missing counts fall back to zero.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JobResponse {
    /// Listings on this page. The upstream omits the key when nothing matched.
    #[serde(rename = "stellenangebote", default)]
    pub jobs: Vec<Job>,

    /// Number of hits across all pages
    #[serde(rename = "maxErgebnisse", default, deserialize_with = "lenient_count")]
    pub total_results: u64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub page: u32,

    #[serde(default, deserialize_with = "lenient_count")]
    pub size: u32,

    /// Facets and other top-level upstream fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobResponse {
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_results, self.size)
    }
}

/// `ceil(total / size)`; zero when `size` is zero.
pub fn total_pages(total: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(size))).unwrap_or(u32::MAX)
}

/// Body returned whenever the upstream call fails, whatever the cause
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(rename = "stellenangebote")]
    pub jobs: Vec<Job>,
    #[serde(rename = "maxErgebnisse")]
    pub total_results: u64,
    pub page: u32,
    pub size: u32,
}

impl ErrorEnvelope {
    pub fn failed_fetch(params: &JobSearchParams) -> Self {
        Self {
            error: FETCH_FAILED_MESSAGE.to_string(),
            jobs: Vec::new(),
            total_results: 0,
            page: params.page,
            size: params.size,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    String(String),
}

/// Accepts both `42` and `"42"`; the upstream has used either encoding.
fn lenient_count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    match NumberOrString::<T>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a count, got {s:?}"))),
    }
}

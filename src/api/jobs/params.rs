use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const DEFAULT_KEYWORD: &str = "entwickler";
pub const DEFAULT_LOCATION: &str = "koln";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Larger page sizes are clamped before they reach the upstream service
pub const MAX_PAGE_SIZE: u32 = 100;

/// Search parameters exactly as the caller sent them
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawSearchQuery {
    pub was: Option<String>,
    pub wo: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}

impl RawSearchQuery {
    /// Decode a URL query string.
    ///
    /// Never fails: broken percent-escapes are decoded lossily, unknown keys
    /// are skipped and the first occurrence of a repeated key wins.
    pub fn from_query_string(query: &str) -> Self {
        let mut raw = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "was" => &mut raw.was,
                "wo" => &mut raw.wo,
                "page" => &mut raw.page,
                "size" => &mut raw.size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        raw
    }
}

/// Outcome of parsing a pagination value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositiveInt {
    Valid(u32),
    UseDefault,
}

impl PositiveInt {
    /// Total parse: anything that is not a base-10 integer >= 1 maps to `UseDefault`.
    ///
    /// Positive values too large for `u32` saturate at `u32::MAX`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().parse::<u32>()) {
            Some(Ok(n)) if n > 0 => PositiveInt::Valid(n),
            Some(Err(e)) if *e.kind() == IntErrorKind::PosOverflow => PositiveInt::Valid(u32::MAX),
            _ => PositiveInt::UseDefault,
        }
    }

    pub fn or(self, default: u32) -> u32 {
        match self {
            PositiveInt::Valid(n) => n,
            PositiveInt::UseDefault => default,
        }
    }
}

/// Canonical, fully defaulted search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSearchParams {
    /// Search keyword
    pub was: String,
    /// Location
    pub wo: String,
    pub page: u32,
    pub size: u32,
}

impl Default for JobSearchParams {
    fn default() -> Self {
        Self {
            was: DEFAULT_KEYWORD.to_string(),
            wo: DEFAULT_LOCATION.to_string(),
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl JobSearchParams {
    /// Fill defaults for every missing, empty or invalid field.
    pub fn normalize(raw: &RawSearchQuery) -> Self {
        Self {
            was: text_or(raw.was.as_deref(), DEFAULT_KEYWORD),
            wo: text_or(raw.wo.as_deref(), DEFAULT_LOCATION),
            page: PositiveInt::parse(raw.page.as_deref()).or(DEFAULT_PAGE),
            size: PositiveInt::parse(raw.size.as_deref())
                .or(DEFAULT_PAGE_SIZE)
                .min(MAX_PAGE_SIZE),
        }
    }

    /// Query string for the upstream call, keys in `was`, `wo`, `page`, `size` order.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("was", &self.was)
            .append_pair("wo", &self.wo)
            .append_pair("page", &self.page.to_string())
            .append_pair("size", &self.size.to_string())
            .finish()
    }
}

fn text_or(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

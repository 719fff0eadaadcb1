use std::env;
use std::time::Duration;

use url::Url;

/// Job listing endpoint of the Bundesagentur für Arbeit
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://rest.arbeitsagentur.de/jobboerse/jobsuche-service/pc/v4/app/jobs";

/// Public client id the job listing API expects in the `X-API-Key` header
pub const DEFAULT_UPSTREAM_API_KEY: &str = "jobboerse-jobsuche";

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Interface the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    /// Default: 3001
    pub port: u16,

    /// Full URL of the upstream job search endpoint
    pub upstream_url: Url,

    /// Value sent as `X-API-Key` on every upstream request
    pub upstream_api_key: String,

    /// Upper bound for a single upstream request
    /// Default: 10 seconds
    pub upstream_timeout: Duration,

    /// Directory for the rolling log files
    pub log_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Optional environment variables:
    /// - HOST: bind address (default: 0.0.0.0)
    /// - PORT: listen port (default: 3001)
    /// - UPSTREAM_URL: job search endpoint (default: Arbeitsagentur jobsuche v4)
    /// - UPSTREAM_API_KEY: value of the X-API-Key header (default: jobboerse-jobsuche)
    /// - UPSTREAM_TIMEOUT_SECS: request timeout in seconds (default: 10)
    /// - LOG_DIR: log directory (default: logs)
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| format!("PORT must be a valid port number, got {raw:?}"))?,
            None => 3001,
        };

        let raw_url = lookup("UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        let upstream_url = Url::parse(&raw_url)
            .map_err(|e| format!("UPSTREAM_URL is not a valid URL ({raw_url}): {e}"))?;

        let upstream_api_key =
            lookup("UPSTREAM_API_KEY").unwrap_or_else(|| DEFAULT_UPSTREAM_API_KEY.to_string());

        let timeout_secs: u64 = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                format!("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}")
            })?,
            None => 10,
        };
        if timeout_secs == 0 {
            return Err("UPSTREAM_TIMEOUT_SECS must be greater than zero".to_string());
        }

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string());

        Ok(Config {
            host,
            port,
            upstream_url,
            upstream_api_key,
            upstream_timeout: Duration::from_secs(timeout_secs),
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.upstream_url.as_str(), DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream_api_key, "jobboerse-jobsuche");
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert_eq!(config.log_dir, "logs");
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("PORT", "8080"),
            ("UPSTREAM_URL", "http://127.0.0.1:9000/jobs"),
            ("UPSTREAM_API_KEY", "other-key"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_url.as_str(), "http://127.0.0.1:9000/jobs");
        assert_eq!(config.upstream_api_key, "other-key");
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("UPSTREAM_URL", "not a url")]).is_err());
        assert!(load(&[("UPSTREAM_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[("UPSTREAM_TIMEOUT_SECS", "0")]).is_err());
    }
}

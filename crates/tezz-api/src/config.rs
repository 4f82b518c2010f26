//! Connection settings for the backend

use reqwest::Url;
use std::time::Duration;
use tezz_core::error::{Result, TezzError};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://tezz.kg/api/";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API root; always ends with `/` so endpoints join beneath it
    pub base_url: Url,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Build from `--base-url` (or `TEZZ_API_URL`) and `--timeout`
    pub fn from_cli(base_url: Option<&str>, timeout_secs: Option<u64>) -> Result<Self> {
        let base_url = parse_base_url(base_url.unwrap_or(DEFAULT_BASE_URL))?;

        let secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if secs == 0 {
            return Err(TezzError::InvalidArgument(
                "timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(secs),
        })
    }
}

/// Parse an http(s) API root, adding the trailing slash if missing
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| TezzError::Config(format!("invalid base URL '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(TezzError::Config(format!(
            "base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_cli(None, None).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_trailing_slash_added() {
        let url = parse_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/");
        assert_eq!(
            url.join("modules/").unwrap().as_str(),
            "http://localhost:8000/api/modules/"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(TezzError::Config(_))
        ));
        assert!(matches!(
            parse_base_url("ftp://tezz.kg/api/"),
            Err(TezzError::Config(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(matches!(
            ApiConfig::from_cli(None, Some(0)),
            Err(TezzError::InvalidArgument(_))
        ));
    }
}

use crate::error::{RepoViewerError, Result};
use crate::readme::RAW_GITHUB_URL;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;
/// Token file location relative to the home directory.
pub const DEFAULT_TOKEN_FILE: &str = ".repo-viewer/token.json";

/// `~/.repo-viewer/token.json`, or the bare relative path when no home
/// directory can be found.
pub fn default_token_file() -> PathBuf {
    match dirs::home_dir() {
        Some(home_dir) => home_dir.join(DEFAULT_TOKEN_FILE),
        None => PathBuf::from(DEFAULT_TOKEN_FILE),
    }
}

/// Endpoints and transport settings for the GitHub gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_base_url: String,
    pub raw_base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Extra attempts after a 5xx response.
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            raw_base_url: RAW_GITHUB_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("Repo Viewer/{}", env!("CARGO_PKG_VERSION")),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

impl GatewayConfig {
    /// Point both endpoints at the same host, as a local mock server does.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.to_string(),
            raw_base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    pub fn validate(mut self) -> Result<Self> {
        for base in [&mut self.api_base_url, &mut self.raw_base_url] {
            let url = Url::parse(base)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(RepoViewerError::ConfigError(format!(
                    "unsupported scheme in {}",
                    base
                )));
            }
            let trimmed = base.trim_end_matches('/').to_string();
            *base = trimmed;
        }
        if self.timeout.is_zero() {
            return Err(RepoViewerError::ConfigError(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default().validate().unwrap();
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.raw_base_url, "https://raw.githubusercontent.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("Repo Viewer/"));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_default_token_file_under_home() {
        let path = default_token_file();
        assert!(path.ends_with(DEFAULT_TOKEN_FILE));
        if let Some(home_dir) = dirs::home_dir() {
            assert!(path.starts_with(&home_dir));
            assert!(path.is_absolute());
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = GatewayConfig::with_base_url("http://127.0.0.1:9000/")
            .validate()
            .unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.raw_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_urls_rejected() {
        assert!(matches!(
            GatewayConfig::with_base_url("not a url").validate(),
            Err(RepoViewerError::UrlError(_))
        ));
        assert!(matches!(
            GatewayConfig::with_base_url("ftp://example.com").validate(),
            Err(RepoViewerError::ConfigError(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = GatewayConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

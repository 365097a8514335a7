//! Client configuration.

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {key} must be an http(s) URL, got '{value}'")]
    InvalidUrl { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Everything before `/tutorials/`, e.g. `http://127.0.0.1:8000/api`.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads `TUTORIALS_API_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("TUTORIALS_API_URL") {
            Ok(value) if !value.trim().is_empty() => Self::with_base_url(value.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                key: "TUTORIALS_API_URL",
                value: base_url.to_string(),
            });
        }
        Ok(Self {
            base_url: base_url.to_string(),
        })
    }
}

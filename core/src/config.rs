use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured backend URL
pub const API_URL_ENV: &str = "SCRIBBLE_API_URL";

/// Where notes live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Durable local store only
    Local,
    /// A remote backend is configured; no requests are ever made to it
    Remote(String),
}

impl Mode {
    pub fn label(&self) -> &str {
        match self {
            Mode::Local => "local",
            Mode::Remote(_) => "remote",
        }
    }
}

/// Optional remote backend settings, read once at startup
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
}

impl BackendConfig {
    pub fn new(api_base_url: Option<String>) -> Self {
        Self { api_base_url }
    }

    /// Replace the base URL with `SCRIBBLE_API_URL` when that variable is set
    pub fn with_env_override(self) -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) => Self { api_base_url: Some(url) },
            Err(_) => self,
        }
    }

    pub fn mode(&self) -> Mode {
        match self.api_base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Mode::Remote(url.to_string()),
            _ => Mode::Local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults_to_local() {
        assert_eq!(BackendConfig::default().mode(), Mode::Local);
        assert_eq!(BackendConfig::new(Some("   ".to_string())).mode(), Mode::Local);
    }

    #[test]
    fn test_mode_remote_when_url_present() {
        let config = BackendConfig::new(Some(" https://notes.example.com ".to_string()));
        assert_eq!(
            config.mode(),
            Mode::Remote("https://notes.example.com".to_string())
        );
        assert_eq!(config.mode().label(), "remote");
    }
}

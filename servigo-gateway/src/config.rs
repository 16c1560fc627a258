//! Gateway client configuration

use servigo_core::{ApiSettings, LOGIN_ROUTE};
use std::collections::HashMap;

/// URL substring identifying the credential-free signup endpoint
pub const SIGNUP_MARKER: &str = "/api/signup";

/// Configuration for the gateway client
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Additional default headers
    pub headers: HashMap<String, String>,
    /// Requests whose URL contains this marker are never given a credential
    pub signup_marker: String,
    /// Route session-terminating redirects resolve to
    pub login_route: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_seconds: 30,
            user_agent: "servigo/1.0".to_string(),
            headers: HashMap::new(),
            signup_marker: SIGNUP_MARKER.to_string(),
            login_route: LOGIN_ROUTE.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Create a configuration for the given API origin
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create a configuration from the loaded application settings
    pub fn from_settings(settings: &ApiSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            timeout_seconds: settings.timeout_seconds,
            ..Default::default()
        }
    }

    /// Set additional header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.signup_marker, "/api/signup");
        assert_eq!(config.login_route, "/login");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_config_builders() {
        let config = GatewayConfig::new("https://api.servigo.example")
            .with_header("X-Client-Version".to_string(), "1.0".to_string())
            .with_timeout(60)
            .with_user_agent("servigo-tests/0.1");

        assert_eq!(config.base_url, "https://api.servigo.example");
        assert_eq!(config.timeout_seconds, 60);
        assert_eq!(config.user_agent, "servigo-tests/0.1");
        assert_eq!(
            config.headers.get("X-Client-Version"),
            Some(&"1.0".to_string())
        );
    }

    #[test]
    fn test_config_from_settings() {
        let settings = ApiSettings {
            base_url: "http://10.0.0.2:5000".to_string(),
            timeout_seconds: 5,
        };
        let config = GatewayConfig::from_settings(&settings);
        assert_eq!(config.base_url, "http://10.0.0.2:5000");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.signup_marker, "/api/signup");
    }
}

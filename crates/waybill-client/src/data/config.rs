use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOGIN_PATH: &str = "/app_driver/user/login";
pub const DEFAULT_REGISTER_PATH: &str = "/app_driver/user/register";
pub const DEFAULT_SEND_CODE_PATH: &str = "/app_driver/user/sendCode";
pub const DEFAULT_HEALTH_PATH: &str = "/app_driver/health";
pub const DEFAULT_LOGOUT_PATH: &str = "/app_driver/user/logout";
pub const DEFAULT_POLICY_PATH: &str = "/app_driver/oss/getPolicy";
pub const DEFAULT_RESOLVE_PATH: &str = "/app_driver/oss/getUrl";

/// Configuration for an [`ApiClient`](crate::ApiClient).
///
/// Every field has a default, so a config file only needs to name what
/// differs. `app_secret` has no usable default and must be provided.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and optional path prefix of the backend.
    pub base_url: String,

    /// Shared HMAC secret used for `x-signature`.
    pub app_secret: String,

    /// Paths callable without a valid session.
    ///
    /// Default: login, registration, OTP send, health check.
    pub public_paths: Vec<String>,

    pub login_path: String,

    pub logout_path: String,

    /// Upload policy endpoint, keyed by file extension.
    pub policy_path: String,

    /// Object key to public URL endpoint.
    pub resolve_path: String,

    /// Per-request timeout. Zero disables the timeout.
    pub timeout_secs: u64,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("app_secret", &"<redacted>")
            .field("public_paths", &self.public_paths)
            .field("login_path", &self.login_path)
            .field("logout_path", &self.logout_path)
            .field("policy_path", &self.policy_path)
            .field("resolve_path", &self.resolve_path)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url:     "http://localhost:8080".to_string(),
            app_secret:   String::new(),
            public_paths: vec![
                DEFAULT_LOGIN_PATH.to_string(),
                DEFAULT_REGISTER_PATH.to_string(),
                DEFAULT_SEND_CODE_PATH.to_string(),
                DEFAULT_HEALTH_PATH.to_string(),
            ],
            login_path:   DEFAULT_LOGIN_PATH.to_string(),
            logout_path:  DEFAULT_LOGOUT_PATH.to_string(),
            policy_path:  DEFAULT_POLICY_PATH.to_string(),
            resolve_path: DEFAULT_RESOLVE_PATH.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            app_secret: app_secret.into(),
            ..Self::default()
        }
    }

    /// Whether `path` may be called without a valid session.
    pub fn is_public(&self, path: &str) -> bool { self.public_paths.iter().any(|p| p == path) }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let config = ClientConfig::default();
        assert!(config.is_public(DEFAULT_LOGIN_PATH));
        assert!(config.is_public(DEFAULT_HEALTH_PATH));
        assert!(!config.is_public("/app_driver/user/getUserInfo"));
        assert!(!config.is_public(DEFAULT_POLICY_PATH));
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "base_url": "https://api.example.com", "app_secret": "s" }"#)
                .unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.login_path, DEFAULT_LOGIN_PATH);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = ClientConfig { timeout_secs: 0, ..ClientConfig::default() };
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ClientConfig::new("https://api.example.com", "top-secret");
        assert!(!format!("{config:?}").contains("top-secret"));
    }
}

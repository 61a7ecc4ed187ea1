use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use home::home_dir;
use waybill_client::ClientConfig;

pub const ROOT_VAR: &str = "WAYBILL_ROOT";
pub const SECRET_VAR: &str = "WAYBILL_SECRET";
pub const BASE_URL_VAR: &str = "WAYBILL_BASE_URL";

/// On-disk layout of the CLI state directory.
#[derive(Debug, Clone)]
pub struct WaybillEnv {
    root: PathBuf,
}

impl WaybillEnv {
    /// `$WAYBILL_ROOT`, or `~/.waybill`.
    pub fn new() -> Result<Self> {
        let root = match env::var_os(ROOT_VAR) {
            Some(root) => PathBuf::from(root),
            None => home_dir()
                .context("Failed to get home directory")?
                .join(".waybill"),
        };
        Ok(Self::from_root(root))
    }

    pub fn from_root(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    pub fn config_file(&self) -> PathBuf { self.root.join("config.toml") }

    pub fn session_file(&self) -> PathBuf { self.root.join("session.json") }

    /// Read `config.toml` if present, then apply environment overrides.
    pub fn load_config(&self) -> Result<ClientConfig> {
        let overrides = Overrides {
            secret:   env::var(SECRET_VAR).ok(),
            base_url: env::var(BASE_URL_VAR).ok(),
        };
        self.load_config_with(overrides)
    }

    pub fn load_config_with(&self, overrides: Overrides) -> Result<ClientConfig> {
        let path = self.config_file();
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            ClientConfig::default()
        };
        overrides.apply(&mut config);
        Ok(config)
    }
}

/// Values taken from the environment in preference to the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub secret:   Option<String>,
    pub base_url: Option<String>,
}

impl Overrides {
    fn apply(self, config: &mut ClientConfig) {
        if let Some(secret) = self.secret.filter(|s| !s.is_empty()) {
            config.app_secret = secret;
        }
        if let Some(base_url) = self.base_url.filter(|s| !s.is_empty()) {
            config.base_url = base_url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let env = WaybillEnv::from_root("/tmp/wb");
        assert_eq!(env.config_file(), Path::new("/tmp/wb/config.toml"));
        assert_eq!(env.session_file(), Path::new("/tmp/wb/session.json"));
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let env = WaybillEnv::from_root(dir.path());

        let config = env.load_config_with(Overrides::default()).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "base_url = \"https://driver.example.com\"\napp_secret = \"s3cret\"\ntimeout_secs = 5\n",
        )
        .unwrap();
        let env = WaybillEnv::from_root(dir.path());

        let config = env.load_config_with(Overrides::default()).unwrap();
        assert_eq!(config.base_url, "https://driver.example.com");
        assert_eq!(config.app_secret, "s3cret");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.login_path, ClientConfig::default().login_path);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "app_secret = \"from-file\"\n").unwrap();
        let env = WaybillEnv::from_root(dir.path());

        let config = env
            .load_config_with(Overrides {
                secret:   Some("from-env".into()),
                base_url: Some(String::new()),
            })
            .unwrap();
        assert_eq!(config.app_secret, "from-env");
        assert_eq!(config.base_url, ClientConfig::default().base_url);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "timeout_secs = \"soon\"").unwrap();
        let env = WaybillEnv::from_root(dir.path());

        assert!(env.load_config_with(Overrides::default()).is_err());
    }
}

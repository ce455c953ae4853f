//! Configuration handling for depbundle
//!
//! Supports depbundle.toml, .depbundlerc, and environment variable overrides.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::core::{BundleError, BundleResult};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry configuration
    pub registry: RegistryConfig,

    /// Network configuration
    pub network: NetworkConfig,

    /// Output configuration
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry base URL
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Per-request timeout in seconds (0 = none)
    pub timeout: u64,

    /// Maximum requests in flight per fan-out (0 = unbounded)
    pub concurrency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory bundles are written to
    pub dir: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: "https://registry.npmjs.org".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl NetworkConfig {
    /// Request deadline, if one was configured
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }

    /// Number of requests allowed in flight for a fan-out over `items` entries
    pub fn fan_out_limit(&self, items: usize) -> usize {
        if self.concurrency == 0 {
            items.max(1)
        } else {
            self.concurrency
        }
    }
}

/// One config file's contents. Only keys present in the file are `Some`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    registry: RegistryLayer,
    network: NetworkLayer,
    output: OutputLayer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RegistryLayer {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NetworkLayer {
    timeout: Option<u64>,
    concurrency: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputLayer {
    dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a directory and merge with defaults
    pub fn load(dir: &Path) -> BundleResult<Self> {
        let mut config = Config::default();

        // Try loading depbundle.toml
        let toml_path = dir.join("depbundle.toml");
        if toml_path.exists() {
            let content = std::fs::read_to_string(&toml_path)?;
            let layer: ConfigLayer = toml::from_str(&content)?;
            config.apply(layer);
        }

        // Try loading .depbundlerc (JSON format)
        let rc_path = dir.join(".depbundlerc");
        if rc_path.exists() {
            let content = std::fs::read_to_string(&rc_path)?;
            let layer: ConfigLayer = serde_json::from_str(&content)?;
            config.apply(layer);
        }

        config = config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Overlay every key the file sets, including ones set back to their default
    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(url) = layer.registry.url {
            self.registry.url = url;
        }
        if let Some(timeout) = layer.network.timeout {
            self.network.timeout = timeout;
        }
        if let Some(concurrency) = layer.network.concurrency {
            self.network.concurrency = concurrency;
        }
        if let Some(dir) = layer.output.dir {
            self.output.dir = dir;
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Self {
        if let Ok(registry) = env::var("DEPBUNDLE_REGISTRY") {
            self.registry.url = registry;
        }

        if let Ok(concurrency) = env::var("DEPBUNDLE_CONCURRENCY") {
            if let Ok(n) = concurrency.parse() {
                self.network.concurrency = n;
            }
        }

        if let Ok(timeout) = env::var("DEPBUNDLE_TIMEOUT") {
            if let Ok(n) = timeout.parse() {
                self.network.timeout = n;
            }
        }

        if let Ok(dir) = env::var("DEPBUNDLE_OUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        self
    }

    /// Check that the registry URL is usable
    pub fn validate(&self) -> BundleResult<()> {
        let url = url::Url::parse(&self.registry.url)
            .map_err(|e| BundleError::config(format!("invalid registry url '{}': {}", self.registry.url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(BundleError::config(format!(
                "registry url must be http(s), got '{}'",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// Registry base URL without a trailing slash
    pub fn registry_url(&self) -> &str {
        self.registry.url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.registry.url, "https://registry.npmjs.org");
        assert_eq!(config.network.timeout(), None);
        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn test_config_load_toml() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("depbundle.toml"),
            "[registry]\nurl = \"https://registry.example.com/\"\n\n[network]\nconcurrency = 4\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.registry_url(), "https://registry.example.com");
        assert_eq!(config.network.concurrency, 4);
        assert_eq!(config.network.timeout, 0);
    }

    #[test]
    fn test_rc_overrides_toml() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("depbundle.toml"), "[network]\ntimeout = 10\n").unwrap();
        std::fs::write(dir.path().join(".depbundlerc"), r#"{"network": {"timeout": 45}}"#).unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.network.timeout(), Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_rc_can_restore_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("depbundle.toml"),
            "[registry]\nurl = \"https://registry.example.com\"\n\n[network]\nconcurrency = 4\ntimeout = 10\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(".depbundlerc"),
            r#"{"registry": {"url": "https://registry.npmjs.org"}, "network": {"concurrency": 0}}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.registry.url, "https://registry.npmjs.org");
        assert_eq!(config.network.concurrency, 0);
        // untouched by the rc file
        assert_eq!(config.network.timeout, 10);
    }

    #[test]
    fn test_invalid_registry_rejected() {
        let mut config = Config::default();
        config.registry.url = "ftp://registry.example.com".to_string();
        assert!(config.validate().is_err());

        config.registry.url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fan_out_limit() {
        let mut network = NetworkConfig::default();
        assert_eq!(network.fan_out_limit(7), 7);
        assert_eq!(network.fan_out_limit(0), 1);

        network.concurrency = 3;
        assert_eq!(network.fan_out_limit(7), 3);
    }
}

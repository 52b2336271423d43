use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::http::connection::{ConnectionSettings, DEFAULT_READ_BUFFER_SIZE};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to
    pub listen_addr: String,
    /// Root directory for `/files/<name>`
    pub directory: PathBuf,
    /// Maximum bytes read per request
    pub read_buffer_size: usize,
    /// Per-connection deadline in milliseconds
    pub read_timeout_ms: u64,
    /// How long shutdown waits for in-flight connections, in milliseconds
    pub shutdown_grace_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:4221".to_string(),
            directory: PathBuf::from("."),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            read_timeout_ms: 5_000,
            shutdown_grace_ms: 5_000,
        }
    }
}

impl Config {
    /// Defaults overridden by the `LISTEN` and `DIRECTORY` environment variables.
    pub fn load() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    /// Parses a YAML document. Missing fields take their defaults.
    pub fn from_yaml(source: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(source).context("invalid YAML configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads a YAML file, then applies environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut cfg = Self::from_yaml(&source)?;
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("LISTEN") {
            self.server.listen_addr = addr;
        }
        if let Ok(dir) = std::env::var("DIRECTORY") {
            self.server.directory = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.read_buffer_size == 0 {
            anyhow::bail!("read_buffer_size must be greater than zero");
        }
        if self.server.listen_addr.is_empty() {
            anyhow::bail!("listen_addr must not be empty");
        }
        Ok(())
    }
}

impl ServerConfig {
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            read_buffer_size: self.read_buffer_size,
            timeout: Duration::from_millis(self.read_timeout_ms),
        }
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

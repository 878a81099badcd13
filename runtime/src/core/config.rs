use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::cli::CliConfig;
use super::constants::{DEFAULT_DATABASE_URL, DEFAULT_HOST, DEFAULT_PORT};
use crate::query::PagingConfig;

// =============================================================================
// File Config (JSON)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    server: Option<FileServerConfig>,
    database: Option<FileDatabaseConfig>,
    paging: Option<FilePagingConfig>,
    #[serde(flatten)]
    extra: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FileServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FileDatabaseConfig {
    url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FilePagingConfig {
    default_size: Option<u64>,
    max_size: Option<u64>,
}

impl FileConfig {
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra {
            if !map.is_empty() {
                let keys_str: String = map
                    .keys()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                tracing::warn!(
                    fields = %keys_str,
                    "Unknown fields in config file (possible typos)"
                );
            }
        }
    }
}

// =============================================================================
// Runtime Config
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeConfig {
    pub server: ServerConfig,
    pub database_url: String,
    pub paging: PagingConfig,
}

impl RuntimeConfig {
    /// Load configuration.
    ///
    /// Order (later wins): defaults, config file, CLI arguments (which
    /// include env var fallbacks via clap).
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file_config = match cli.config {
            Some(ref path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                let config = FileConfig::load_from_file(path)?;
                config.warn_unknown_fields();
                config
            }
            None => FileConfig::default(),
        };
        Self::layer(cli, file_config)
    }

    fn layer(cli: &CliConfig, file_config: FileConfig) -> Result<Self> {
        let file_server = file_config.server.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();
        let file_paging = file_config.paging.unwrap_or_default();
        let defaults = PagingConfig::default();

        let config = Self {
            server: ServerConfig {
                host: cli
                    .host
                    .clone()
                    .or(file_server.host)
                    .unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT),
            },
            database_url: cli
                .database_url
                .clone()
                .or(file_database.url)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            paging: PagingConfig {
                default_size: cli
                    .page_size_default
                    .or(file_paging.default_size)
                    .unwrap_or(defaults.default_size),
                max_size: cli
                    .page_size_max
                    .or(file_paging.max_size)
                    .unwrap_or(defaults.max_size),
            },
        };
        config.validate()?;

        tracing::debug!(config = ?config, "Configuration loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.paging.max_size == 0 {
            anyhow::bail!("Maximum page size must be greater than 0");
        }
        if self.paging.default_size > self.paging.max_size {
            anyhow::bail!(
                "Default page size {} exceeds maximum page size {}",
                self.paging.default_size,
                self.paging.max_size
            );
        }
        Ok(())
    }
}

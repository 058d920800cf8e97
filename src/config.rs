//! Configuration loading from TOML.
//!
//! Reads `config.toml` (or the path named by `DEBTSIM_CONFIG`) and
//! deserializes into strongly-typed structs. Every section has defaults,
//! so a missing file or a partial file is fine.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::storage::DEFAULT_DOCUMENT_FILE;

/// Environment variable that overrides the config file path.
pub const CONFIG_PATH_ENV: &str = "DEBTSIM_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSection {
    #[serde(default = "default_app_name")]
    pub name: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: default_app_name(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Document used when save/load requests name no path.
    #[serde(default = "default_document_path")]
    pub document_path: String,
    /// Load `document_path` into the form at startup if it exists.
    #[serde(default)]
    pub load_on_start: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            document_path: default_document_path(),
            load_on_start: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

fn default_app_name() -> String {
    "Debt Repayment Simulation".to_string()
}

fn default_document_path() -> String {
    DEFAULT_DOCUMENT_FILE.to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_chart_width() -> u32 {
    500
}

fn default_chart_height() -> u32 {
    300
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Config path from the environment, else `config.toml`.
    pub fn path_from_env() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
    }

    /// `host:port` for the dashboard listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.dashboard.host, self.dashboard.port)
    }
}

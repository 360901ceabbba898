pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
            verbose: false,
            json_logs: false,
        }
    }
}

impl Settings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Layer a TOML file over the defaults.
    pub fn apply_file(mut self, file: &TomlConfig) -> Self {
        if let Some(base_url) = &file.catalog.base_url {
            self.base_url = base_url.clone();
        }
        if file.catalog.timeout_seconds.is_some() {
            self.timeout_seconds = file.catalog.timeout_seconds;
        }
        if let Some(verbose) = file.logging.verbose {
            self.verbose = verbose;
        }
        if let Some(json) = file.logging.json {
            self.json_logs = json;
        }
        self
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_base_url("base_url", &self.base_url)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "storefront")]
#[command(about = "Browse a remote product catalog and keep a session cart")]
pub struct CliConfig {
    #[arg(long, help = "Catalog service base URL [default: https://fakestoreapi.com]")]
    pub base_url: Option<String>,

    #[arg(long, help = "TOML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Per-request timeout in seconds (none by default)")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the config file, then command line flags.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            validation::validate_config_path("config", path)?;
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            settings = settings.apply_file(&file);
        }

        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if self.timeout_seconds.is_some() {
            settings.timeout_seconds = self.timeout_seconds;
        }
        settings.verbose |= self.verbose;
        settings.json_logs |= self.json_logs;

        settings.validate()?;
        Ok(settings)
    }
}

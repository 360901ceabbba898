use crate::utils::error::{Result, StoreError};
use crate::utils::validation::{validate_base_url, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let config: Self = toml::from_str(&processed_content)?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${CATALOG_URL})，未設定的變數保持原樣並記錄警告
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            StoreError::ConfigError {
                message: format!("env substitution pattern: {}", e),
            }
        })?;

        let mut unresolved = Vec::new();
        let result = re.replace_all(content, |caps: &regex::Captures| match std::env::var(&caps[1]) {
            Ok(value) => value,
            Err(_) => {
                unresolved.push(caps[1].to_string());
                caps[0].to_string()
            }
        });

        if !unresolved.is_empty() {
            tracing::warn!("Unset variables left in config: {}", unresolved.join(", "));
        }
        Ok(result.into_owned())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.catalog.base_url {
            validate_base_url("catalog.base_url", base_url)?;
        }
        if let Some(timeout) = self.catalog.timeout_seconds {
            validate_range("catalog.timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}

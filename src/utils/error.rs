use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Catalog returned {status} for {url}")]
    StatusError { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Product is not loaded yet")]
    ProductNotLoaded,

    #[error("Unknown route: {path}")]
    UnknownRoute { path: String },

    #[error("Invalid command: {message}")]
    InvalidCommand { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Navigation,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
}

impl StoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::StatusError { .. } => ErrorCategory::Network,
            Self::UrlError(_)
            | Self::IoError(_)
            | Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::UnknownRoute { .. } => ErrorCategory::Navigation,
            Self::ProductNotLoaded | Self::InvalidCommand { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Navigation => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    /// True for failures of a catalog round trip (transport, status, decode).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::ApiError(_) | Self::StatusError { .. } | Self::SerializationError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => "The catalog took too long to answer".to_string(),
            Self::ApiError(_) => "Could not reach the product catalog".to_string(),
            Self::StatusError { status, .. } => {
                format!("The product catalog answered with status {}", status)
            }
            Self::ProductNotLoaded => "The product has not been loaded".to_string(),
            Self::UnknownRoute { path } => format!("There is no page at '{}'", path),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your connection or the catalog base URL, then retry",
            ErrorCategory::Configuration => "Review the command line flags and the config file",
            ErrorCategory::Data => "The catalog sent an unexpected payload; try again later",
            ErrorCategory::Navigation => "Use 'list', 'cart' or 'open <id>'",
            ErrorCategory::Input => "Type 'help' to see the available commands",
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

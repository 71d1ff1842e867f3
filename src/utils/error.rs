use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid service identifier: '{value}'")]
    InvalidIdentifier { value: String },

    #[error("Invalid domain '{domain}': expected at least two non-empty labels")]
    InvalidDomain { domain: String },

    #[error("Catalog fetch failed: {message}")]
    CatalogFetch { message: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Selection error: {message}")]
    SelectionError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    Output,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GenError::HttpError(_) | GenError::CatalogFetch { .. } => ErrorCategory::Network,
            GenError::ConfigError { .. }
            | GenError::ConfigValidationError { .. }
            | GenError::InvalidConfigValueError { .. }
            | GenError::MissingConfigError { .. }
            | GenError::TemplateError { .. } => ErrorCategory::Configuration,
            GenError::InvalidIdentifier { .. }
            | GenError::InvalidDomain { .. }
            | GenError::SelectionError { .. } => ErrorCategory::Input,
            GenError::IoError(_) => ErrorCategory::Output,
            GenError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 選取操作錯誤只影響單次操作
            GenError::SelectionError { .. } | GenError::InvalidDomain { .. } => ErrorSeverity::Low,
            GenError::HttpError(_) | GenError::CatalogFetch { .. } => ErrorSeverity::Medium,
            GenError::ConfigError { .. }
            | GenError::ConfigValidationError { .. }
            | GenError::InvalidConfigValueError { .. }
            | GenError::MissingConfigError { .. }
            | GenError::InvalidIdentifier { .. }
            | GenError::TemplateError { .. } => ErrorSeverity::High,
            GenError::IoError(_) | GenError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GenError::HttpError(_) => {
                "Check network connectivity and the configured endpoints, then retry".to_string()
            }
            GenError::CatalogFetch { .. } => {
                "Verify the catalog endpoint is reachable and returns a tree listing".to_string()
            }
            GenError::IoError(_) => "Check that the output path exists and is writable".to_string(),
            GenError::SerializationError(_) => {
                "Inspect the upstream response format; it may have changed".to_string()
            }
            GenError::ConfigError { .. } | GenError::ConfigValidationError { .. } => {
                "Review the configuration file syntax and values".to_string()
            }
            GenError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            GenError::MissingConfigError { field } => format!("Provide a value for '{}'", field),
            GenError::InvalidIdentifier { .. } => {
                "Service identifiers may only contain a-z, 0-9 and '-', such as 'google-drive'".to_string()
            }
            GenError::InvalidDomain { .. } => {
                "Use a registrable domain such as 'example.com'".to_string()
            }
            GenError::TemplateError { .. } => {
                "Make sure the template contains the placeholder token".to_string()
            }
            GenError::SelectionError { .. } => {
                "Use indices within the current selection length".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach a remote service: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
            ErrorCategory::Internal => format!("Unexpected internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

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

    #[error("Provider '{provider}' failed: {message}")]
    ProviderError { provider: String, message: String },

    #[error("Delivery to {target} failed: {reason}")]
    DeliveryError { target: String, reason: String },

    #[error("Data integrity fault: {message}")]
    DataIntegrityError { message: String },
}

impl NotifierError {
    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NotifierError::ApiError(_) => "Check network connectivity and the endpoint address",
            NotifierError::IoError(_) => "Check that the file exists and is readable",
            NotifierError::SerializationError(_) => {
                "The remote service returned an unexpected payload"
            }
            NotifierError::ConfigError { .. }
            | NotifierError::ConfigValidationError { .. }
            | NotifierError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
            NotifierError::MissingConfigError { .. } => {
                "Add the missing value to notifier.toml or pass it on the command line"
            }
            NotifierError::ProviderError { .. } => {
                "The provider is unavailable; the message degrades without it"
            }
            NotifierError::DeliveryError { .. } => "Verify the webhook key is still valid",
            NotifierError::DataIntegrityError { .. } => {
                "Increase countdown.horizon_days; a week must fit in the horizon"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifierError>;

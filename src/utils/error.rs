use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("SMS provider send failed: {0}")]
    ProviderSendFailure(#[from] GatewayError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// SMS 供應商呼叫失敗
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider rejected request (HTTP {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        code: Option<i64>,
        message: Option<String>,
    },

    #[error("malformed provider response: {reason}")]
    MalformedResponse { reason: String },
}

impl GatewayError {
    /// 供應商提供的可讀錯誤訊息（若有）
    pub fn provider_message(&self) -> Option<String> {
        match self {
            GatewayError::Transport(e) => Some(e.to_string()),
            GatewayError::Rejected { message, .. } => {
                message.clone().filter(|m| !m.trim().is_empty())
            }
            GatewayError::MalformedResponse { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Provider,
    Configuration,
    System,
}

impl RelayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RelayError::Unauthenticated { .. } | RelayError::InvalidArgument { .. } => {
                ErrorCategory::Validation
            }
            RelayError::ProviderSendFailure(_) => ErrorCategory::Provider,
            RelayError::ConfigError { .. }
            | RelayError::MissingConfigError { .. }
            | RelayError::InvalidConfigValueError { .. }
            | RelayError::TomlError(_) => ErrorCategory::Configuration,
            RelayError::IoError(_) | RelayError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RelayError::Unauthenticated { message } | RelayError::InvalidArgument { message } => {
                message.clone()
            }
            RelayError::ProviderSendFailure(e) => format!("SMS could not be sent: {}", e),
            RelayError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            RelayError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Sign in and provide a message and at least one contact",
            ErrorCategory::Provider => {
                "Check the SMS provider account status and recipient numbers"
            }
            ErrorCategory::Configuration => {
                "Set TWILIO_SID, TWILIO_TOKEN and TWILIO_NUMBER or add a [twilio] section to the config file"
            }
            ErrorCategory::System => "Check the request file path and that it contains valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

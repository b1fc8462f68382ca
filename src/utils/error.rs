use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{field} not set or empty.")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid domain '{domain}': {reason}")]
    InvalidDomainError { domain: String, reason: String },

    #[error("Zone {zone} not found")]
    ZoneNotFoundError { zone: String },

    #[error("API error {message} (code {code})")]
    ApiError { code: i64, message: String },

    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatusError { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Api,
    Transport,
}

impl HookError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HookError::MissingConfigError { .. }
            | HookError::InvalidConfigValueError { .. }
            | HookError::ConfigParseError { .. } => ErrorCategory::Config,
            HookError::InvalidDomainError { .. }
            | HookError::ZoneNotFoundError { .. }
            | HookError::ApiError { .. }
            | HookError::HttpStatusError { .. } => ErrorCategory::Api,
            HookError::HttpError(_) | HookError::IoError(_) | HookError::SerializationError(_) => {
                ErrorCategory::Transport
            }
        }
    }

    /// Process exit code for a fatal error of this kind.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Api => 1,
            ErrorCategory::Config => 2,
            ErrorCategory::Transport => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, HookError>;

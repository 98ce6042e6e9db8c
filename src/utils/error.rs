use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("No results found for query: {query}")]
    NotFoundError { query: String },

    #[error("Upstream request failed: {0}")]
    UpstreamRequestError(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamStatusError { status: u16, body: String },

    #[error("Malformed upstream response: {0}")]
    MalformedResponseError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Upstream,
    Configuration,
}

/// JSON body returned for every non-200 response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl LookupError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::NotFoundError { .. } => ErrorCategory::NotFound,
            Self::UpstreamRequestError(_)
            | Self::UpstreamStatusError { .. }
            | Self::MalformedResponseError(_) => ErrorCategory::Upstream,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::IoError(_) => ErrorCategory::Configuration,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Upstream | ErrorCategory::Configuration => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to hand back to an HTTP caller. Upstream and
    /// configuration details stay in the server log.
    pub fn public_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::NotFoundError { .. } => "No results found".to_string(),
            _ => "Internal Server Error".to_string(),
        }
    }

    /// Message printed to stderr when the process refuses to start.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingConfigError { field } => {
                format!("Missing {} in environment or config file", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => {
                tracing::debug!(status = %status, "request rejected: {}", self);
            }
            ErrorCategory::Upstream | ErrorCategory::Configuration => {
                tracing::error!(status = %status, category = ?self.category(), "request failed: {}", self);
            }
        }

        (status, Json(ErrorBody::new(self.public_message()))).into_response()
    }
}

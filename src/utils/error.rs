use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised by the ordering API client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request to {url} failed with status: {status}")]
    Status { status: u16, url: String },

    #[error("{stage} failed: {codes}")]
    Rejected {
        stage: &'static str,
        codes: String,
        body: Value,
    },

    #[error("Invalid API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid API url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Raw response body attached to a rejection, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Parse,
    External,
    Config,
}

/// Outcome of a failed command. Every variant ends up as `{ok:false, error, ...}`.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Parse(String),

    #[error("{message}")]
    External {
        message: String,
        diagnostics: Map<String, Value>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CommandError {
    pub fn validation(message: impl Into<String>) -> Self {
        CommandError::Validation(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        CommandError::Parse(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        CommandError::Config {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CommandError::Validation(_) => ErrorCategory::Input,
            CommandError::Parse(_) => ErrorCategory::Parse,
            CommandError::External { .. } => ErrorCategory::External,
            CommandError::Config { .. } => ErrorCategory::Config,
        }
    }

    /// Extra fields merged into the failure envelope next to `error`.
    pub fn diagnostics(&self) -> Option<&Map<String, Value>> {
        match self {
            CommandError::External { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }

    pub fn with_diagnostics(self, extra: Map<String, Value>) -> Self {
        match self {
            CommandError::External {
                message,
                mut diagnostics,
            } => {
                diagnostics.extend(extra);
                CommandError::External {
                    message,
                    diagnostics,
                }
            }
            other => other,
        }
    }
}

impl From<ApiError> for CommandError {
    fn from(err: ApiError) -> Self {
        CommandError::External {
            message: err.to_string(),
            diagnostics: Map::new(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CommandError>;

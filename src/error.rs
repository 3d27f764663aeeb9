use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn log_and_record(&self, ctx: &str) {
        match self {
            AppError::Validation(msg) => {
                warn!(message = %msg, context = %ctx, "Validation error");
            }
            AppError::NotFound(msg) => {
                warn!(message = %msg, context = %ctx, "Not found error");
            }
            AppError::Authorization(msg) => {
                warn!(message = %msg, context = %ctx, "Authorization error");
            }
            AppError::Format(msg) => {
                warn!(message = %msg, context = %ctx, "Format error");
            }
            AppError::State(msg) => {
                warn!(message = %msg, context = %ctx, "State error");
            }
            AppError::Storage(msg) => {
                error!(message = %msg, context = %ctx, "Storage error");
            }
            AppError::Internal(msg) => {
                error!(message = %msg, context = %ctx, "Internal error");
            }
        }
    }

    /// Storage and internal failures cannot be recovered from the menu loop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Storage(_) | AppError::Internal(_))
    }

    /// The message shown on the console, without the variant prefix.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Authorization(msg)
            | AppError::Format(msg)
            | AppError::State(msg)
            | AppError::Storage(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::Storage(format!("I/O error: {}", error))
    }
}

impl From<csv::Error> for AppError {
    fn from(error: csv::Error) -> Self {
        AppError::Storage(format!("CSV error: {}", error))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| {
                    error
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();

        // field_errors is a HashMap, keep the output stable
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::store::StorageError;

/// Application-level error type.
/// Every workflow returns `Result<T, AppError>`; the CLI turns it into a
/// blocking notice via [`AppError::notice`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The same action is already waiting on the model.
    #[error("Already running: {0}")]
    Busy(&'static str),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The message shown to the user. Model failures carry the provider's own
    /// wording; nothing here is retried.
    pub fn notice(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Busy(action) => {
                format!("{action} is still waiting for the model; try again when it finishes.")
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                format!("API call failed: {}", e.user_message())
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                format!("Could not read or write local data: {e}")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal error occurred".to_string()
            }
        }
    }

    /// Model failures usually mean a bad key, model or endpoint.
    pub fn is_llm(&self) -> bool {
        matches!(self, AppError::Llm(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_is_passed_through() {
        let err = AppError::from(LlmError::Provider {
            message: "API key not valid".to_string(),
        });
        assert_eq!(err.notice(), "API call failed: API key not valid");
        assert!(err.is_llm());
    }

    #[test]
    fn test_decode_failure_uses_generic_message() {
        let err = AppError::from(LlmError::EmptyContent);
        assert_eq!(
            err.notice(),
            "API call failed: No valid response was received from the model."
        );
    }

    #[test]
    fn test_busy_names_the_action() {
        let err = AppError::Busy("Project generation");
        assert!(err.notice().starts_with("Project generation is still waiting"));
        assert!(!err.is_llm());
    }
}

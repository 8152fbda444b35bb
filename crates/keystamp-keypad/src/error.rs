//! Keypad generation errors.

use keystamp_blueprint::{BlueprintError, HostError};
use thiserror::Error;

/// Errors that can occur while laying out or building a keypad module.
#[derive(Debug, Error)]
pub enum KeypadError {
    #[error("invalid keypad configuration: {detail}")]
    Config { detail: String },

    #[error("blueprint error in {part}: {source}")]
    Blueprint {
        part: String,
        #[source]
        source: BlueprintError,
    },

    #[error("host error: {0}")]
    Host(#[from] HostError),
}

impl KeypadError {
    pub(crate) fn config(detail: impl Into<String>) -> Self {
        KeypadError::Config {
            detail: detail.into(),
        }
    }

    pub(crate) fn blueprint(part: impl Into<String>) -> impl FnOnce(BlueprintError) -> Self {
        let part = part.into();
        move |source| KeypadError::Blueprint { part, source }
    }
}

/// Result type for keypad operations.
pub type Result<T> = std::result::Result<T, KeypadError>;

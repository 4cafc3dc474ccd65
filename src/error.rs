//! Error types for assistant skills

use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for skill registration and invocation
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed call (missing or empty skill name)
    #[error("Invalid call: {0}")]
    InvalidCall(String),

    /// No skill registered under the requested name
    #[error("No skill registered with name '{0}'")]
    UnknownSkill(String),

    /// A skill with the same (case-insensitive) name already exists
    #[error("Skill '{0}' is already registered")]
    DuplicateSkill(String),

    /// The skill being registered is malformed
    #[error("Invalid skill: {0}")]
    InvalidSkill(String),

    /// The call arguments could not be bound to the handler's input
    #[error("Invalid arguments for skill '{skill}': {message}")]
    InvalidArguments {
        /// Skill being invoked
        skill: String,
        /// What went wrong while binding
        message: String,
    },

    /// Invocation aborted by its cancellation token
    #[error("Skill invocation was cancelled")]
    Cancelled,

    /// The handler itself failed. Display, source and downcasting all
    /// resolve to the handler's original error.
    #[error(transparent)]
    Handler(anyhow::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if error is a client error (caller's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidCall(_)
                | Error::UnknownSkill(_)
                | Error::DuplicateSkill(_)
                | Error::InvalidSkill(_)
                | Error::InvalidArguments { .. }
        )
    }

    /// Check if the invocation was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// The handler's original error, if this is a handler failure
    pub fn handler_error(&self) -> Option<&anyhow::Error> {
        match self {
            Error::Handler(err) => Some(err),
            _ => None,
        }
    }

    /// Downcast a handler failure back to the concrete error it raised
    pub fn downcast_handler_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        self.handler_error().and_then(|err| err.downcast_ref::<E>())
    }

    /// Translate a handler's error into an invocation error.
    ///
    /// A handler that returns a bare `Error::Cancelled` or
    /// `Error::InvalidArguments` surfaces as that variant. Anything else,
    /// including errors with context layered on top, is kept as the
    /// original `anyhow::Error`.
    pub(crate) fn from_handler(err: anyhow::Error) -> Self {
        let bare_variant = err.chain().count() == 1
            && matches!(
                err.downcast_ref::<Error>(),
                Some(Error::Cancelled | Error::InvalidArguments { .. })
            );
        if !bare_variant {
            return Error::Handler(err);
        }

        match err.downcast::<Error>() {
            Ok(variant) => variant,
            Err(original) => Error::Handler(original),
        }
    }
}

/// Core error types for Spendwise
use thiserror::Error;

use crate::validation::FieldErrors;

/// Result type alias using `SpendError`
pub type Result<T> = std::result::Result<T, SpendError>;

/// Core error type for Spendwise
#[derive(Error, Debug)]
pub enum SpendError {
    /// An expense was created while no user owns the list
    #[error("Cannot create expense without ownerId")]
    MissingOwner,

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A single invalid value, with a user-facing message
    #[error("{0}")]
    InvalidInput(String),

    /// A form with one or more invalid fields
    #[error("Invalid form: {0}")]
    Validation(FieldErrors),

    /// The store refused the request because the caller is not authenticated
    #[error("Authentication required")]
    Unauthorized,

    /// The store could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The store answered with an error
    #[error("Store error: {0}")]
    Store(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl SpendError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// True for failures worth retrying from the UI (connectivity, server errors)
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Store(_))
    }
}

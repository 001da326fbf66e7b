//! Session error types

use spendwise_core::SpendError;
use thiserror::Error;

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors from signing in, registering and profile updates
#[derive(Error, Debug)]
pub enum SessionError {
    /// No user matched the email and password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that already has an account
    #[error("Email already in use")]
    EmailInUse,

    /// Validation or store failure
    #[error(transparent)]
    Core(#[from] SpendError),
}

impl SessionError {
    /// True when the user can fix the problem by changing their input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::EmailInUse
                | Self::Core(SpendError::Validation(_) | SpendError::InvalidInput(_))
        )
    }
}

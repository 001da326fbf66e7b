//! Spendwise session
//!
//! Sign-in, registration and profile updates against a
//! [`UserStore`](spendwise_core::UserStore). The session is an
//! [`IdentityProvider`](spendwise_core::IdentityProvider): expense lists can
//! follow it to reset on logout and reload on login.
//!
//! Credentials live in memory only.

#![forbid(unsafe_code)]

mod error;
mod manager;

pub use error::{Result, SessionError};
pub use manager::{mint_token, SessionManager, SessionState};

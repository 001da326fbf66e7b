//! Error types for the Spendwise API client.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use spendwise_core::SpendError;
use thiserror::Error;

/// Errors that can occur when talking to the expense API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The server rejected the request as unauthenticated
    #[error("Authentication required")]
    AuthRequired,

    /// The addressed record does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Invalid base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<ClientError> for SpendError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound { entity, id } => SpendError::not_found(entity, id),
            ClientError::AuthRequired => SpendError::Unauthorized,
            ClientError::ServerUnreachable(msg) => SpendError::Network(msg),
            ClientError::Request(e) if e.is_connect() || e.is_timeout() => {
                SpendError::Network(e.to_string())
            }
            ClientError::InvalidUrl(msg) => SpendError::invalid_input(msg),
            other => SpendError::store(other.to_string()),
        }
    }
}

/// Classify a transport failure.
pub(crate) fn send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Turn a non-success response into an error, consuming its body.
pub(crate) async fn status_error(response: Response) -> ClientError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return ClientError::AuthRequired;
    }

    let message = response.text().await.unwrap_or_default();
    ClientError::ServerError {
        status: status.as_u16(),
        message,
    }
}

/// Decode a successful JSON body, naming `what` on failure.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

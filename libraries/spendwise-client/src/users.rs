//! User endpoints.

use crate::error::{read_json, send_error, status_error, ClientError, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use spendwise_core::{CreateUser, UpdateUser, User, UserId};
use tracing::debug;

/// Client for `/users`.
pub struct UsersClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Get every registered user.
    pub async fn list(&self) -> Result<Vec<User>> {
        let url = format!("{}/users", self.base_url);
        debug!(url = %url, "Fetching users");

        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(send_error)?;

        if response.status().is_success() {
            read_json(response, "user list").await
        } else {
            Err(status_error(response).await)
        }
    }

    /// Get a single user by ID.
    pub async fn get(&self, id: &UserId) -> Result<User> {
        let url = format!("{}/users/{}", self.base_url, id);
        debug!(url = %url, user_id = %id, "Fetching user");

        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();

        if status.is_success() {
            read_json(response, "user").await
        } else if status == StatusCode::NOT_FOUND {
            Err(not_found(id))
        } else {
            Err(status_error(response).await)
        }
    }

    /// Register a user.
    pub async fn create(&self, user: &CreateUser) -> Result<User> {
        let url = format!("{}/users", self.base_url);
        debug!(url = %url, username = %user.username, "Creating user");

        let response = self
            .authorize(self.http.post(&url))
            .json(user)
            .send()
            .await
            .map_err(send_error)?;

        if response.status().is_success() {
            read_json(response, "created user").await
        } else {
            Err(status_error(response).await)
        }
    }

    /// Update a user's profile; the server returns the full record.
    pub async fn update(&self, id: &UserId, changes: &UpdateUser) -> Result<User> {
        let url = format!("{}/users/{}", self.base_url, id);
        debug!(url = %url, user_id = %id, "Updating user");

        let response = self
            .authorize(self.http.put(&url))
            .json(changes)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();

        if status.is_success() {
            read_json(response, "updated user").await
        } else if status == StatusCode::NOT_FOUND {
            Err(not_found(id))
        } else {
            Err(status_error(response).await)
        }
    }
}

fn not_found(id: &UserId) -> ClientError {
    ClientError::NotFound {
        entity: "User",
        id: id.to_string(),
    }
}

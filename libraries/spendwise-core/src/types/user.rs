/// User domain type
use super::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User account as stored by the remote API
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Account creation timestamp
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,

    /// Stored in plain text by the mock API
    pub password: String,

    /// Spending budget, 0 when unset
    #[serde(default)]
    pub budget: f64,
}

impl User {
    /// "First Last", falling back to the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.firstname.trim(), self.lastname.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("budget", &self.budget)
            .finish()
    }
}

/// Data for registering a user
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUser {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub budget: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}

/// Profile changes (all fields optional)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

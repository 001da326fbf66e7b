//! Session manager
//!
//! Holds the signed-in user and token in memory and publishes the owner id
//! that expense lists follow.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use spendwise_core::validation::{parse_budget, validate_login, RegistrationForm};
use spendwise_core::{
    CreateUser, IdentityProvider, OwnerChannel, UpdateUser, User, UserId, UserStore,
};
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::error::{Result, SessionError};

/// Snapshot of the session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// An operation is running
    pub loading: bool,
    /// Message of the last failed operation; cleared when the next one starts
    pub error: Option<String>,
}

/// Signs users in against a [`UserStore`] and tracks who is signed in.
pub struct SessionManager {
    users: Arc<dyn UserStore>,
    state: RwLock<SessionState>,
    owner: OwnerChannel,
}

impl SessionManager {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            state: RwLock::new(SessionState::default()),
            owner: OwnerChannel::default(),
        }
    }

    /// Sign in with email and password.
    ///
    /// The store has no auth endpoint, so the user list is fetched and
    /// matched locally; the token is minted client-side.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.track(async {
            validate_login(email, password)?;
            let email = email.trim();

            debug!(email = %email, "Signing in");
            let user = self
                .users
                .list_users()
                .await?
                .into_iter()
                .find(|u| u.email == email && u.password == password)
                .ok_or(SessionError::InvalidCredentials)?;

            self.establish(user.clone()).await;
            info!(user_id = %user.id, "Signed in");
            Ok::<_, SessionError>(user)
        })
        .await
    }

    /// Create an account and sign in as it.
    ///
    /// `budget` defaults to 0 when not given.
    pub async fn register(&self, form: &RegistrationForm, budget: Option<f64>) -> Result<User> {
        self.track(async {
            form.validate()?;
            let email = form.email.trim();

            if self
                .users
                .list_users()
                .await?
                .iter()
                .any(|u| u.email == email)
            {
                return Err(SessionError::EmailInUse);
            }

            let user = self
                .users
                .create_user(CreateUser {
                    firstname: form.first_name.trim().to_string(),
                    lastname: form.last_name.trim().to_string(),
                    username: form.username.trim().to_string(),
                    email: email.to_string(),
                    password: form.password.clone(),
                    budget: budget.unwrap_or(0.0),
                    created_at: Utc::now(),
                })
                .await?;

            self.establish(user.clone()).await;
            info!(user_id = %user.id, "Registered");
            Ok::<_, SessionError>(user)
        })
        .await
    }

    /// Update the signed-in user's profile.
    ///
    /// Returns `None` without contacting the store when nobody is signed in.
    pub async fn update_profile(&self, changes: UpdateUser) -> Result<Option<User>> {
        let Some(id) = self.user_id().await else {
            debug!("Profile update without a signed-in user ignored");
            return Ok(None);
        };

        self.track(async {
            let updated = self.users.update_user(&id, changes).await?;
            self.state.write().await.user = Some(updated.clone());
            info!(user_id = %id, "Profile updated");
            Ok::<_, SessionError>(Some(updated))
        })
        .await
    }

    /// Parse budget text and save it on the profile.
    pub async fn set_budget(&self, input: &str) -> Result<Option<User>> {
        let budget = match parse_budget(input) {
            Ok(budget) => budget,
            Err(e) => {
                self.state.write().await.error = Some(e.to_string());
                return Err(e.into());
            }
        };

        self.update_profile(UpdateUser {
            budget: Some(budget),
            ..Default::default()
        })
        .await
    }

    /// Forget the user and token; expense lists following this session reset.
    pub async fn logout(&self) {
        let previous = {
            let mut state = self.state.write().await;
            let previous = state.user.take().map(|u| u.id);
            state.token = None;
            state.error = None;
            previous
        };
        self.owner.set(None);

        match previous {
            Some(id) => info!(user_id = %id, "Signed out"),
            None => debug!("Sign out without a signed-in user"),
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.user.is_some()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    async fn user_id(&self) -> Option<UserId> {
        self.state.read().await.user.as_ref().map(|u| u.id.clone())
    }

    async fn establish(&self, user: User) {
        let token = mint_token(&user.id);
        let owner = user.id.clone();
        {
            let mut state = self.state.write().await;
            state.user = Some(user);
            state.token = Some(token);
        }
        self.owner.set(Some(owner));
    }

    /// Run an operation with the loading flag set, recording its error.
    async fn track<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = operation.await;

        let mut state = self.state.write().await;
        state.loading = false;
        if let Err(e) = &result {
            warn!(error = %e, "Session operation failed");
            state.error = Some(e.to_string());
        }
        result
    }
}

impl IdentityProvider for SessionManager {
    fn current_owner(&self) -> Option<UserId> {
        self.owner.current_owner()
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserId>> {
        self.owner.subscribe()
    }
}

/// Token in the form `mock-token-<unix millis>-<user id>`
pub fn mint_token(user_id: &UserId) -> String {
    format!("mock-token-{}-{}", Utc::now().timestamp_millis(), user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_embeds_user_id() {
        let token = mint_token(&UserId::new("42"));
        let rest = token.strip_prefix("mock-token-").unwrap();
        let (millis, id) = rest.split_once('-').unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
        assert_eq!(id, "42");
    }
}

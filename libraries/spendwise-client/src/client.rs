//! Main Spendwise API client.

use crate::error::{ClientError, Result};
use crate::expenses::ExpensesClient;
use crate::types::ApiConfig;
use crate::users::UsersClient;
use async_trait::async_trait;
use reqwest::Client;
use spendwise_core::{
    CreateExpense, CreateUser, Expense, ExpenseId, ExpenseStore, UpdateExpense, UpdateUser, User,
    UserId, UserStore,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Client for the expense API.
///
/// Holds the HTTP connection pool and the bearer token. Implements
/// [`ExpenseStore`] and [`UserStore`], so it can be handed straight to the
/// expense list and the session.
///
/// # Example
///
/// ```ignore
/// use spendwise_client::{ApiConfig, SpendwiseClient};
///
/// let client = SpendwiseClient::new(ApiConfig::default())?;
/// let users = client.users().await.client().list().await?;
/// println!("{} users registered", users.len());
/// ```
#[derive(Clone)]
pub struct SpendwiseClient {
    http: Client,
    config: Arc<RwLock<ApiConfig>>,
}

impl SpendwiseClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        let parsed =
            url::Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Spendwise/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ApiConfig { base_url, ..config })),
        })
    }

    /// Get the base URL.
    pub async fn url(&self) -> String {
        self.config.read().await.base_url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Set or clear the bearer token used for subsequent requests.
    pub async fn set_access_token(&self, access_token: Option<String>) {
        let signed_in = access_token.is_some();
        self.config.write().await.access_token = access_token;
        if !signed_in {
            info!("Access token cleared");
        }
    }

    /// Get the current token.
    pub async fn access_token(&self) -> Option<String> {
        self.config.read().await.access_token.clone()
    }

    /// Get a handle for expense operations.
    pub async fn expenses(&self) -> ExpensesClientHandle {
        let config = self.config.read().await;
        ExpensesClientHandle {
            http: self.http.clone(),
            url: config.base_url.clone(),
            access_token: config.access_token.clone(),
        }
    }

    /// Get a handle for user operations.
    pub async fn users(&self) -> UsersClientHandle {
        let config = self.config.read().await;
        UsersClientHandle {
            http: self.http.clone(),
            url: config.base_url.clone(),
            access_token: config.access_token.clone(),
        }
    }
}

/// Handle for expense operations.
///
/// Returned by `SpendwiseClient::expenses()`; captures the URL and token at
/// the time it was taken.
pub struct ExpensesClientHandle {
    http: Client,
    url: String,
    access_token: Option<String>,
}

impl ExpensesClientHandle {
    /// Get the expenses client.
    pub fn client(&self) -> ExpensesClient<'_> {
        ExpensesClient::new(&self.http, &self.url, self.access_token.as_deref())
    }
}

/// Handle for user operations.
pub struct UsersClientHandle {
    http: Client,
    url: String,
    access_token: Option<String>,
}

impl UsersClientHandle {
    /// Get the users client.
    pub fn client(&self) -> UsersClient<'_> {
        UsersClient::new(&self.http, &self.url, self.access_token.as_deref())
    }
}

#[async_trait]
impl ExpenseStore for SpendwiseClient {
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: u32,
        page_size: u32,
    ) -> spendwise_core::Result<Vec<Expense>> {
        let handle = self.expenses().await;
        Ok(handle.client().list_by_owner(owner_id, page, page_size).await?)
    }

    async fn list_all(&self) -> spendwise_core::Result<Vec<Expense>> {
        let handle = self.expenses().await;
        Ok(handle.client().list_all().await?)
    }

    async fn get_expense(&self, id: &ExpenseId) -> spendwise_core::Result<Expense> {
        let handle = self.expenses().await;
        Ok(handle.client().get(id).await?)
    }

    async fn create_expense(&self, expense: CreateExpense) -> spendwise_core::Result<Expense> {
        let handle = self.expenses().await;
        Ok(handle.client().create(&expense).await?)
    }

    async fn update_expense(
        &self,
        id: &ExpenseId,
        changes: UpdateExpense,
    ) -> spendwise_core::Result<Expense> {
        let handle = self.expenses().await;
        Ok(handle.client().update(id, &changes).await?)
    }

    async fn delete_expense(&self, id: &ExpenseId) -> spendwise_core::Result<()> {
        let handle = self.expenses().await;
        Ok(handle.client().delete(id).await?)
    }
}

#[async_trait]
impl UserStore for SpendwiseClient {
    async fn list_users(&self) -> spendwise_core::Result<Vec<User>> {
        let handle = self.users().await;
        Ok(handle.client().list().await?)
    }

    async fn get_user(&self, id: &UserId) -> spendwise_core::Result<User> {
        let handle = self.users().await;
        Ok(handle.client().get(id).await?)
    }

    async fn create_user(&self, user: CreateUser) -> spendwise_core::Result<User> {
        let handle = self.users().await;
        Ok(handle.client().create(&user).await?)
    }

    async fn update_user(&self, id: &UserId, changes: UpdateUser) -> spendwise_core::Result<User> {
        let handle = self.users().await;
        Ok(handle.client().update(id, &changes).await?)
    }
}

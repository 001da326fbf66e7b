//! Spendwise API Client
//!
//! HTTP client library for the Spendwise expense API (a mock REST service
//! exposing `/expenses` and `/users`).
//!
//! # Features
//!
//! - **Expenses**: paginated listing by owner, get, create, update, delete
//! - **Users**: list, get, register, profile update
//! - **Store traits**: [`SpendwiseClient`] implements
//!   [`spendwise_core::ExpenseStore`] and [`spendwise_core::UserStore`]
//!
//! # Example
//!
//! ```ignore
//! use spendwise_client::{ApiConfig, SpendwiseClient};
//! use spendwise_core::{ExpenseStore, UserId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpendwiseClient::new(ApiConfig::default())?;
//!     let page = client.list_by_owner(&UserId::new("1"), 1, 10).await?;
//!     println!("First page has {} expenses", page.len());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod expenses;
mod types;
mod users;

// Re-export main types
pub use client::{ExpensesClientHandle, SpendwiseClient, UsersClientHandle};
pub use error::{ClientError, Result};
pub use types::{ApiConfig, DEFAULT_BASE_URL};

// Re-export sub-clients for direct use if needed
pub use expenses::ExpensesClient;
pub use users::UsersClient;

//! Spendwise expense list
//!
//! Keeps a locally cached, paginated view of one owner's expenses in step
//! with an [`ExpenseStore`](spendwise_core::ExpenseStore).
//!
//! - Pages are fetched on demand; a page shorter than the page size marks the
//!   end of data.
//! - Creates are prepended to the list with the store's returned record,
//!   updates are merged in place and deletes remove the entry once the store
//!   confirms.
//! - Page requests carry the owner id and a generation counter. Responses
//!   that arrive after an owner change or a refresh are dropped.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use spendwise_client::{ApiConfig, SpendwiseClient};
//! use spendwise_core::UserId;
//! use spendwise_expenses::{ExpenseListController, LoadOutcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SpendwiseClient::new(ApiConfig::default())?;
//! let controller = ExpenseListController::new(Arc::new(client));
//!
//! controller.set_owner(Some(UserId::new("1"))).await;
//! while controller.has_more() {
//!     if !matches!(controller.load_next_page().await, LoadOutcome::Loaded { .. }) {
//!         break;
//!     }
//! }
//! println!("{} expenses", controller.expenses().len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod controller;
pub mod state;

pub use controller::{ExpenseListController, LoadOutcome};
pub use state::{ListAction, ListState, LoadMode, PageRequest, DEFAULT_PAGE_SIZE};

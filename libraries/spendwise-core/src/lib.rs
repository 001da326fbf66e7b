//! Spendwise Core
//!
//! Platform-agnostic domain types, store traits and business rules for the
//! Spendwise expense tracker.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Expense`, `User` and their create/update payloads
//! - **Store Traits**: `ExpenseStore`, `UserStore` (implemented over HTTP by
//!   `spendwise-client`)
//! - **Identity**: `IdentityProvider`, the current owner id with change
//!   notification
//! - **Rules**: form validation, budget alerts and spending summaries
//! - **Error Handling**: unified `SpendError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use spendwise_core::validation::ExpenseForm;
//! use spendwise_core::BudgetPolicy;
//!
//! let form = ExpenseForm {
//!     title: "Coffee".into(),
//!     amount: "4.5".into(),
//!     category: "Food".into(),
//!     description: String::new(),
//! };
//! let draft = form.validate().unwrap();
//! assert_eq!(draft.amount, 4.5);
//!
//! let policy = BudgetPolicy::default();
//! assert!(policy.check(draft.amount, 5.0).is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod budget;
pub mod error;
pub mod identity;
pub mod store;
pub mod summary;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use budget::{BudgetAlert, BudgetPolicy};
pub use error::{Result, SpendError};
pub use identity::{IdentityProvider, OwnerChannel};
pub use store::{ExpenseStore, UserStore};
pub use summary::{CategorySpending, SpendingSummary};
pub use types::{
    CreateExpense, CreateUser, Expense, ExpenseDraft, ExpenseId, UpdateExpense, UpdateUser, User,
    UserId,
};

//! Store traits for the remote collaborators
//!
//! The expense list and the session only ever talk to these traits, so the
//! HTTP client can be swapped for an in-memory store in tests.

use crate::error::Result;
use crate::types::{
    CreateExpense, CreateUser, Expense, ExpenseId, UpdateExpense, UpdateUser, User, UserId,
};
use async_trait::async_trait;

/// Remote expense persistence
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// One page of an owner's expenses. Pages start at 1; a page shorter than
    /// `page_size` (possibly empty) means there is nothing after it.
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Expense>>;

    /// Every expense, regardless of owner
    async fn list_all(&self) -> Result<Vec<Expense>>;

    /// Get expense by ID
    async fn get_expense(&self, id: &ExpenseId) -> Result<Expense>;

    /// Persist a new expense; the store assigns id and creation time
    async fn create_expense(&self, expense: CreateExpense) -> Result<Expense>;

    /// Apply a partial update and return the full updated record
    async fn update_expense(&self, id: &ExpenseId, changes: UpdateExpense) -> Result<Expense>;

    /// Delete an expense
    async fn delete_expense(&self, id: &ExpenseId) -> Result<()>;
}

/// Remote user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get all users
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: &UserId) -> Result<User>;

    /// Create a new user
    async fn create_user(&self, user: CreateUser) -> Result<User>;

    /// Update a user's profile
    async fn update_user(&self, id: &UserId, changes: UpdateUser) -> Result<User>;
}

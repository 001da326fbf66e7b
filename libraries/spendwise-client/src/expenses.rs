//! Expense endpoints.

use crate::error::{read_json, send_error, status_error, ClientError, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use spendwise_core::{CreateExpense, Expense, ExpenseId, UpdateExpense, UserId};
use tracing::debug;

/// Client for `/expenses`.
pub struct ExpensesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> ExpensesClient<'a> {
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

    /// Get one page of an owner's expenses.
    ///
    /// The mock API answers a filter with no matches with 404, which is
    /// reported here as an empty page.
    pub async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Expense>> {
        let url = format!("{}/expenses", self.base_url);
        debug!(url = %url, owner_id = %owner_id, page, limit, "Fetching expense page");

        let response = self
            .authorize(self.http.get(&url))
            .query(&[
                ("ownerId", owner_id.to_string()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();

        if status.is_success() {
            let expenses: Vec<Expense> = read_json(response, "expense page").await?;
            debug!(count = expenses.len(), page, "Fetched expense page");
            Ok(expenses)
        } else if status == StatusCode::NOT_FOUND {
            debug!(page, "No expenses matched");
            Ok(Vec::new())
        } else {
            Err(status_error(response).await)
        }
    }

    /// Get every expense.
    pub async fn list_all(&self) -> Result<Vec<Expense>> {
        let url = format!("{}/expenses", self.base_url);
        debug!(url = %url, "Fetching all expenses");

        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(send_error)?;

        if response.status().is_success() {
            read_json(response, "expense list").await
        } else {
            Err(status_error(response).await)
        }
    }

    /// Get a single expense by ID.
    pub async fn get(&self, id: &ExpenseId) -> Result<Expense> {
        let url = format!("{}/expenses/{}", self.base_url, id);
        debug!(url = %url, expense_id = %id, "Fetching expense");

        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();

        if status.is_success() {
            read_json(response, "expense").await
        } else if status == StatusCode::NOT_FOUND {
            Err(not_found(id))
        } else {
            Err(status_error(response).await)
        }
    }

    /// Create an expense; the server assigns `id` and `createdAt`.
    pub async fn create(&self, expense: &CreateExpense) -> Result<Expense> {
        let url = format!("{}/expenses", self.base_url);
        debug!(url = %url, owner_id = %expense.owner_id, "Creating expense");

        let response = self
            .authorize(self.http.post(&url))
            .json(expense)
            .send()
            .await
            .map_err(send_error)?;

        if response.status().is_success() {
            let created: Expense = read_json(response, "created expense").await?;
            debug!(expense_id = %created.id, "Expense created");
            Ok(created)
        } else {
            Err(status_error(response).await)
        }
    }

    /// Update an expense; the server returns the full record.
    pub async fn update(&self, id: &ExpenseId, changes: &UpdateExpense) -> Result<Expense> {
        let url = format!("{}/expenses/{}", self.base_url, id);
        debug!(url = %url, expense_id = %id, "Updating expense");

        let response = self
            .authorize(self.http.put(&url))
            .json(changes)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();

        if status.is_success() {
            read_json(response, "updated expense").await
        } else if status == StatusCode::NOT_FOUND {
            Err(not_found(id))
        } else {
            Err(status_error(response).await)
        }
    }

    /// Delete an expense.
    pub async fn delete(&self, id: &ExpenseId) -> Result<()> {
        let url = format!("{}/expenses/{}", self.base_url, id);
        debug!(url = %url, expense_id = %id, "Deleting expense");

        let response = self
            .authorize(self.http.delete(&url))
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();

        if status.is_success() {
            debug!(expense_id = %id, "Expense deleted");
            Ok(())
        } else if status == StatusCode::NOT_FOUND {
            Err(not_found(id))
        } else {
            Err(status_error(response).await)
        }
    }
}

fn not_found(id: &ExpenseId) -> ClientError {
    ClientError::NotFound {
        entity: "Expense",
        id: id.to_string(),
    }
}

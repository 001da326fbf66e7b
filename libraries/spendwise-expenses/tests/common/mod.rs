//! In-memory expense store used by the controller tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use spendwise_core::{
    CreateExpense, Expense, ExpenseId, ExpenseStore, Result, SpendError, UpdateExpense, UserId,
};

pub fn expense(id: &str, owner: &str, amount: f64) -> Expense {
    Expense {
        id: ExpenseId::new(id),
        created_at: Utc::now(),
        title: format!("Expense {}", id),
        amount,
        category: "Food".into(),
        description: String::new(),
        owner_id: UserId::new(owner),
    }
}

/// `count` expenses for `owner` with ids `<prefix>1..=<prefix>count`
pub fn expenses_for(owner: &str, prefix: &str, count: usize) -> Vec<Expense> {
    (1..=count)
        .map(|i| expense(&format!("{}{}", prefix, i), owner, i as f64))
        .collect()
}

/// Store backed by a vector, with failure injection and a pause switch
/// for holding list requests in flight.
#[derive(Default)]
pub struct MemoryStore {
    expenses: Mutex<Vec<Expense>>,
    next_id: AtomicUsize,
    fail_lists: AtomicBool,
    list_calls: Mutex<Vec<(UserId, u32, u32)>>,
    pause: tokio::sync::Mutex<()>,
}

impl MemoryStore {
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        Self {
            expenses: Mutex::new(expenses),
            next_id: AtomicUsize::new(1000),
            ..Self::default()
        }
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Every `(owner, page, limit)` the store was asked for
    pub fn list_calls(&self) -> Vec<(UserId, u32, u32)> {
        self.list_calls.lock().unwrap().clone()
    }

    /// Hold list requests until the guard is dropped
    pub async fn pause(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.pause.lock().await
    }

    pub fn count(&self) -> usize {
        self.expenses.lock().unwrap().len()
    }

    pub fn get(&self, id: &str) -> Option<Expense> {
        self.expenses
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id.as_str() == id)
            .cloned()
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Expense>> {
        self.list_calls
            .lock()
            .unwrap()
            .push((owner_id.clone(), page, page_size));

        let _held = self.pause.lock().await;

        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(SpendError::Network("connection reset".into()));
        }

        let skip = (page.saturating_sub(1) * page_size) as usize;
        Ok(self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| &e.owner_id == owner_id)
            .skip(skip)
            .take(page_size as usize)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Expense>> {
        Ok(self.expenses.lock().unwrap().clone())
    }

    async fn get_expense(&self, id: &ExpenseId) -> Result<Expense> {
        self.get(id.as_str())
            .ok_or_else(|| SpendError::not_found("Expense", id.as_str()))
    }

    async fn create_expense(&self, expense: CreateExpense) -> Result<Expense> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Expense {
            id: ExpenseId::new(format!("e{}", id)),
            created_at: Utc::now(),
            title: expense.title,
            amount: expense.amount,
            category: expense.category,
            description: expense.description,
            owner_id: expense.owner_id,
        };
        self.expenses.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_expense(&self, id: &ExpenseId, changes: UpdateExpense) -> Result<Expense> {
        let mut expenses = self.expenses.lock().unwrap();
        let expense = expenses
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| SpendError::not_found("Expense", id.as_str()))?;
        expense.apply(&changes);
        Ok(expense.clone())
    }

    async fn delete_expense(&self, id: &ExpenseId) -> Result<()> {
        let mut expenses = self.expenses.lock().unwrap();
        let before = expenses.len();
        expenses.retain(|e| &e.id != id);
        if expenses.len() == before {
            return Err(SpendError::not_found("Expense", id.as_str()));
        }
        Ok(())
    }
}

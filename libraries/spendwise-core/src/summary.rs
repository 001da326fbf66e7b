//! Spending totals for the dashboard

use std::collections::HashMap;

use crate::types::Expense;

/// Number of entries shown in the "recent" list
pub const RECENT_LIMIT: usize = 3;

/// Spending in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

/// Aggregate view over the loaded expenses
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    pub total_spent: f64,
    pub expense_count: usize,
    /// Budget minus spending; negative once over budget
    pub remaining_budget: f64,
    /// Largest total first
    pub by_category: Vec<CategorySpending>,
    /// Head of the list, newest first
    pub recent: Vec<Expense>,
}

impl SpendingSummary {
    /// Summarize `expenses` (in list order) against `budget`.
    pub fn from_expenses(expenses: &[Expense], budget: f64) -> Self {
        let total_spent = total_spent(expenses);
        Self {
            total_spent,
            expense_count: expenses.len(),
            remaining_budget: budget - total_spent,
            by_category: by_category(expenses),
            recent: expenses.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

/// Sum of all amounts
pub fn total_spent(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Totals per category, sorted by total (descending) then name
pub fn by_category(expenses: &[Expense]) -> Vec<CategorySpending> {
    let mut totals: HashMap<&str, CategorySpending> = HashMap::new();
    for expense in expenses {
        let entry = totals
            .entry(expense.category.as_str())
            .or_insert_with(|| CategorySpending {
                category: expense.category.clone(),
                total: 0.0,
                count: 0,
            });
        entry.total += expense.amount;
        entry.count += 1;
    }

    let mut categories: Vec<CategorySpending> = totals.into_values().collect();
    categories.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    categories
}

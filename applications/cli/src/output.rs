//! Terminal output

use spendwise_core::{BudgetAlert, BudgetPolicy, Expense, SpendingSummary, User};

pub fn print_expenses(expenses: &[Expense], policy: &BudgetPolicy) {
    if expenses.is_empty() {
        println!("No expenses yet.");
        return;
    }

    for expense in expenses {
        println!("{}", expense_line(expense, policy));
    }
    println!("{} expense(s)", expenses.len());
}

/// One row of the expense list: id, date, title, category, amount
pub fn expense_line(expense: &Expense, policy: &BudgetPolicy) -> String {
    format!(
        "{:>6}  {}  {:<24}  {:<14}  {:>14}",
        expense.id.as_str(),
        expense.created_at.format("%Y-%m-%d"),
        truncate(&expense.title, 24),
        truncate(&expense.category, 14),
        policy.format_amount(expense.amount)
    )
}

pub fn print_expense_details(expense: &Expense, policy: &BudgetPolicy) {
    println!("  ID:          {}", expense.id);
    println!("  Title:       {}", expense.title);
    println!("  Amount:      {}", policy.format_amount(expense.amount));
    println!("  Category:    {}", expense.category);
    if !expense.description.is_empty() {
        println!("  Description: {}", expense.description);
    }
    println!(
        "  Created:     {}",
        expense.created_at.format("%Y-%m-%d %H:%M")
    );
}

pub fn print_profile(user: &User, policy: &BudgetPolicy) {
    println!("{}", user.display_name());
    println!("  Username: {}", user.username);
    println!("  Email:    {}", user.email);
    println!("  Budget:   {}", policy.format_amount(user.budget));
    if let Some(created_at) = user.created_at {
        println!("  Joined:   {}", created_at.format("%Y-%m-%d"));
    }
}

pub fn print_summary(summary: &SpendingSummary, budget: f64, policy: &BudgetPolicy) {
    println!("Total spent:  {}", policy.format_amount(summary.total_spent));
    println!("Budget:       {}", policy.format_amount(budget));
    println!("Remaining:    {}", policy.format_amount(summary.remaining_budget));
    println!("Expenses:     {}", summary.expense_count);

    if !summary.by_category.is_empty() {
        println!();
        println!("By category:");
        for category in &summary.by_category {
            println!(
                "  {:<16} {:>14}  ({})",
                truncate(&category.category, 16),
                policy.format_amount(category.total),
                category.count
            );
        }
    }

    if !summary.recent.is_empty() {
        println!();
        println!("Recent:");
        for expense in &summary.recent {
            println!("{}", expense_line(expense, policy));
        }
    }

    if let Some(alert) = policy.check(summary.total_spent, budget) {
        println!();
        print_alert(policy, &alert);
    }
}

pub fn print_alert(policy: &BudgetPolicy, alert: &BudgetAlert) {
    let (title, body) = policy.describe(alert);
    println!("{}: {}", title, body);
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}

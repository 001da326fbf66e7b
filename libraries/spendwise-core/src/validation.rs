//! Form validation
//!
//! Mirrors the checks the app runs before talking to the store. Single-value
//! checks fail with [`SpendError::InvalidInput`]; multi-field forms collect
//! every problem into [`FieldErrors`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SpendError};
use crate::types::ExpenseDraft;

/// Shown when a required expense field is blank
pub const MISSING_EXPENSE_FIELDS: &str = "Please fill in Title, Amount, and Category.";
/// Shown when an expense amount is not a positive number
pub const INVALID_AMOUNT: &str = "Please enter a valid positive amount.";
/// Shown when a budget is not a non-negative number
pub const INVALID_BUDGET: &str = "Please enter a valid non-negative number for your budget.";

const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Same loose shape check as the sign-up screen
    Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid")
});

/// Per-field validation messages, keyed by field name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, keeping the first one reported
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation error
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(SpendError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Raw text from the add/edit expense form
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl ExpenseForm {
    /// Validate the form and produce a draft with trimmed text fields.
    pub fn validate(&self) -> Result<ExpenseDraft> {
        let title = self.title.trim();
        let amount = self.amount.trim();
        let category = self.category.trim();

        if title.is_empty() || amount.is_empty() || category.is_empty() {
            return Err(SpendError::invalid_input(MISSING_EXPENSE_FIELDS));
        }

        let amount = parse_amount(amount).ok_or_else(|| SpendError::invalid_input(INVALID_AMOUNT))?;
        if amount <= 0.0 {
            return Err(SpendError::invalid_input(INVALID_AMOUNT));
        }

        Ok(ExpenseDraft {
            title: title.to_string(),
            amount,
            category: category.to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

/// Raw text from the sign-up form
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Validate every field, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();

        if self.first_name.trim().is_empty() {
            errors.add("first_name", "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.add("last_name", "Last name is required");
        }
        if self.username.trim().is_empty() {
            errors.add("username", "Username is required");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "Email is required");
        } else if !EMAIL_PATTERN.is_match(email) {
            errors.add("email", "Email is invalid");
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("password", "Password must be at least 6 characters");
        }
        if self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match");
        }

        errors.into_result()
    }
}

/// Check that both login fields were filled in.
pub fn validate_login(email: &str, password: &str) -> Result<()> {
    let mut errors = FieldErrors::new();
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    }
    if password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors.into_result()
}

/// Parse budget text; zero clears the budget.
pub fn parse_budget(input: &str) -> Result<f64> {
    match parse_amount(input.trim()) {
        Some(budget) if budget >= 0.0 => Ok(budget),
        _ => Err(SpendError::invalid_input(INVALID_BUDGET)),
    }
}

fn parse_amount(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

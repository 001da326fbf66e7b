//! Budget threshold notifications

use serde::{Deserialize, Serialize};

/// Fraction of the budget at which a warning is raised
pub const DEFAULT_WARNING_RATIO: f64 = 0.8;

/// Currency code appended to formatted amounts
pub const DEFAULT_CURRENCY: &str = "RWF";

/// How spending is compared against a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPolicy {
    pub warning_ratio: f64,
    pub currency: String,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            warning_ratio: DEFAULT_WARNING_RATIO,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// A notification about spending relative to the budget
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetAlert {
    /// Spending reached the warning ratio but not the budget
    Warning {
        spent: f64,
        budget: f64,
        /// Whole percent of the budget used
        percent: u32,
    },
    /// Spending reached or passed the budget
    Exceeded { spent: f64, budget: f64 },
}

impl BudgetPolicy {
    /// Compare `spent` against `budget`. No alert is produced while no budget
    /// is set (zero or negative).
    pub fn check(&self, spent: f64, budget: f64) -> Option<BudgetAlert> {
        if budget <= 0.0 || spent < budget * self.warning_ratio {
            return None;
        }

        if spent >= budget {
            Some(BudgetAlert::Exceeded { spent, budget })
        } else {
            Some(BudgetAlert::Warning {
                spent,
                budget,
                percent: (spent / budget * 100.0).round() as u32,
            })
        }
    }

    /// Format an amount with two decimals and the currency code.
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{amount:.2}{}", self.currency)
    }

    /// Title and body text for an alert.
    pub fn describe(&self, alert: &BudgetAlert) -> (&'static str, String) {
        match alert {
            BudgetAlert::Exceeded { spent, budget } => (
                "Budget Exceeded",
                format!(
                    "You have spent {} and exceeded your budget of {}.",
                    self.format_amount(*spent),
                    self.format_amount(*budget)
                ),
            ),
            BudgetAlert::Warning {
                spent,
                budget,
                percent,
            } => (
                "Budget Warning",
                format!(
                    "You have spent {} which is {}% of your budget ({}).",
                    self.format_amount(*spent),
                    percent,
                    self.format_amount(*budget)
                ),
            ),
        }
    }
}

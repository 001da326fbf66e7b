mod expense;
mod ids;
mod user;

pub use expense::{CreateExpense, Expense, ExpenseDraft, UpdateExpense};
pub use ids::{ExpenseId, UserId};
pub use user::{CreateUser, UpdateUser, User};

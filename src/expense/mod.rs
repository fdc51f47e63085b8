//! Expense management.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and validation of requests to create one
//! - Database functions for storing, querying, and deleting expenses
//! - The JSON endpoints, including the summary grouped by month

mod create;
mod db;
mod delete;
mod domain;
mod get;
mod grouped;
mod list;

pub use create::create_expense_endpoint;
pub use db::{create_expense, create_expense_table, delete_expense, get_expense, list_expenses};
pub use delete::delete_expense_endpoint;
pub use domain::{CreateExpenseRequest, Expense, ExpenseFilter, NewExpense};
pub use get::get_expense_endpoint;
pub use grouped::get_grouped_expenses_endpoint;
pub use list::list_expenses_endpoint;

#[cfg(test)]
pub use db::count_expenses;

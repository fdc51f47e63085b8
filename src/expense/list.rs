//! Defines the endpoint for listing expenses.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    expense::{Expense, ExpenseFilter, list_expenses},
};

/// The state needed to list expenses.
#[derive(Debug, Clone)]
pub struct ListExpensesState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The optional query parameters for narrowing the list of expenses,
/// e.g. `?category=Food&date=2025-09-16`.
#[derive(Debug, Default, Deserialize)]
pub struct ListExpensesQuery {
    pub category: Option<String>,
    pub date: Option<String>,
}

impl From<ListExpensesQuery> for ExpenseFilter {
    /// Empty parameters, e.g. `?category=`, do not filter anything.
    fn from(query: ListExpensesQuery) -> Self {
        Self {
            category: query.category.filter(|category| !category.is_empty()),
            date: query.date.filter(|date| !date.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseList {
    pub expenses: Vec<Expense>,
}

/// A route handler for listing the expenses that match the query parameters.
pub async fn list_expenses_endpoint(
    State(state): State<ListExpensesState>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<ExpenseList>, Error> {
    let filter = ExpenseFilter::from(query);

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let expenses = list_expenses(&filter, &connection)?;

    Ok(Json(ExpenseList { expenses }))
}

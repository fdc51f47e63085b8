//! Defines the endpoint for fetching a single expense.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::{Expense, get_expense},
};

/// The state needed to get an expense.
#[derive(Debug, Clone)]
pub struct GetExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for getting an expense by its ID.
///
/// A path segment that is not an integer cannot refer to an expense, so it is
/// reported as not found.
pub async fn get_expense_endpoint(
    State(state): State<GetExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Json<Expense>, Error> {
    let Ok(Path(expense_id)) = expense_id else {
        return Err(Error::NotFound);
    };

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    get_expense(expense_id, &connection)?
        .map(Json)
        .ok_or(Error::NotFound)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        expense::{NewExpense, create_expense},
    };

    use super::{GetExpenseState, get_expense_endpoint};

    fn get_test_state() -> GetExpenseState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        GetExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn returns_stored_expense() {
        let state = get_test_state();
        let expense = create_expense(
            NewExpense {
                title: "Train ticket".to_owned(),
                amount: 7.2,
                category: "Transport".to_owned(),
                date: "2025-09-20".to_owned(),
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let got = get_expense_endpoint(State(state), Ok(Path(expense.id)))
            .await
            .expect("Could not get expense");

        assert_eq!(got.0, expense);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let state = get_test_state();

        let got = get_expense_endpoint(State(state), Ok(Path(42))).await;

        assert_eq!(got.map(|json| json.0), Err(Error::NotFound));
    }
}

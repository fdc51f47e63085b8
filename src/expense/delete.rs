//! Expense deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::delete_expense,
};

/// The state needed for deleting an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExpenseDeleted {
    message: &'static str,
}

/// Handle expense deletion. Responds with a 404 if there is nothing to delete.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Response {
    let Ok(Path(expense_id)) = expense_id else {
        return Error::NotFound.into_response();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(true) => {
            tracing::info!("Deleted expense {expense_id}");
            Json(ExpenseDeleted {
                message: "Expense deleted",
            })
            .into_response()
        }
        Ok(false) => Error::NotFound.into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting expense {expense_id}: {error}"
            );
            error.into_response()
        }
    }
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        expense::{NewExpense, count_expenses, create_expense, get_expense},
    };

    use super::{DeleteExpenseState, delete_expense_endpoint};

    fn get_delete_expense_state() -> DeleteExpenseState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        DeleteExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn delete_expense_endpoint_succeeds() {
        let state = get_delete_expense_state();
        let expense = create_expense(
            NewExpense {
                title: "Cinema".to_owned(),
                amount: 18.0,
                category: "Entertainment".to_owned(),
                date: "2025-10-03".to_owned(),
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test expense");

        let response = delete_expense_endpoint(State(state.clone()), Ok(Path(expense.id)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_expense(expense.id, &connection), Ok(None));
    }

    #[tokio::test]
    async fn delete_expense_endpoint_with_invalid_id_returns_not_found() {
        let state = get_delete_expense_state();
        let invalid_id = 999999;

        let response = delete_expense_endpoint(State(state.clone()), Ok(Path(invalid_id)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection), Ok(0));
    }
}

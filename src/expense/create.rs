//! Defines the endpoint for creating a new expense.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    endpoints::{self, format_endpoint},
    expense::{CreateExpenseRequest, create_expense},
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExpenseCreated {
    message: &'static str,
    id: ExpenseId,
}

/// A route handler for creating a new expense, responds with the new ID on success.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!("Rejected create expense payload: {rejection}");
            return Error::InvalidPayload(rejection.body_text()).into_response();
        }
    };

    let new_expense =
        match CreateExpenseRequest::from_json(body).and_then(CreateExpenseRequest::validate) {
            Ok(new_expense) => new_expense,
            Err(error) => {
                tracing::debug!("Invalid create expense request: {error}");
                return error.into_response();
            }
        };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_expense(new_expense, &connection) {
        Ok(expense) => (
            StatusCode::CREATED,
            [(
                LOCATION,
                format_endpoint(endpoints::EXPENSE, expense.id),
            )],
            Json(ExpenseCreated {
                message: "Expense added",
                id: expense.id,
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not create expense: {error}");
            error.into_response()
        }
    }
}

//! The summary of expenses grouped by calendar month.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Serialize, Serializer, ser::SerializeMap};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    expense::{Expense, ExpenseFilter, list_expenses},
};

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

const MONTH_LABEL_FORMAT: &[BorrowedFormatItem] = format_description!("[month repr:long] [year]");

/// The expenses for one calendar month and their total amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGroup {
    /// The month and year, e.g. "September 2025".
    #[serde(skip)]
    pub label: String,
    pub expenses: Vec<Expense>,
    pub total: f64,
}

/// Expenses partitioned by calendar month, in chronological order.
///
/// Serializes as a JSON object mapping each month label to its group, e.g.
/// `{"September 2025": {"expenses": [...], "total": 15.0}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySummary {
    pub months: Vec<MonthGroup>,
}

impl Serialize for MonthlySummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.months.len()))?;

        for group in &self.months {
            map.serialize_entry(&group.label, group)?;
        }

        map.end()
    }
}

/// Group `expenses` by the calendar month of their date.
///
/// Expenses keep their relative order within a month and months are sorted
/// from oldest to newest.
///
/// # Errors
///
/// Returns [Error::InvalidDateFormat] if any expense date is not a valid
/// `YYYY-MM-DD` date.
pub fn group_by_month(expenses: Vec<Expense>) -> Result<MonthlySummary, Error> {
    let mut months: BTreeMap<(i32, u8), MonthGroup> = BTreeMap::new();

    for expense in expenses {
        let date = Date::parse(&expense.date, DATE_FORMAT)
            .map_err(|error| Error::InvalidDateFormat(error.to_string(), expense.date.clone()))?;

        let group = match months.entry((date.year(), u8::from(date.month()))) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(MonthGroup {
                label: month_label(date)?,
                expenses: Vec::new(),
                total: 0.0,
            }),
        };

        group.total += expense.amount;
        group.expenses.push(expense);
    }

    Ok(MonthlySummary {
        months: months.into_values().collect(),
    })
}

fn month_label(date: Date) -> Result<String, Error> {
    date.format(MONTH_LABEL_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), date.to_string()))
}

/// The state needed for the grouped expenses summary.
#[derive(Debug, Clone)]
pub struct GroupedExpensesState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GroupedExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for the summary of all expenses grouped by month.
pub async fn get_grouped_expenses_endpoint(
    State(state): State<GroupedExpensesState>,
) -> Result<Json<MonthlySummary>, Error> {
    let expenses = {
        let connection = state.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        list_expenses(&ExpenseFilter::default(), &connection)?
    };

    group_by_month(expenses).map(Json).inspect_err(|error| {
        tracing::error!("could not group expenses by month: {error}");
    })
}

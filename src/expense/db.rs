//! Database operations for expenses.

use rusqlite::{Connection, OptionalExtension, Row, ToSql};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{Expense, ExpenseFilter, NewExpense},
};

/// Store an expense and return it with its generated ID.
pub fn create_expense(expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expenses (title, amount, category, date) VALUES (?1, ?2, ?3, ?4);",
        (
            &expense.title,
            expense.amount,
            &expense.category,
            &expense.date,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Expense {
        id,
        title: expense.title,
        amount: expense.amount,
        category: expense.category,
        date: expense.date,
    })
}

/// Retrieve the expenses matching every filter in `filter`, in the order they
/// were created.
///
/// An empty list is returned when nothing matches.
pub fn list_expenses(filter: &ExpenseFilter, connection: &Connection) -> Result<Vec<Expense>, Error> {
    let mut conditions = Vec::new();
    let mut params: Vec<(&str, &dyn ToSql)> = Vec::new();

    if let Some(category) = &filter.category {
        conditions.push("category = :category");
        params.push((":category", category as &dyn ToSql));
    }

    if let Some(date) = &filter.date {
        conditions.push("date = :date");
        params.push((":date", date as &dyn ToSql));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let query = format!(
        "SELECT id, title, amount, category, date FROM expenses {where_clause} ORDER BY id ASC;"
    );

    connection
        .prepare(&query)?
        .query_map(params.as_slice(), map_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Retrieve a single expense by ID, or `None` if there is no such expense.
pub fn get_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Option<Expense>, Error> {
    connection
        .prepare("SELECT id, title, amount, category, date FROM expenses WHERE id = :id;")?
        .query_row(&[(":id", &expense_id)], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Delete an expense by ID.
///
/// Returns `true` if an expense was deleted and `false` if there was no
/// expense with the ID.
pub fn delete_expense(expense_id: ExpenseId, connection: &Connection) -> Result<bool, Error> {
    let rows_affected = connection.execute("DELETE FROM expenses WHERE id = ?1", [expense_id])?;

    Ok(rows_affected > 0)
}

/// Count the stored expenses.
#[cfg(test)]
pub fn count_expenses(connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row("SELECT COUNT(*) FROM expenses;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Initialize the expense table.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        date: row.get(4)?,
    })
}

#[cfg(test)]
mod expense_query_tests {
    use rusqlite::Connection;

    use crate::expense::{Expense, ExpenseFilter, NewExpense};

    use super::{
        count_expenses, create_expense, create_expense_table, delete_expense, get_expense,
        list_expenses,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_expense_table(&connection).expect("Could not create expense table");
        connection
    }

    fn new_expense(title: &str, amount: f64, category: &str, date: &str) -> NewExpense {
        NewExpense {
            title: title.to_owned(),
            amount,
            category: category.to_owned(),
            date: date.to_owned(),
        }
    }

    fn insert_test_expenses(connection: &Connection) -> Vec<Expense> {
        [
            new_expense("Groceries", 52.3, "Food", "2025-09-16"),
            new_expense("Bus fare", 3.5, "Transport", "2025-09-16"),
            new_expense("Lunch", 14.0, "Food", "2025-09-17"),
        ]
        .into_iter()
        .map(|expense| create_expense(expense, connection).expect("Could not create expense"))
        .collect()
    }

    #[test]
    fn create_expense_succeeds() {
        let connection = get_test_db_connection();

        let expense = create_expense(
            new_expense("Coffee", 4.5, "Food", "2025-09-16"),
            &connection,
        )
        .expect("Could not create expense");

        assert!(expense.id > 0);
        assert_eq!(expense.title, "Coffee");
        assert_eq!(expense.amount, 4.5);
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.date, "2025-09-16");
    }

    #[test]
    fn create_expense_assigns_increasing_ids() {
        let connection = get_test_db_connection();

        let first = create_expense(new_expense("A", 1.0, "X", "2025-01-01"), &connection).unwrap();
        let second = create_expense(new_expense("B", 2.0, "X", "2025-01-01"), &connection).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let connection = get_test_db_connection();
        let first = create_expense(new_expense("A", 1.0, "X", "2025-01-01"), &connection).unwrap();
        assert!(delete_expense(first.id, &connection).unwrap());

        let second = create_expense(new_expense("B", 2.0, "X", "2025-01-01"), &connection).unwrap();

        assert!(
            second.id > first.id,
            "got id {} after deleting id {}",
            second.id,
            first.id
        );
    }

    #[test]
    fn get_expense_succeeds() {
        let connection = get_test_db_connection();
        let inserted = create_expense(
            new_expense("Coffee", 4.5, "Food", "2025-09-16"),
            &connection,
        )
        .unwrap();

        let selected = get_expense(inserted.id, &connection);

        assert_eq!(selected, Ok(Some(inserted)));
    }

    #[test]
    fn get_expense_with_invalid_id_returns_none() {
        let connection = get_test_db_connection();
        let inserted = create_expense(
            new_expense("Coffee", 4.5, "Food", "2025-09-16"),
            &connection,
        )
        .unwrap();

        let selected = get_expense(inserted.id + 123, &connection);

        assert_eq!(selected, Ok(None));
    }

    #[test]
    fn list_expenses_without_filters_returns_all() {
        let connection = get_test_db_connection();
        let inserted = insert_test_expenses(&connection);

        let got = list_expenses(&ExpenseFilter::default(), &connection).unwrap();

        assert_eq!(got, inserted);
    }

    #[test]
    fn list_expenses_filters_by_category() {
        let connection = get_test_db_connection();
        let inserted = insert_test_expenses(&connection);
        let filter = ExpenseFilter {
            category: Some("Food".to_owned()),
            date: None,
        };

        let got = list_expenses(&filter, &connection).unwrap();

        assert_eq!(got, vec![inserted[0].clone(), inserted[2].clone()]);
    }

    #[test]
    fn list_expenses_filters_by_date() {
        let connection = get_test_db_connection();
        let inserted = insert_test_expenses(&connection);
        let filter = ExpenseFilter {
            category: None,
            date: Some("2025-09-16".to_owned()),
        };

        let got = list_expenses(&filter, &connection).unwrap();

        assert_eq!(got, vec![inserted[0].clone(), inserted[1].clone()]);
    }

    #[test]
    fn list_expenses_filters_by_category_and_date() {
        let connection = get_test_db_connection();
        let inserted = insert_test_expenses(&connection);
        let filter = ExpenseFilter {
            category: Some("Food".to_owned()),
            date: Some("2025-09-17".to_owned()),
        };

        let got = list_expenses(&filter, &connection).unwrap();

        assert_eq!(got, vec![inserted[2].clone()]);
    }

    #[test]
    fn list_expenses_with_no_matches_returns_empty_list() {
        let connection = get_test_db_connection();
        insert_test_expenses(&connection);
        let filter = ExpenseFilter {
            category: Some("Rent".to_owned()),
            date: None,
        };

        let got = list_expenses(&filter, &connection);

        assert_eq!(got, Ok(vec![]));
    }

    #[test]
    fn list_expenses_matches_category_exactly() {
        let connection = get_test_db_connection();
        insert_test_expenses(&connection);
        let filter = ExpenseFilter {
            category: Some("Foo".to_owned()),
            date: None,
        };

        let got = list_expenses(&filter, &connection).unwrap();

        assert!(got.is_empty(), "want no partial matches, got {got:?}");
    }

    #[test]
    fn delete_expense_succeeds() {
        let connection = get_test_db_connection();
        let expense = create_expense(
            new_expense("Coffee", 4.5, "Food", "2025-09-16"),
            &connection,
        )
        .unwrap();

        let deleted = delete_expense(expense.id, &connection);

        assert_eq!(deleted, Ok(true));
        assert_eq!(get_expense(expense.id, &connection), Ok(None));
    }

    #[test]
    fn delete_expense_with_invalid_id_returns_false() {
        let connection = get_test_db_connection();
        insert_test_expenses(&connection);

        let deleted = delete_expense(999999, &connection);

        assert_eq!(deleted, Ok(false));
        assert_eq!(count_expenses(&connection), Ok(3));
    }
}

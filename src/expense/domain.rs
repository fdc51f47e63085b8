//! Core expense domain types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, database_id::ExpenseId};

/// A single spending record, e.g. a coffee bought on the way to work.
///
/// Expenses are immutable once stored: they can only be created or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the database when the expense was created.
    pub id: ExpenseId,
    /// A short description of what the money was spent on.
    pub title: String,
    /// How much was spent.
    pub amount: f64,
    /// A free-form category, e.g. "Food" or "Transport".
    pub category: String,
    /// When the money was spent, as `YYYY-MM-DD` text.
    pub date: String,
}

/// An expense that has passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
}

/// Equality filters for listing expenses. `None` means "match anything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub date: Option<String>,
}

/// The amount sent by a client, either as a JSON number or as text such as
/// `"12.50"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    fn is_empty(&self) -> bool {
        matches!(self, AmountInput::Text(text) if text.is_empty())
    }

    /// Coerce the amount to a finite number.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if the text does not parse as a number,
    /// or parses to `NaN` or an infinity.
    pub fn to_f64(&self) -> Result<f64, Error> {
        let amount = match self {
            AmountInput::Number(number) => *number,
            AmountInput::Text(text) => text.trim().parse().map_err(|_| Error::InvalidAmount)?,
        };

        if amount.is_finite() {
            Ok(amount)
        } else {
            Err(Error::InvalidAmount)
        }
    }
}

/// The JSON body for creating an expense.
///
/// Every field is optional at the type level so that a missing field can be
/// reported by name rather than as a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateExpenseRequest {
    pub title: Option<String>,
    pub amount: Option<AmountInput>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl CreateExpenseRequest {
    /// Read a request from an arbitrary JSON body.
    ///
    /// A body that is not a JSON object, e.g. `null` or `[]`, carries no
    /// fields, so it is read as an empty request and validation reports the
    /// first missing field.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidPayload] if an object field has the wrong type,
    /// e.g. a title that is a list.
    pub fn from_json(body: Value) -> Result<Self, Error> {
        match body {
            Value::Object(_) => serde_json::from_value(body)
                .map_err(|error| Error::InvalidPayload(error.to_string())),
            _ => Ok(Self::default()),
        }
    }

    /// Check the request and convert it into a [NewExpense].
    ///
    /// Fields are checked for presence in the order title, amount, category,
    /// date, and the first missing or empty field is reported. The amount is
    /// only parsed once all four fields are present.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingField] naming the first missing or empty field,
    /// or [Error::InvalidAmount] if the amount is not a number.
    pub fn validate(self) -> Result<NewExpense, Error> {
        let title = require_text("title", self.title)?;
        let amount = match self.amount {
            Some(amount) if !amount.is_empty() => amount,
            _ => return Err(Error::MissingField("amount")),
        };
        let category = require_text("category", self.category)?;
        let date = require_text("date", self.date)?;

        Ok(NewExpense {
            title,
            amount: amount.to_f64()?,
            category,
            date,
        })
    }
}

fn require_text(field: &'static str, value: Option<String>) -> Result<String, Error> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(Error::MissingField(field)),
    }
}

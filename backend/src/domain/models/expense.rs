//! Domain model for an expense.
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::error::{ExpenseError, Result};

/// Column layout of the expense file, in order
pub const EXPENSE_HEADERS: [&str; 4] = ["ID", "Date", "Description", "Amount"];

/// The only accepted date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Opaque expense identifier. Assigned once at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Generate a fresh random (v4) identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ExpenseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the expense file.
///
/// Date and amount are kept as they were stored. Rows written by this crate are
/// always canonical; rows edited by hand may not be, which is why the typed views
/// return `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "ID")]
    pub id: ExpenseId,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl Expense {
    pub fn from_draft(id: ExpenseId, draft: &ExpenseDraft) -> Self {
        Self {
            id,
            date: draft.date.format(DATE_FORMAT).to_string(),
            description: draft.description.clone(),
            amount: draft.amount.to_string(),
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    pub fn parsed_amount(&self) -> Option<Decimal> {
        parse_decimal(&self.amount)
    }
}

/// Validated user input for creating or editing an expense
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl ExpenseDraft {
    /// Validate raw form input. The amount is checked first, then the date,
    /// then the description.
    pub fn parse(date: &str, description: &str, amount: &str) -> Result<Self> {
        let amount = parse_amount(amount)?;
        let date = parse_date(date)?;
        if description.trim().is_empty() {
            return Err(ExpenseError::EmptyDescription);
        }

        Ok(Self {
            date,
            description: description.to_string(),
            amount,
        })
    }
}

/// Parse a strictly positive decimal amount
pub fn parse_amount(input: &str) -> Result<Decimal> {
    match parse_decimal(input) {
        Some(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(ExpenseError::InvalidAmount(input.to_string())),
    }
}

/// Parse a YYYY-MM-DD calendar date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| ExpenseError::InvalidDate(input.to_string()))
}

fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

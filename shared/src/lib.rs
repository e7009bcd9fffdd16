use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A persisted expense as shown in the expense table.
///
/// `date` and `amount` are passed through exactly as stored so that legacy rows
/// can still be displayed and corrected by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Opaque unique identifier (UUID v4)
    pub id: String,
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    pub description: String,
    /// Positive decimal amount, no currency symbol
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// Date in YYYY-MM-DD format - uses today's local date if not provided
    pub date: Option<String>,
    pub description: String,
    /// Amount as typed by the user; parsed as a decimal by the backend
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseResponse {
    pub expense: Expense,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub date: String,
    pub description: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseResponse {
    pub expense: Expense,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    pub deleted_id: String,
    pub success_message: String,
}

/// Query for the monthly total; missing fields default to the current month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummaryRequest {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummaryResponse {
    pub year: i32,
    pub month: u32,
    /// Human readable month, e.g. "May 2024"
    pub label: String,
    pub total: Decimal,
}

/// One bar of the monthly trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Year-month key in YYYY-MM format
    pub month: String,
    pub total: Decimal,
}

/// Monthly totals ordered chronologically (oldest first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeriesResponse {
    pub series: Vec<MonthlyTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    /// Destination file; a dated default name in the data directory is used if not provided
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub file_path: String,
    pub rows_exported: usize,
    pub success_message: String,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine readable error kind, e.g. "invalid_amount"
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_monthly_total_serializes_amount_as_string() {
        let total = MonthlyTotal {
            month: "2024-05".to_string(),
            total: Decimal::from_str("30.00").unwrap(),
        };

        let json = serde_json::to_string(&total).unwrap();
        assert_eq!(json, r#"{"month":"2024-05","total":"30.00"}"#);
    }

    #[test]
    fn test_create_request_date_is_optional() {
        let request: CreateExpenseRequest = serde_json::from_str(
            r#"{"date":null,"description":"Lunch","amount":"12.50"}"#,
        )
        .unwrap();

        assert_eq!(request.date, None);
        assert_eq!(request.amount, "12.50");
    }
}

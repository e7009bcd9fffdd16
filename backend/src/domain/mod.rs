//! # Domain Module
//!
//! Contains the business logic of the expense tracker, independent of any UI
//! framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **expense_service**: the record store operations (add, list, get, update, delete)
//! - **summary_service**: monthly totals and the month-by-month series for the trend chart
//! - **export_service**: spreadsheet export of all expenses
//! - **models**: expense records, validated drafts and the year-month key
//! - **error**: the typed error every operation returns
//!
//! ## Business Rules
//!
//! - Amounts must be strictly positive decimals
//! - Dates use the YYYY-MM-DD format
//! - Descriptions must not be blank
//! - Ids are generated once and never change or get reused

pub mod error;
pub mod expense_service;
pub mod export_service;
pub mod models;
pub mod summary_service;

pub use error::{ExpenseError, Result};
pub use expense_service::ExpenseService;
pub use export_service::ExportService;
pub use summary_service::{MonthlySummary, SummaryService};

//! # IO Module
//!
//! Adapter layer between a user interface and the domain logic. It translates
//! UI requests into domain operations and formats domain responses for the UI.
//!
//! ## Supported Operations
//!
//! - **GET/POST /api/expenses**: list and create expenses
//! - **GET/PUT/DELETE /api/expenses/:id**: read, edit and delete one expense
//! - **GET /api/summary/monthly**: total for one month
//! - **GET /api/summary/series**: month-by-month totals for the trend chart
//! - **GET/POST /api/export**: download or save the spreadsheet export

pub mod rest;

pub use rest::*;

//! # Storage Module
//!
//! Handles all data persistence for the expense tracker.
//!
//! The domain layer only sees the traits in [`traits`]; the current backend is a
//! single comma-delimited file with an `ID,Date,Description,Amount` header row.
//!
//! ## Storage Guarantees
//!
//! - **Appends**: a new expense is written with one `write_all` call
//! - **Rewrites**: updates and deletes write a temporary sibling file and rename it
//!   over the live file, so readers see either the old or the new content
//! - **Single writer**: mutations inside one process are serialized by the connection

pub mod csv;
pub mod traits;

pub use self::csv::{CsvConnection, ExpenseRepository};
pub use traits::{Connection, ExpenseStorage, StoreStatus};

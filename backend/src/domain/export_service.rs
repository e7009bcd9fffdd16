//! Export service domain logic for the expense tracker.
//!
//! Produces a spreadsheet-friendly CSV with the columns Date, Description and
//! Amount. Expense ids are internal and never exported.
use chrono::NaiveDate;
use csv::WriterBuilder;
use log::info;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::domain::error::{ExpenseError, Result};
use crate::domain::expense_service::ExpenseService;
use crate::domain::models::Expense;
use crate::storage::Connection;

pub const EXPORT_HEADERS: [&str; 3] = ["Date", "Description", "Amount"];

/// Export service that handles all export-related business logic
#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render expenses in stored order as CSV text
    pub fn export_csv(&self, expenses: &[Expense]) -> Result<String> {
        let mut buffer: Vec<u8> = Vec::new();
        {
            let mut csv_writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut buffer);
            csv_writer.write_record(EXPORT_HEADERS)?;
            for expense in expenses {
                csv_writer.write_record([
                    expense.date.as_str(),
                    expense.description.as_str(),
                    expense.amount.as_str(),
                ])?;
            }
            csv_writer.flush()?;
        }

        String::from_utf8(buffer)
            .map_err(|e| ExpenseError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Export every stored expense as CSV text. Fails if there is nothing to export.
    pub fn export_all<C: Connection>(&self, expense_service: &ExpenseService<C>) -> Result<String> {
        let expenses = expense_service.list()?;
        if expenses.is_empty() {
            return Err(ExpenseError::NothingToExport);
        }
        self.export_csv(&expenses)
    }

    /// Write every stored expense to `path`, returning the number of rows written
    pub fn export_to_path<C: Connection>(
        &self,
        expense_service: &ExpenseService<C>,
        path: &Path,
    ) -> Result<usize> {
        let expenses = expense_service.list()?;
        if expenses.is_empty() {
            return Err(ExpenseError::NothingToExport);
        }

        let contents = self.export_csv(&expenses)?;
        write_export_file(path, contents.as_bytes())?;
        info!("Exported {} expenses to {}", expenses.len(), path.display());
        Ok(expenses.len())
    }

    /// Default export file name, e.g. `expenses_export_20240531.csv`
    pub fn default_file_name(today: NaiveDate) -> String {
        format!("expenses_export_{}.csv", today.format("%Y%m%d"))
    }
}

/// Write through a uniquely named temporary file next to `path`, then move it into place.
/// Existing files other than `path` itself are never touched.
fn write_export_file(path: &Path, contents: &[u8]) -> Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufReader};

use super::connection::{headers_match, CsvConnection};
use crate::domain::error::{ExpenseError, Result};
use crate::domain::models::{Expense, ExpenseId, EXPENSE_HEADERS};
use crate::storage::traits::{ExpenseStorage, StoreStatus};

/// CSV-based expense repository
#[derive(Clone)]
pub struct ExpenseRepository {
    connection: CsvConnection,
}

impl ExpenseRepository {
    /// Create a new CSV expense repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all expenses from the CSV file in stored order.
    /// A missing or empty file holds no expenses.
    ///
    /// Rows are read flexibly: a hand-edited row with missing trailing fields loads with
    /// those fields empty, and fields past `Amount` are ignored.
    fn read_expenses(&self) -> Result<Vec<Expense>> {
        let file = match File::open(self.connection.expense_file_path()) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = csv_reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        check_headers(&headers)?;

        let mut expenses = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            if record.len() != EXPENSE_HEADERS.len() {
                warn!(
                    "Expense row at line {} has {} fields, expected {}",
                    record.position().map_or(0, |p| p.line()),
                    record.len(),
                    EXPENSE_HEADERS.len()
                );
            }
            expenses.push(expense_from_record(&record));
        }
        Ok(expenses)
    }

    /// Rewrite the whole CSV file atomically
    fn write_expenses(&self, expenses: &[Expense]) -> Result<()> {
        let mut contents: Vec<u8> = Vec::new();
        {
            let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(&mut contents);
            csv_writer.write_record(EXPENSE_HEADERS)?;
            for expense in expenses {
                csv_writer.serialize(expense)?;
            }
            csv_writer.flush()?;
        }

        self.connection.replace_expense_file(&contents)
    }

    /// Encode one expense as a terminated CSV row
    fn encode_row(expense: &Expense) -> Result<Vec<u8>> {
        let mut row: Vec<u8> = Vec::new();
        {
            let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(&mut row);
            csv_writer.serialize(expense)?;
            csv_writer.flush()?;
        }
        Ok(row)
    }
}

/// Map a row onto the `ID,Date,Description,Amount` columns by position
fn expense_from_record(record: &StringRecord) -> Expense {
    let field = |index: usize| record.get(index).unwrap_or("").to_string();
    Expense {
        id: ExpenseId::from(field(0)),
        date: field(1),
        description: field(2),
        amount: field(3),
    }
}

fn check_headers(headers: &StringRecord) -> Result<()> {
    let found: Vec<String> = headers.iter().map(str::to_string).collect();
    if headers_match(&found) {
        Ok(())
    } else {
        Err(ExpenseError::CorruptStore {
            expected: EXPENSE_HEADERS.iter().map(|h| h.to_string()).collect(),
            found,
        })
    }
}

impl ExpenseStorage for ExpenseRepository {
    fn initialize(&self) -> Result<StoreStatus> {
        self.connection.ensure_expense_file_exists()
    }

    fn store_expense(&self, expense: &Expense) -> Result<()> {
        let _guard = self.connection.lock();

        match self.connection.read_headers()? {
            None => self.write_expenses(&[])?,
            Some(found) if headers_match(&found) => {}
            Some(found) => {
                return Err(ExpenseError::CorruptStore {
                    expected: EXPENSE_HEADERS.iter().map(|h| h.to_string()).collect(),
                    found,
                })
            }
        }

        let row = Self::encode_row(expense)?;
        self.connection.append_to_expense_file(&row)?;
        info!("Stored expense {}", expense.id);
        Ok(())
    }

    fn get_expense(&self, expense_id: &ExpenseId) -> Result<Option<Expense>> {
        let expenses = self.read_expenses()?;
        Ok(expenses.into_iter().find(|e| &e.id == expense_id))
    }

    fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.read_expenses()
    }

    fn update_expense(&self, expense: &Expense) -> Result<bool> {
        let _guard = self.connection.lock();

        let mut expenses = self.read_expenses()?;
        let Some(existing) = expenses.iter_mut().find(|e| e.id == expense.id) else {
            return Ok(false);
        };
        *existing = expense.clone();

        self.write_expenses(&expenses)?;
        info!("Updated expense {}", expense.id);
        Ok(true)
    }

    fn delete_expense(&self, expense_id: &ExpenseId) -> Result<bool> {
        let _guard = self.connection.lock();

        let mut expenses = self.read_expenses()?;
        let Some(position) = expenses.iter().position(|e| &e.id == expense_id) else {
            return Ok(false);
        };
        expenses.remove(position);

        self.write_expenses(&expenses)?;
        info!("Deleted expense {}", expense_id);
        Ok(true)
    }
}

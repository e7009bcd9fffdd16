pub mod connection;
pub mod expense_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::{BeforeReplaceHook, CsvConnection};
pub use expense_repository::ExpenseRepository;

//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use crate::domain::error::Result;
use crate::domain::models::{Expense, ExpenseId};

/// Outcome of preparing the backing store at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStatus {
    /// No store existed; an empty one with the expected header was written
    Created,
    /// The store exists and its header matches the expected layout
    Ready,
    /// The store exists with a different header. Reads will report `CorruptStore`.
    SchemaMismatch { found: Vec<String> },
}

/// Trait defining the interface for expense storage operations
///
/// Implementations own the persisted collection. Row order is insertion order;
/// updates and deletes keep the relative order of untouched rows. If a hand-edited store
/// holds an id twice, get, update and delete all act on the first matching row.
pub trait ExpenseStorage: Send + Sync {
    /// Make sure the backing store exists and report whether its layout is usable
    fn initialize(&self) -> Result<StoreStatus>;

    /// Append a new expense as a single atomic write
    fn store_expense(&self, expense: &Expense) -> Result<()>;

    /// Retrieve a specific expense by ID
    fn get_expense(&self, expense_id: &ExpenseId) -> Result<Option<Expense>>;

    /// List all expenses in stored order
    fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// Replace the expense with the same ID, keeping its position
    /// Returns true if the expense was found and updated, false otherwise
    fn update_expense(&self, expense: &Expense) -> Result<bool>;

    /// Delete a single expense
    /// Returns true if the expense was found and deleted, false otherwise
    fn delete_expense(&self, expense_id: &ExpenseId) -> Result<bool>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides factory
/// methods for creating repositories, so the domain layer works with any backend.
pub trait Connection: Send + Sync + Clone {
    /// The type of ExpenseStorage this connection creates
    type ExpenseRepository: ExpenseStorage + Clone;

    /// Create a new expense repository for this connection
    fn create_expense_repository(&self) -> Self::ExpenseRepository;
}

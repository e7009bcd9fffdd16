//! Expense service: the record store operations used by the presentation layer.
//!
//! Input is validated into an [`ExpenseDraft`] before anything touches storage, so
//! a rejected call never changes the persisted collection.
use log::{info, warn};

use crate::domain::error::{ExpenseError, Result};
use crate::domain::models::{Expense, ExpenseDraft, ExpenseId};
use crate::storage::{Connection, ExpenseStorage, StoreStatus};

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
        }
    }

    /// Ensure the backing store exists. A header mismatch is reported, not raised.
    pub fn initialize(&self) -> Result<StoreStatus> {
        let status = self.expense_repository.initialize()?;
        if let StoreStatus::SchemaMismatch { found } = &status {
            warn!(
                "Expense store has an unexpected layout {:?}; reads will fail until it is fixed",
                found
            );
        }
        Ok(status)
    }

    /// Validate and append a new expense, returning its freshly generated id
    pub fn add(&self, date: &str, description: &str, amount: &str) -> Result<ExpenseId> {
        let draft = ExpenseDraft::parse(date, description, amount)?;
        let expense = Expense::from_draft(ExpenseId::generate(), &draft);

        self.expense_repository.store_expense(&expense)?;
        info!(
            "Added expense {} on {} for {}",
            expense.id, expense.date, expense.amount
        );
        Ok(expense.id)
    }

    /// All expenses in stored order
    pub fn list(&self) -> Result<Vec<Expense>> {
        self.expense_repository.list_expenses()
    }

    pub fn get(&self, expense_id: &ExpenseId) -> Result<Expense> {
        self.expense_repository
            .get_expense(expense_id)?
            .ok_or_else(|| ExpenseError::NotFound(expense_id.to_string()))
    }

    /// Replace date, description and amount of an existing expense, keeping its id and position
    pub fn update(
        &self,
        expense_id: &ExpenseId,
        date: &str,
        description: &str,
        amount: &str,
    ) -> Result<()> {
        let draft = ExpenseDraft::parse(date, description, amount)?;
        let expense = Expense::from_draft(expense_id.clone(), &draft);

        if !self.expense_repository.update_expense(&expense)? {
            return Err(ExpenseError::NotFound(expense_id.to_string()));
        }
        info!("Updated expense {}", expense_id);
        Ok(())
    }

    pub fn delete(&self, expense_id: &ExpenseId) -> Result<()> {
        if !self.expense_repository.delete_expense(expense_id)? {
            return Err(ExpenseError::NotFound(expense_id.to_string()));
        }
        info!("Deleted expense {}", expense_id);
        Ok(())
    }
}

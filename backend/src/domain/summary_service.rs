//! Monthly aggregation over the persisted expenses.
//!
//! Both aggregations are read-only. Rows whose date or amount cannot be parsed are
//! skipped and logged so that a few bad legacy rows never block reporting on the rest.
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::domain::error::{ExpenseError, Result};
use crate::domain::expense_service::ExpenseService;
use crate::domain::models::{Expense, YearMonth};
use crate::storage::Connection;

/// Total spent in one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub period: YearMonth,
    pub total: Decimal,
}

impl MonthlySummary {
    /// e.g. "Total for May 2024: 30.00"
    pub fn display_line(&self) -> String {
        format!("Total for {}: {:.2}", self.period.label(), self.total)
    }
}

#[derive(Clone)]
pub struct SummaryService<C: Connection> {
    expense_service: ExpenseService<C>,
}

impl<C: Connection> SummaryService<C> {
    pub fn new(expense_service: ExpenseService<C>) -> Self {
        Self { expense_service }
    }

    /// Sum of all amounts dated in the given month; zero if there are none
    pub fn monthly_total(&self, year: i32, month: u32) -> Result<Decimal> {
        let period = YearMonth::new(year, month)?;
        let expenses = self.expense_service.list()?;
        total_for_month(&expenses, period)
    }

    pub fn monthly_summary(&self, year: i32, month: u32) -> Result<MonthlySummary> {
        let period = YearMonth::new(year, month)?;
        let expenses = self.expense_service.list()?;
        Ok(MonthlySummary {
            period,
            total: total_for_month(&expenses, period)?,
        })
    }

    /// Totals for every month that has expenses, oldest month first
    pub fn monthly_series(&self) -> Result<BTreeMap<YearMonth, Decimal>> {
        let expenses = self.expense_service.list()?;
        group_by_month(&expenses)
    }
}

/// Sum of the amounts dated in `period`.
/// Fails with `TotalOverflow` instead of wrapping when the sum exceeds `Decimal::MAX`.
pub fn total_for_month(expenses: &[Expense], period: YearMonth) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    let mut skipped = 0;
    for expense in expenses {
        match parse_row(expense) {
            Some((month, amount)) if month == period => {
                total = total
                    .checked_add(amount)
                    .ok_or_else(|| ExpenseError::TotalOverflow(period.label()))?;
            }
            Some(_) => {}
            None => skipped += 1,
        }
    }
    report_skipped(skipped);
    Ok(total)
}

/// Per-month sums, oldest month first
pub fn group_by_month(expenses: &[Expense]) -> Result<BTreeMap<YearMonth, Decimal>> {
    let mut totals = BTreeMap::new();
    let mut skipped = 0;
    for expense in expenses {
        let Some((month, amount)) = parse_row(expense) else {
            skipped += 1;
            continue;
        };
        let total = totals.entry(month).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(amount)
            .ok_or_else(|| ExpenseError::TotalOverflow(month.label()))?;
    }
    report_skipped(skipped);
    Ok(totals)
}

fn parse_row(expense: &Expense) -> Option<(YearMonth, Decimal)> {
    let Some(date) = expense.parsed_date() else {
        debug!("Skipping expense {}: unparseable date {:?}", expense.id, expense.date);
        return None;
    };
    let Some(amount) = expense.parsed_amount() else {
        debug!("Skipping expense {}: unparseable amount {:?}", expense.id, expense.amount);
        return None;
    };
    Some((YearMonth::from_date(date), amount))
}

fn report_skipped(skipped: usize) {
    if skipped > 0 {
        warn!("Skipped {} malformed expense rows while aggregating", skipped);
    }
}

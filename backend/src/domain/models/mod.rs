pub mod expense;
pub mod month;

pub use expense::{Expense, ExpenseDraft, ExpenseId, DATE_FORMAT, EXPENSE_HEADERS};
pub use month::YearMonth;

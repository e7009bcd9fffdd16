//! Errors returned by the record store, the aggregator and the export service.
//!
//! Every operation returns an [`ExpenseError`] kind that the presentation layer can
//! turn into a message without inspecting strings:
//!
//! - validation: [`InvalidAmount`], [`InvalidDate`], [`EmptyDescription`], [`InvalidMonth`]
//! - lookup: [`NotFound`], [`NothingToExport`]
//! - aggregation: [`TotalOverflow`]
//! - storage: [`CorruptStore`], [`Io`], [`Csv`]
//!
//!  [`InvalidAmount`]: ExpenseError::InvalidAmount
//!  [`InvalidDate`]: ExpenseError::InvalidDate
//!  [`EmptyDescription`]: ExpenseError::EmptyDescription
//!  [`InvalidMonth`]: ExpenseError::InvalidMonth
//!  [`NotFound`]: ExpenseError::NotFound
//!  [`NothingToExport`]: ExpenseError::NothingToExport
//!  [`TotalOverflow`]: ExpenseError::TotalOverflow
//!  [`CorruptStore`]: ExpenseError::CorruptStore
//!  [`Io`]: ExpenseError::Io
//!  [`Csv`]: ExpenseError::Csv
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExpenseError>;

#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("Invalid amount \"{0}\": amount must be a positive number")]
    InvalidAmount(String),
    #[error("Invalid date \"{0}\": use the YYYY-MM-DD format")]
    InvalidDate(String),
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Invalid month {0}: month must be between 1 and 12")]
    InvalidMonth(u32),
    #[error("Expense \"{0}\" not found")]
    NotFound(String),
    #[error("No expenses to export")]
    NothingToExport,
    #[error("Total for {0} is too large to compute")]
    TotalOverflow(String),
    #[error("Expense file headers are incorrect. Expected {expected:?}, found {found:?}")]
    CorruptStore {
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("Storage failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV failure: {0}")]
    Csv(#[from] csv::Error),
}

impl ExpenseError {
    /// Short machine readable kind, used in REST error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "invalid_amount",
            Self::InvalidDate(_) => "invalid_date",
            Self::EmptyDescription => "empty_description",
            Self::InvalidMonth(_) => "invalid_month",
            Self::NotFound(_) => "not_found",
            Self::NothingToExport => "nothing_to_export",
            Self::TotalOverflow(_) => "total_overflow",
            Self::CorruptStore { .. } => "corrupt_store",
            Self::Io(_) | Self::Csv(_) => "io_failure",
        }
    }

    /// True for rejected user input, as opposed to storage problems
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::InvalidDate(_)
                | Self::EmptyDescription
                | Self::InvalidMonth(_)
        )
    }

    pub fn is_io_failure(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Csv(_))
    }
}

impl PartialEq for ExpenseError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::EmptyDescription, Self::EmptyDescription) => true,
            (Self::InvalidMonth(a), Self::InvalidMonth(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::NothingToExport, Self::NothingToExport) => true,
            (Self::TotalOverflow(a), Self::TotalOverflow(b)) => a == b,
            (
                Self::CorruptStore { expected: e1, found: f1 },
                Self::CorruptStore { expected: e2, found: f2 },
            ) => e1 == e2 && f1 == f2,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

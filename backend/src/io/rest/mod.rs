//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the expense tracker. This layer handles
//! request/response serialization and translates domain errors to HTTP status
//! codes; it holds no business logic.
//!
//! ## Error Translation
//!
//! - validation errors → 400 Bad Request
//! - unknown expense or nothing to export → 404 Not Found
//! - store with an unexpected header, or totals too large to add up → 409 Conflict
//! - storage failures → 500 Internal Server Error

pub mod expense_apis;
pub mod export_apis;
pub mod mappers;
pub mod summary_apis;

pub use expense_apis::*;
pub use export_apis::*;
pub use summary_apis::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;

use crate::domain::ExpenseError;

/// HTTP status for a domain error
pub fn status_for(error: &ExpenseError) -> StatusCode {
    match error {
        e if e.is_validation() => StatusCode::BAD_REQUEST,
        ExpenseError::NotFound(_) | ExpenseError::NothingToExport => StatusCode::NOT_FOUND,
        ExpenseError::CorruptStore { .. } | ExpenseError::TotalOverflow(_) => {
            StatusCode::CONFLICT
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the JSON error response for a domain error
pub fn error_response(error: ExpenseError) -> Response {
    let body = ErrorResponse {
        error: error.kind().to_string(),
        message: error.to_string(),
    };
    (status_for(&error), Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&ExpenseError::InvalidAmount("0".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ExpenseError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&ExpenseError::CorruptStore {
                expected: vec![],
                found: vec![]
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&ExpenseError::TotalOverflow("May 2024".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&ExpenseError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only"
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

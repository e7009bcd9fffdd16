//! # REST API for Expenses
//!
//! Endpoints for listing, creating, editing and deleting expenses.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Local;
use log::{error, info};
use shared::{
    CreateExpenseRequest, CreateExpenseResponse, DeleteExpenseResponse, ExpenseListResponse,
    UpdateExpenseRequest, UpdateExpenseResponse,
};

use super::error_response;
use super::mappers::ExpenseMapper;
use crate::domain::models::{ExpenseId, DATE_FORMAT};
use crate::AppState;

/// List all expenses in stored order
pub async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses");

    match state.expense_service.list() {
        Ok(expenses) => {
            let response = ExpenseListResponse {
                expenses: expenses.into_iter().map(ExpenseMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list expenses: {}", e);
            error_response(e)
        }
    }
}

/// Create a new expense; the date defaults to today
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses - request: {:?}", request);

    let date = request
        .date
        .unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string());

    let created = state
        .expense_service
        .add(&date, &request.description, &request.amount)
        .and_then(|id| state.expense_service.get(&id));

    match created {
        Ok(expense) => {
            let response = CreateExpenseResponse {
                expense: ExpenseMapper::to_dto(expense),
                success_message: "Expense added successfully!".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create expense: {}", e);
            error_response(e)
        }
    }
}

/// Fetch one expense, e.g. to prefill an edit form
pub async fn get_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/expenses/{}", expense_id);

    match state.expense_service.get(&ExpenseId::from(expense_id)) {
        Ok(expense) => (StatusCode::OK, Json(ExpenseMapper::to_dto(expense))).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
    Json(request): Json<UpdateExpenseRequest>,
) -> impl IntoResponse {
    info!("PUT /api/expenses/{} - request: {:?}", expense_id, request);

    let expense_id = ExpenseId::from(expense_id);
    let updated = state
        .expense_service
        .update(&expense_id, &request.date, &request.description, &request.amount)
        .and_then(|()| state.expense_service.get(&expense_id));

    match updated {
        Ok(expense) => {
            let response = UpdateExpenseResponse {
                expense: ExpenseMapper::to_dto(expense),
                success_message: "Expense updated successfully!".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update expense {}: {}", expense_id, e);
            error_response(e)
        }
    }
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/{}", expense_id);

    let expense_id = ExpenseId::from(expense_id);
    match state.expense_service.delete(&expense_id) {
        Ok(()) => {
            let response = DeleteExpenseResponse {
                deleted_id: expense_id.to_string(),
                success_message: "Expense deleted successfully!".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to delete expense {}: {}", expense_id, e);
            error_response(e)
        }
    }
}

//! # REST API for Export
//!
//! Download the expense export directly, or have the backend save it to a file.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::Local;
use log::{error, info};
use shared::{ExportToPathRequest, ExportToPathResponse};
use std::path::PathBuf;

use super::error_response;
use crate::domain::ExportService;
use crate::AppState;

/// Return the export as a CSV attachment
pub async fn export_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/export");

    match state.export_service.export_all(&state.expense_service) {
        Ok(csv) => {
            let file_name = ExportService::default_file_name(Local::now().date_naive());
            let headers = [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file_name),
                ),
            ];
            (StatusCode::OK, headers, csv).into_response()
        }
        Err(e) => {
            error!("Failed to export expenses: {}", e);
            error_response(e)
        }
    }
}

/// Save the export to the requested path, or a dated file in the data directory
pub async fn export_to_path(
    State(state): State<AppState>,
    Json(request): Json<ExportToPathRequest>,
) -> impl IntoResponse {
    info!("POST /api/export - request: {:?}", request);

    let file_path = match request.path {
        Some(path) => PathBuf::from(path),
        None => state
            .config
            .data_directory
            .join(ExportService::default_file_name(Local::now().date_naive())),
    };

    match state
        .export_service
        .export_to_path(&state.expense_service, &file_path)
    {
        Ok(rows_exported) => {
            let response = ExportToPathResponse {
                file_path: file_path.display().to_string(),
                rows_exported,
                success_message: format!("Expenses exported to: {}", file_path.display()),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to export expenses to {}: {}", file_path.display(), e);
            error_response(e)
        }
    }
}

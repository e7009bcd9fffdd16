//! # REST API for Monthly Summaries
//!
//! The single-month total and the month-by-month series behind the trend chart.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{Datelike, Local};
use log::{error, info};
use shared::MonthlySummaryRequest;

use super::error_response;
use super::mappers::ExpenseMapper;
use crate::AppState;

/// Total for one month; year and month default to the current month
pub async fn get_monthly_summary(
    State(state): State<AppState>,
    Query(query): Query<MonthlySummaryRequest>,
) -> impl IntoResponse {
    info!("GET /api/summary/monthly - query: {:?}", query);

    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    match state.summary_service.monthly_summary(year, month) {
        Ok(summary) => {
            (StatusCode::OK, Json(ExpenseMapper::summary_to_dto(summary))).into_response()
        }
        Err(e) => {
            error!("Failed to compute monthly summary: {}", e);
            error_response(e)
        }
    }
}

/// Monthly totals ordered oldest first
pub async fn get_monthly_series(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summary/series");

    match state.summary_service.monthly_series() {
        Ok(series) => (StatusCode::OK, Json(ExpenseMapper::series_to_dto(series))).into_response(),
        Err(e) => {
            error!("Failed to compute monthly series: {}", e);
            error_response(e)
        }
    }
}

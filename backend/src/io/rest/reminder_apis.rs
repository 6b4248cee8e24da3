//! # REST API for Reminders
//!
//! Endpoints for the reminder lifecycle, including the complete/skip
//! conveniences and the soft delete.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use serde::Deserialize;

use shared::{
    CreateReminderRequest, DeleteReminderResponse, ReminderListRequest, ReminderListResponse,
    UpdateReminderRequest,
};

use crate::domain::errors::ServiceError;
use crate::io::rest::error_response;
use crate::io::rest::mappers::ReminderMapper;
use crate::AppState;

pub async fn list_reminders(
    State(state): State<AppState>,
    Query(request): Query<ReminderListRequest>,
) -> impl IntoResponse {
    info!("GET /api/reminders - query: {:?}", request);

    let filter = match ReminderMapper::to_filter(request) {
        Ok(filter) => filter,
        Err(e) => return error_response("list reminders", e),
    };
    match state.reminder_service.list_reminders(filter).await {
        Ok(reminders) => {
            let response = ReminderListResponse {
                reminders: reminders.into_iter().map(ReminderMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list reminders", e),
    }
}

pub async fn create_reminder(
    State(state): State<AppState>,
    Json(request): Json<CreateReminderRequest>,
) -> impl IntoResponse {
    info!("POST /api/reminders - title: {:?}", request.title);

    let cmd = match ReminderMapper::to_create_command(request) {
        Ok(cmd) => cmd,
        Err(e) => return error_response("create reminder", e),
    };
    match state.reminder_service.create_reminder(cmd).await {
        Ok(reminder) => {
            (StatusCode::CREATED, Json(ReminderMapper::to_dto(reminder))).into_response()
        }
        Err(e) => error_response("create reminder", e),
    }
}

pub async fn get_reminder(
    State(state): State<AppState>,
    Path(reminder_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/reminders/{}", reminder_id);

    match state.reminder_service.get_reminder(&reminder_id).await {
        Ok(Some(reminder)) => {
            (StatusCode::OK, Json(ReminderMapper::to_dto(reminder))).into_response()
        }
        Ok(None) => error_response("get reminder", ServiceError::not_found("reminder")),
        Err(e) => error_response("get reminder", e),
    }
}

pub async fn update_reminder(
    State(state): State<AppState>,
    Path(reminder_id): Path<String>,
    Json(request): Json<UpdateReminderRequest>,
) -> impl IntoResponse {
    info!("PUT /api/reminders/{}", reminder_id);

    let cmd = match ReminderMapper::to_update_command(request) {
        Ok(cmd) => cmd,
        Err(e) => return error_response("update reminder", e),
    };
    match state
        .reminder_service
        .update_reminder(&reminder_id, cmd)
        .await
    {
        Ok(reminder) => (StatusCode::OK, Json(ReminderMapper::to_dto(reminder))).into_response(),
        Err(e) => error_response("update reminder", e),
    }
}

/// Soft delete: the reminder disappears from listings but its row keeps
/// existing with is_active = false.
pub async fn delete_reminder(
    State(state): State<AppState>,
    Path(reminder_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/reminders/{}", reminder_id);

    match state.reminder_service.delete_reminder(&reminder_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeleteReminderResponse {
                success_message: "Reminder deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response("delete reminder", e),
    }
}

pub async fn complete_reminder(
    State(state): State<AppState>,
    Path(reminder_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/reminders/{}/complete", reminder_id);

    match state.reminder_service.complete(&reminder_id).await {
        Ok(reminder) => (StatusCode::OK, Json(ReminderMapper::to_dto(reminder))).into_response(),
        Err(e) => error_response("complete reminder", e),
    }
}

pub async fn skip_reminder(
    State(state): State<AppState>,
    Path(reminder_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/reminders/{}/skip", reminder_id);

    match state.reminder_service.skip(&reminder_id).await {
        Ok(reminder) => (StatusCode::OK, Json(ReminderMapper::to_dto(reminder))).into_response(),
        Err(e) => error_response("skip reminder", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ReminderWeekQuery {
    /// Monday of the requested week, `YYYY-MM-DD`.
    pub monday: String,
}

pub async fn reminders_for_week(
    State(state): State<AppState>,
    Query(query): Query<ReminderWeekQuery>,
) -> impl IntoResponse {
    info!("GET /api/reminders/week - monday: {}", query.monday);

    let monday = match crate::domain::dates::parse_civil_date(&query.monday) {
        Some(date) => date,
        None => {
            return error_response(
                "reminders for week",
                ServiceError::Validation(format!("Invalid date: {}", query.monday)),
            )
        }
    };
    match state.reminder_service.reminders_for_week(monday).await {
        Ok(reminders) => {
            let response = ReminderListResponse {
                reminders: reminders.into_iter().map(ReminderMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("reminders for week", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ReminderMonthQuery {
    pub year: i32,
    pub month: u32,
}

pub async fn reminders_for_month(
    State(state): State<AppState>,
    Query(query): Query<ReminderMonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/reminders/month - {}/{}", query.month, query.year);

    match state
        .reminder_service
        .reminders_for_month(query.year, query.month)
        .await
    {
        Ok(reminders) => {
            let response = ReminderListResponse {
                reminders: reminders.into_iter().map(ReminderMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("reminders for month", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    /// Horizon in days; defaults to 7.
    pub days: Option<i64>,
}

pub async fn upcoming_reminders(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> impl IntoResponse {
    let days = query.days.unwrap_or(7);
    info!("GET /api/reminders/upcoming - days: {}", days);

    match state.reminder_service.upcoming(days).await {
        Ok(reminders) => {
            let response = ReminderListResponse {
                reminders: reminders.into_iter().map(ReminderMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("upcoming reminders", e),
    }
}

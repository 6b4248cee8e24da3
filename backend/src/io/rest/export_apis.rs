//! # REST API for CSV export.
//!
//! `export_data` hands the CSV content back for a client-side download;
//! `export_to_path` writes it server-side to a chosen directory.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use serde::Deserialize;

use shared::{ExportEntity, ExportToPathRequest};

use crate::io::rest::error_response;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub entity: ExportEntity,
}

pub async fn export_data(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> impl IntoResponse {
    info!("GET /api/export - entity: {:?}", query.entity);

    let result = match query.entity {
        ExportEntity::Tasks => {
            state
                .export_service
                .export_tasks_csv(&state.task_service)
                .await
        }
        ExportEntity::Reminders => {
            state
                .export_service
                .export_reminders_csv(&state.reminder_service)
                .await
        }
    };
    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response("export data", e),
    }
}

pub async fn export_to_path(
    State(state): State<AppState>,
    Json(request): Json<ExportToPathRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/export/path - entity: {:?}, custom_path: {:?}",
        request.entity, request.custom_path
    );

    match state
        .export_service
        .export_to_path(request, &state.task_service, &state.reminder_service)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response("export to path", e),
    }
}

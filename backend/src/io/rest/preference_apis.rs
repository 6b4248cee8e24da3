//! # REST API for UI preferences.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use shared::{PreferenceResponse, SetPreferenceRequest};

use crate::io::rest::error_response;
use crate::AppState;

pub async fn get_preference(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/preferences/{}", key);

    match state.preference_service.get(&key).await {
        Ok(value) => (StatusCode::OK, Json(PreferenceResponse { key, value })).into_response(),
        Err(e) => error_response("get preference", e),
    }
}

pub async fn set_preference(
    State(state): State<AppState>,
    Json(request): Json<SetPreferenceRequest>,
) -> impl IntoResponse {
    info!("POST /api/preferences - key: {}", request.key);

    match state
        .preference_service
        .set(&request.key, &request.value)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(PreferenceResponse {
                key: request.key,
                value: Some(request.value),
            }),
        )
            .into_response(),
        Err(e) => error_response("set preference", e),
    }
}

pub async fn delete_preference(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/preferences/{}", key);

    match state.preference_service.delete(&key).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("delete preference", e),
    }
}
